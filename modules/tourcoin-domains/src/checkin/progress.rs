use std::collections::HashSet;

use anyhow::Result;
use sqlx::PgConnection;
use tracing::info;

use crate::catalog::RouteStop;
use crate::checkin::ledger::VisitLedger;

/// Where a user stands on a route after a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Some stop's place has not been visited on this route yet.
    Incomplete,
    /// Every stop is covered, but the user's completion flag was already set.
    AlreadyRewarded,
    /// Every stop is covered and this call set the flag and paid the bonus.
    NewlyCompleted,
}

impl Completion {
    pub fn newly_completed(self) -> bool {
        self == Completion::NewlyCompleted
    }
}

/// True iff every stop place has been visited. Visit order is irrelevant.
/// A route without stops is never complete.
pub fn covers_route(stop_places: &HashSet<i64>, visited: &HashSet<i64>) -> bool {
    !stop_places.is_empty() && stop_places.is_subset(visited)
}

pub struct ProgressTracker;

impl ProgressTracker {
    /// Re-evaluate completion of `route_id` for `user_id` and, the first time
    /// the user covers any route, set the flag and pay `bonus`.
    ///
    /// The completion flag is a single boolean per user, so only the first
    /// completed route earns the bonus.
    pub async fn evaluate_completion(
        conn: &mut PgConnection,
        user_id: i64,
        route_id: i64,
        bonus: i64,
    ) -> Result<Completion> {
        let stop_places = RouteStop::place_ids_for_route(&mut *conn, route_id).await?;
        let visited = VisitLedger::visited_places(&mut *conn, user_id, route_id).await?;

        if !covers_route(&stop_places, &visited) {
            return Ok(Completion::Incomplete);
        }

        let flagged = sqlx::query(
            r#"
            UPDATE users
            SET visited_route = TRUE, coins = coins + $2
            WHERE id = $1 AND visited_route = FALSE
            "#,
        )
        .bind(user_id)
        .bind(bonus)
        .execute(&mut *conn)
        .await?
        .rows_affected();

        if flagged == 0 {
            return Ok(Completion::AlreadyRewarded);
        }

        info!(user_id, route_id, bonus, "Route completed");
        Ok(Completion::NewlyCompleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[i64]) -> HashSet<i64> {
        ids.iter().copied().collect()
    }

    #[test]
    fn covered_when_all_stops_visited() {
        assert!(covers_route(&set(&[1, 2, 3]), &set(&[1, 2, 3])));
    }

    #[test]
    fn visit_order_does_not_matter() {
        let stops = set(&[10, 20, 30]);
        let mut visited = HashSet::new();
        for place in [30, 10, 20] {
            assert!(!covers_route(&stops, &visited));
            visited.insert(place);
        }
        assert!(covers_route(&stops, &visited));
    }

    #[test]
    fn missing_stop_means_incomplete() {
        assert!(!covers_route(&set(&[1, 2, 3]), &set(&[1, 3])));
    }

    #[test]
    fn extra_visits_do_not_hurt() {
        assert!(covers_route(&set(&[1, 2]), &set(&[1, 2, 7])));
    }

    #[test]
    fn repeated_place_in_route_needs_one_visit() {
        // A route passing the same place twice yields one distinct place id.
        assert!(covers_route(&set(&[4, 4, 5]), &set(&[4, 5])));
    }

    #[test]
    fn empty_route_is_never_complete() {
        assert!(!covers_route(&HashSet::new(), &set(&[1])));
        assert!(!covers_route(&HashSet::new(), &HashSet::new()));
    }

    #[test]
    fn completion_flags() {
        assert!(!Completion::Incomplete.newly_completed());
        assert!(!Completion::AlreadyRewarded.newly_completed());
        assert!(Completion::NewlyCompleted.newly_completed());
    }
}
