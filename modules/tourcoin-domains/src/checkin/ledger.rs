use std::collections::HashSet;

use anyhow::Result;
use sqlx::{PgConnection, PgExecutor};
use tracing::debug;

/// Result of trying to record a visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOutcome {
    Created,
    AlreadyVisited,
}

/// Durable record of which user visited which place on which route.
///
/// At most one record exists per (user, place, route); the table's primary
/// key enforces it.
pub struct VisitLedger;

impl VisitLedger {
    /// Record a visit and pay `reward` coins to the user.
    ///
    /// Must run inside a transaction: the user row is created if absent and
    /// then locked, so concurrent check-ins for the same user queue behind
    /// this one until it commits or rolls back. On `AlreadyVisited` nothing
    /// has been written except the (idempotent) user insert, which the caller
    /// is expected to roll back.
    pub async fn record_visit(
        conn: &mut PgConnection,
        user_id: i64,
        place_id: i64,
        route_id: i64,
        reward: i64,
    ) -> Result<VisitOutcome> {
        sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(user_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .execute(&mut *conn)
            .await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO visit_records (user_id, place_id, route_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, place_id, route_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(place_id)
        .bind(route_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

        if inserted == 0 {
            debug!(user_id, place_id, route_id, "Visit already recorded");
            return Ok(VisitOutcome::AlreadyVisited);
        }

        sqlx::query("UPDATE users SET coins = coins + $2 WHERE id = $1")
            .bind(user_id)
            .bind(reward)
            .execute(&mut *conn)
            .await?;

        Ok(VisitOutcome::Created)
    }

    /// Places the user has visited as part of `route_id`.
    pub async fn visited_places<'e, E>(executor: E, user_id: i64, route_id: i64) -> Result<HashSet<i64>>
    where
        E: PgExecutor<'e>,
    {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT place_id FROM visit_records WHERE user_id = $1 AND route_id = $2",
        )
        .bind(user_id)
        .bind(route_id)
        .fetch_all(executor)
        .await?;

        Ok(ids.into_iter().collect())
    }
}
