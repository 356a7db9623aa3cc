use sqlx::PgPool;
use tourcoin_common::{Coordinates, ProximityPolicy, RewardPolicy};
use tracing::{debug, info};

use crate::catalog::{Place, RouteStop};
use crate::checkin::error::CheckInError;
use crate::checkin::ledger::{VisitLedger, VisitOutcome};
use crate::checkin::progress::ProgressTracker;
use crate::users::User;

/// A validated check-in request.
#[derive(Debug, Clone, Copy)]
pub struct CheckIn {
    pub route_id: i64,
    pub order: i32,
    pub user_id: i64,
    pub position: Coordinates,
}

/// What a successful check-in granted.
#[derive(Debug, Clone)]
pub struct CheckInReceipt {
    pub coins_awarded: i64,
    pub coins: i64,
    /// True when this check-in completed the route and paid the bonus.
    pub route_completed: bool,
}

/// Orchestrates proximity, ledger and progress for a single check-in.
#[derive(Clone)]
pub struct CheckInWorkflow {
    pool: PgPool,
    proximity: ProximityPolicy,
    rewards: RewardPolicy,
}

impl CheckInWorkflow {
    pub fn new(pool: PgPool, proximity: ProximityPolicy, rewards: RewardPolicy) -> Self {
        Self {
            pool,
            proximity,
            rewards,
        }
    }

    /// Run one check-in: resolve stop → resolve place → proximity → ledger →
    /// completion. Every failure short-circuits before anything is committed.
    pub async fn check_in(&self, request: CheckIn) -> Result<CheckInReceipt, CheckInError> {
        let stop = RouteStop::find_by_order(request.route_id, request.order, &self.pool)
            .await?
            .ok_or(CheckInError::StopNotFound)?;

        let place = Place::find_by_id(stop.place_id, &self.pool)
            .await?
            .ok_or(CheckInError::PlaceNotFound)?;

        let distance_km = self.proximity.distance_km(place.coordinates(), request.position);
        if !self.proximity.within(distance_km) {
            debug!(
                user_id = request.user_id,
                place_id = place.id,
                distance_km,
                "Check-in rejected: too far"
            );
            return Err(CheckInError::TooFar { distance_km });
        }

        let mut tx = self.pool.begin().await?;

        let outcome = VisitLedger::record_visit(
            &mut tx,
            request.user_id,
            place.id,
            request.route_id,
            self.rewards.visit_coins,
        )
        .await?;

        if outcome == VisitOutcome::AlreadyVisited {
            tx.rollback().await?;
            return Err(CheckInError::AlreadyVisited);
        }

        let completion = ProgressTracker::evaluate_completion(
            &mut tx,
            request.user_id,
            request.route_id,
            self.rewards.completion_bonus,
        )
        .await?;

        let coins = User::fetch(&mut *tx, request.user_id)
            .await?
            .map(|u| u.coins)
            .unwrap_or_default();

        tx.commit().await?;

        let coins_awarded = if completion.newly_completed() {
            self.rewards.visit_coins + self.rewards.completion_bonus
        } else {
            self.rewards.visit_coins
        };

        info!(
            user_id = request.user_id,
            route_id = request.route_id,
            place_id = place.id,
            coins_awarded,
            coins,
            route_completed = completion.newly_completed(),
            "Place visited"
        );

        Ok(CheckInReceipt {
            coins_awarded,
            coins,
            route_completed: completion.newly_completed(),
        })
    }
}
