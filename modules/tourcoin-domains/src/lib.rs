//! Persistence models and the check-in subsystem.
//!
//! Catalog rows (categories, places, routes, stops) are owned by an external
//! admin process and only read here. Users, visit records and reviews are
//! written by this crate.

pub mod catalog;
pub mod checkin;
pub mod reviews;
pub mod users;

use sqlx::migrate::Migrator;
use sqlx::PgPool;

pub use catalog::{Category, Place, Route, RouteStop, RouteStopPlace};
pub use checkin::{
    CheckIn, CheckInError, CheckInReceipt, CheckInWorkflow, Completion, ProgressTracker,
    VisitLedger, VisitOutcome,
};
pub use reviews::RouteReview;
pub use users::User;

/// Embedded schema migrations. Every statement is create-if-absent.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply pending migrations.
pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}
