use thiserror::Error;

/// Terminal failure of a single check-in. Nothing is committed on any of these.
#[derive(Error, Debug)]
pub enum CheckInError {
    #[error("Invalid route_id or order_id")]
    StopNotFound,

    #[error("Place not found")]
    PlaceNotFound,

    #[error("You are outside the proximity of the place or do not belong to the route")]
    TooFar { distance_km: f64 },

    #[error("Place in the current route has already been visited")]
    AlreadyVisited,

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}
