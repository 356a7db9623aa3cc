use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tourcoin_common::TourcoinError;
use tourcoin_domains::CheckInError;
use tracing::warn;

/// 452: the user is not close enough to the stop's place.
pub fn too_far_status() -> StatusCode {
    StatusCode::from_u16(452).unwrap_or(StatusCode::FORBIDDEN)
}

/// An error rendered as `{"error": "..."}` with a status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Unexpected failure; the message is surfaced to the caller verbatim.
    pub fn internal(err: impl std::fmt::Display) -> Self {
        warn!(error = %err, "Request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<TourcoinError> for ApiError {
    fn from(err: TourcoinError) -> Self {
        match err {
            TourcoinError::Validation(msg) => Self::bad_request(msg),
            TourcoinError::Config(_) => Self::internal(err),
        }
    }
}

impl From<CheckInError> for ApiError {
    fn from(err: CheckInError) -> Self {
        match err {
            CheckInError::StopNotFound | CheckInError::PlaceNotFound => {
                Self::not_found(err.to_string())
            }
            CheckInError::TooFar { .. } => Self::new(too_far_status(), err.to_string()),
            CheckInError::AlreadyVisited => {
                Self::new(StatusCode::UNAVAILABLE_FOR_LEGAL_REASONS, err.to_string())
            }
            CheckInError::Database(_) | CheckInError::Unexpected(_) => Self::internal(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_in_errors_map_to_distinct_statuses() {
        let cases = [
            (CheckInError::StopNotFound, 404, "Invalid route_id or order_id"),
            (CheckInError::PlaceNotFound, 404, "Place not found"),
            (
                CheckInError::TooFar { distance_km: 1.5 },
                452,
                "You are outside the proximity of the place or do not belong to the route",
            ),
            (
                CheckInError::AlreadyVisited,
                451,
                "Place in the current route has already been visited",
            ),
        ];

        for (err, status, message) in cases {
            let api = ApiError::from(err);
            assert_eq!(api.status.as_u16(), status);
            assert_eq!(api.message, message);
        }
    }

    #[test]
    fn unexpected_errors_surface_their_message() {
        let api = ApiError::from(CheckInError::Unexpected(anyhow::anyhow!("disk on fire")));
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "disk on fire");

        let api = ApiError::from(CheckInError::Database(sqlx::Error::RowNotFound));
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.message.is_empty());
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        let api = ApiError::from(TourcoinError::Validation("latitude out of range".into()));
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.message, "latitude out of range");
    }
}
