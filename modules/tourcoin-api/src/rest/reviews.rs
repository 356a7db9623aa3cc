use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tourcoin_domains::{Route, RouteReview};
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

const EMPTY_REVIEW: &str = "Review text and user id must not be empty";

#[derive(Deserialize)]
pub struct ReviewRequest {
    review_text: Option<String>,
    user_id: Option<i64>,
}

impl ReviewRequest {
    /// Text (trimmed) and author, or `None` if either is missing, blank or zero.
    fn validated(self) -> Option<(String, i64)> {
        let text = self.review_text?.trim().to_string();
        if text.is_empty() {
            return None;
        }
        let user_id = self.user_id.filter(|&id| id != 0)?;
        Some((text, user_id))
    }
}

/// `GET /routes/{route_id}/reviews`
pub async fn api_route_reviews(
    State(state): State<Arc<AppState>>,
    Path(route_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let reviews = RouteReview::find_by_route(route_id, &state.pool).await?;
    let body: Vec<serde_json::Value> = reviews
        .iter()
        .map(|r| {
            serde_json::json!({
                "id": r.id,
                "review_text": r.review_text,
                "user_id": r.user_id,
            })
        })
        .collect();
    Ok(Json(body))
}

/// `POST /routes/{route_id}/reviews`
pub async fn api_add_route_review(
    State(state): State<Arc<AppState>>,
    Path(route_id): Path<i64>,
    body: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let (text, user_id) = body
        .validated()
        .ok_or_else(|| ApiError::bad_request(EMPTY_REVIEW))?;

    if Route::find_by_id(route_id, &state.pool).await?.is_none() {
        return Err(ApiError::not_found("Route not found"));
    }

    let review = RouteReview::create(route_id, user_id, &text, &state.pool).await?;
    info!(review_id = review.id, route_id, user_id, "Review added");

    Ok(Json(serde_json::json!({ "success": "Review added" })))
}
