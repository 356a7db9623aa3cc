use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tourcoin_domains::{User, VisitLedger};

use crate::error::ApiError;
use crate::AppState;

/// `GET /users/{user_id}/coins`. Unknown users answer 404 with a zero balance.
pub async fn api_user_coins(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Response, ApiError> {
    let response = match User::find_by_id(user_id, &state.pool).await? {
        Some(user) => Json(serde_json::json!({ "user_id": user.id, "coins": user.coins })).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "user_id": user_id, "coins": 0 })),
        )
            .into_response(),
    };
    Ok(response)
}

/// `GET /users/{user_id}/visited-places/{route_id}`
pub async fn api_user_visited_places(
    State(state): State<Arc<AppState>>,
    Path((user_id, route_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, ApiError> {
    let mut place_ids: Vec<i64> = VisitLedger::visited_places(&state.pool, user_id, route_id)
        .await?
        .into_iter()
        .collect();
    place_ids.sort_unstable();

    let body: Vec<serde_json::Value> = place_ids
        .into_iter()
        .map(|place_id| serde_json::json!({ "place_id": place_id }))
        .collect();
    Ok(Json(body))
}
