use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tourcoin_common::Coordinates;
use tourcoin_domains::CheckIn;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    #[serde(rename = "userId")]
    user_id: i64,
    latitude: f64,
    longitude: f64,
}

impl CheckInRequest {
    fn into_check_in(self, route_id: i64, order: i32) -> Result<CheckIn, ApiError> {
        let position = Coordinates::new(self.latitude, self.longitude)?;
        Ok(CheckIn {
            route_id,
            order,
            user_id: self.user_id,
            position,
        })
    }
}

/// `POST /routes/{route_id}/{order_id}/check-in`
pub async fn api_check_in(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(i64, i32)>, PathRejection>,
    body: Result<Json<CheckInRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path((route_id, order_id)) = path?;
    let Json(body) = body?;
    let request = body.into_check_in(route_id, order_id)?;

    let receipt = state.checkin.check_in(request).await?;

    Ok(Json(serde_json::json!({
        "success": "Place successfully visited!",
        "coins_awarded": receipt.coins_awarded,
        "coins": receipt.coins,
        "route_completed": receipt.route_completed,
    })))
}
