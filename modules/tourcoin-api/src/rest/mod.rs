pub mod checkin;
pub mod reviews;
pub mod users;

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tourcoin_domains::{Category, Place, Route, RouteStopPlace};

use crate::error::ApiError;
use crate::AppState;

// --- Request bodies ---

#[derive(Deserialize)]
pub struct PlaceSearchRequest {
    #[serde(default)]
    categories: Vec<i64>,
}

// --- Helpers ---

/// Group listing rows by route, keeping stop order within each route.
fn stops_by_route(stops: Vec<RouteStopPlace>) -> BTreeMap<i64, Vec<RouteStopPlace>> {
    let mut grouped: BTreeMap<i64, Vec<RouteStopPlace>> = BTreeMap::new();
    for stop in stops {
        grouped.entry(stop.route_id).or_default().push(stop);
    }
    grouped
}

// --- Handlers ---

pub async fn api_categories(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = Category::find_all(&state.pool).await?;
    let body: Vec<serde_json::Value> = categories
        .iter()
        .map(|c| serde_json::json!({ "id": c.id, "name": c.name }))
        .collect();
    Ok(Json(body))
}

pub async fn api_category_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    match Category::find_by_id(id, &state.pool).await? {
        Some(c) => Ok(Json(serde_json::json!({ "id": c.id, "name": c.name }))),
        None => Err(ApiError::not_found("Category not found")),
    }
}

pub async fn api_search_places(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PlaceSearchRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Ok(Json(body)) = body else {
        return Err(ApiError::bad_request("Invalid search parameters"));
    };
    if body.categories.is_empty() {
        return Err(ApiError::bad_request("Invalid search parameters"));
    }

    let places = Place::find_by_categories(&body.categories, &state.pool).await?;
    Ok(Json(places))
}

pub async fn api_routes(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let routes = Route::find_all(&state.pool).await?;
    let route_ids: Vec<i64> = routes.iter().map(|r| r.id).collect();
    let mut stops = stops_by_route(RouteStopPlace::find_for_routes(&route_ids, &state.pool).await?);

    let body: Vec<serde_json::Value> = routes
        .iter()
        .map(|route| {
            let places: Vec<serde_json::Value> = stops
                .remove(&route.id)
                .unwrap_or_default()
                .iter()
                .map(|s| serde_json::json!({ "id": s.stop_id, "name": s.name }))
                .collect();
            serde_json::json!({ "id": route.id, "name": route.name, "places": places })
        })
        .collect();

    Ok(Json(body))
}

pub async fn api_route_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(route) = Route::find_by_id(id, &state.pool).await? else {
        return Err(ApiError::not_found("Route not found"));
    };

    let places: Vec<serde_json::Value> = RouteStopPlace::find_for_route(route.id, &state.pool)
        .await?
        .iter()
        .map(|s| {
            serde_json::json!({
                "id": s.stop_id,
                "name": s.name,
                "latitude": s.latitude,
                "longitude": s.longitude,
            })
        })
        .collect();

    Ok(Json(serde_json::json!({
        "id": route.id,
        "name": route.name,
        "places": places,
    })))
}
