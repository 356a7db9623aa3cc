use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::rest;
use crate::AppState;

pub fn build_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    let cors = if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/health", get(health))
        // Catalog
        .route("/categories", get(rest::api_categories))
        .route("/categories/{id}", get(rest::api_category_detail))
        .route("/places/search", post(rest::api_search_places))
        .route("/routes", get(rest::api_routes))
        .route("/routes/{route_id}", get(rest::api_route_detail))
        // Reviews
        .route(
            "/routes/{route_id}/reviews",
            get(rest::reviews::api_route_reviews).post(rest::reviews::api_add_route_review),
        )
        // Check-in
        .route(
            "/routes/{route_id}/{order_id}/check-in",
            post(rest::checkin::api_check_in),
        )
        // Users
        .route("/users/{user_id}/coins", get(rest::users::api_user_coins))
        .route(
            "/users/{user_id}/visited-places/{route_id}",
            get(rest::users::api_user_visited_places),
        )
        .with_state(state)
        .layer(cors)
        // Logging layer: method + path + status + latency
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}

async fn health() -> &'static str {
    "ok"
}
