use std::collections::HashSet;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Route {
    pub id: i64,
    pub name: String,
}

impl Route {
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT id, name FROM routes ORDER BY id")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id(id: i64, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT id, name FROM routes WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }
}

/// A positioned reference to a place within a route.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RouteStop {
    pub id: i64,
    pub route_id: i64,
    pub place_id: i64,
    #[sqlx(rename = "stop_order")]
    pub order: i32,
}

impl RouteStop {
    /// The stop at `order` within `route_id`, if any. Order is unique per route.
    pub async fn find_by_order(route_id: i64, order: i32, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT id, route_id, place_id, stop_order
            FROM route_stops
            WHERE route_id = $1 AND stop_order = $2
            "#,
        )
        .bind(route_id)
        .bind(order)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Distinct places a user must visit to cover the route.
    pub async fn place_ids_for_route<'e, E>(executor: E, route_id: i64) -> Result<HashSet<i64>>
    where
        E: PgExecutor<'e>,
    {
        let ids = sqlx::query_scalar::<_, i64>("SELECT place_id FROM route_stops WHERE route_id = $1")
            .bind(route_id)
            .fetch_all(executor)
            .await?;

        Ok(ids.into_iter().collect())
    }
}

/// A stop joined with its place, for route listings.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RouteStopPlace {
    pub stop_id: i64,
    pub route_id: i64,
    pub stop_order: i32,
    pub place_id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl RouteStopPlace {
    pub async fn find_for_route(route_id: i64, pool: &PgPool) -> Result<Vec<Self>> {
        Self::find_for_routes(&[route_id], pool).await
    }

    /// Stops of every given route, ordered by route then stop order.
    pub async fn find_for_routes(route_ids: &[i64], pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT s.id AS stop_id, s.route_id, s.stop_order, p.id AS place_id,
                   p.name, p.latitude, p.longitude
            FROM route_stops s
            JOIN places p ON p.id = s.place_id
            WHERE s.route_id = ANY($1)
            ORDER BY s.route_id, s.stop_order
            "#,
        )
        .bind(route_ids)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
