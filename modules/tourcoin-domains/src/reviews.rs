use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RouteReview {
    pub id: i64,
    pub route_id: i64,
    pub user_id: i64,
    pub review_text: String,
    pub created_at: DateTime<Utc>,
}

impl RouteReview {
    pub async fn create(route_id: i64, user_id: i64, review_text: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO route_reviews (route_id, user_id, review_text)
            VALUES ($1, $2, $3)
            RETURNING id, route_id, user_id, review_text, created_at
            "#,
        )
        .bind(route_id)
        .bind(user_id)
        .bind(review_text)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_route(route_id: i64, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT id, route_id, user_id, review_text, created_at
            FROM route_reviews
            WHERE route_id = $1
            ORDER BY id
            "#,
        )
        .bind(route_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
