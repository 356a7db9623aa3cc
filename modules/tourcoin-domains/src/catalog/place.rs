use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tourcoin_common::Coordinates;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Place {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Place {
    /// Stored position. Catalog rows are trusted, so no range check.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub async fn find_by_id(id: i64, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, category_id, name, latitude, longitude FROM places WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// All places belonging to any of the given categories.
    pub async fn find_by_categories(category_ids: &[i64], pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT id, category_id, name, latitude, longitude
            FROM places
            WHERE category_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(category_ids)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
