use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

/// A player. Created lazily by the first successful check-in.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub coins: i64,
    /// Set once the user has covered every stop of any route.
    pub visited_route: bool,
}

impl User {
    pub async fn find_by_id(id: i64, pool: &PgPool) -> Result<Option<Self>> {
        Self::fetch(pool, id).await
    }

    pub(crate) async fn fetch<'e, E>(executor: E, id: i64) -> Result<Option<Self>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Self>("SELECT id, coins, visited_route FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(Into::into)
    }
}
