use std::sync::Arc;

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tourcoin_common::AppConfig;
use tourcoin_domains::CheckInWorkflow;

mod error;
mod rest;
mod routes;

pub struct AppState {
    pub pool: PgPool,
    pub checkin: CheckInWorkflow,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = AppConfig::from_env()?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;
    info!("Connected to database");

    tourcoin_domains::migrate(&pool).await?;
    info!("Migrations complete");

    let state = Arc::new(AppState {
        checkin: CheckInWorkflow::new(pool.clone(), config.proximity, config.rewards),
        pool,
    });

    let app = routes::build_router(state, &config.allowed_origins);

    let addr = config.bind_addr();
    info!(
        threshold_km = config.proximity.threshold_km,
        visit_coins = config.rewards.visit_coins,
        completion_bonus = config.rewards.completion_bonus,
        "Tourcoin API starting on {addr}"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
