//! Apply or inspect the embedded Tourcoin schema migrations.

use std::collections::HashSet;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tourcoin_domains::MIGRATOR;

#[derive(Parser)]
#[command(name = "tourcoin-migrate")]
#[command(about = "Manage the Tourcoin database schema")]
#[command(version)]
struct Cli {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run pending migrations
    Run,
    /// Show which migrations are applied
    Status,
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = runtime.block_on(run(cli)) {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run(cli: Cli) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&cli.database_url)
        .await?;

    match cli.command {
        Commands::Run => {
            MIGRATOR.run(&pool).await?;
            info!("Migrations complete");
        }
        Commands::Status => {
            let applied = applied_versions(&pool).await?;
            let embedded: Vec<(i64, String)> = MIGRATOR
                .iter()
                .filter(|m| !m.migration_type.is_down_migration())
                .map(|m| (m.version, m.description.to_string()))
                .collect();
            for line in status_lines(&embedded, &applied) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

async fn applied_versions(pool: &PgPool) -> Result<HashSet<i64>> {
    let has_table: bool =
        sqlx::query_scalar("SELECT to_regclass('_sqlx_migrations') IS NOT NULL")
            .fetch_one(pool)
            .await?;
    if !has_table {
        return Ok(HashSet::new());
    }

    let versions = sqlx::query_scalar::<_, i64>("SELECT version FROM _sqlx_migrations WHERE success")
        .fetch_all(pool)
        .await?;
    Ok(versions.into_iter().collect())
}

fn status_lines(embedded: &[(i64, String)], applied: &HashSet<i64>) -> Vec<String> {
    embedded
        .iter()
        .map(|(version, description)| {
            let mark = if applied.contains(version) { "applied" } else { "pending" };
            format!("{version} {description} ({mark})")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_pending_and_applied() {
        let embedded = vec![
            (20250101000001, "catalog".to_string()),
            (20250101000002, "progress".to_string()),
        ];
        let applied: HashSet<i64> = [20250101000001].into_iter().collect();

        assert_eq!(
            status_lines(&embedded, &applied),
            vec![
                "20250101000001 catalog (applied)".to_string(),
                "20250101000002 progress (pending)".to_string(),
            ]
        );
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from([
            "tourcoin-migrate",
            "--database-url",
            "postgres://localhost/tourcoin",
            "status",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Status));
        assert_eq!(cli.database_url, "postgres://localhost/tourcoin");
    }
}
