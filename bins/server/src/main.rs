//! SalesDB entry point.
//!
//! Loads configuration, opens the connection pool, optionally applies
//! pending migrations and prints the resulting handle.

use salesdb_db::migration::Migrator;
use salesdb_shared::{AppConfig, AppError, AppResult, LoggingConfig};
use sea_orm_migration::MigratorTrait;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config.logging)?;

    let db = match salesdb_db::connect(&config.database).await {
        Ok(db) => db,
        Err(err) => {
            error!(error = %err, dsn = %config.database.redacted_dsn(), "Failed to open database");
            return Err(err.into());
        }
    };

    if config.database.auto_migrate {
        Migrator::up(&db, None).await?;
        info!("Migrations applied");
    }

    println!("{db:?}");

    db.close().await?;
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> AppResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    installed.map_err(|e| AppError::Internal(format!("tracing subscriber: {e}")))
}
