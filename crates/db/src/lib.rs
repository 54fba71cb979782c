//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the sales schema
//! - Repository abstractions for data access
//! - Database migrations
//! - The pooled connection initializer

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    AuthorRepository, CategoryRepository, CustomerRepository, OrderRepository, ProductRepository,
    RepositoryError, SalesmanRepository,
};

use salesdb_shared::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::{info, warn};

/// Establishes a connection to the database from a URL with driver defaults.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_url(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Opens the connection pool described by `config`.
///
/// Pool size and timeouts come from the configuration. A failed open is
/// retried `open_retries` times with linear backoff; the last error is
/// returned unchanged.
///
/// # Errors
///
/// Returns an error if the URL cannot be built or every open attempt fails.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let url = config
        .connection_url()
        .map_err(|e| DbErr::Custom(e.to_string()))?;

    let mut options = ConnectOptions::new(url);
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.connect_timeout())
        .acquire_timeout(config.acquire_timeout())
        .sqlx_logging(config.sqlx_logging);

    let mut attempt = 0;
    loop {
        match Database::connect(options.clone()).await {
            Ok(db) => {
                info!(dsn = %config.redacted_dsn(), attempt, "Database pool opened");
                return Ok(db);
            }
            Err(err) if attempt < config.open_retries => {
                attempt += 1;
                let delay = config.retry_backoff(attempt);
                warn!(
                    error = %err,
                    attempt,
                    retries = config.open_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    "Database open failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
