//! Integration tests for opening the connection pool.

mod common;

use salesdb_shared::DatabaseConfig;
use sea_orm::ConnectionTrait;

#[tokio::test]
async fn test_connect_with_valid_descriptor() {
    let config = DatabaseConfig {
        url: Some(common::get_database_url()),
        max_connections: 2,
        min_connections: 1,
        ..Default::default()
    };

    let db = salesdb_db::connect(&config)
        .await
        .expect("Failed to connect to database");

    db.execute_unprepared("SELECT 1")
        .await
        .expect("Connection should be usable");
    db.close().await.expect("Failed to close pool");
}

#[tokio::test]
async fn test_connect_with_invalid_host_fails_after_retries() {
    let config = DatabaseConfig {
        host: "salesdb-nonexistent.invalid".to_string(),
        connect_timeout_secs: 2,
        acquire_timeout_secs: 2,
        open_retries: 2,
        retry_backoff_ms: 10,
        ..Default::default()
    };

    let started = std::time::Instant::now();
    let result = salesdb_db::connect(&config).await;

    assert!(result.is_err());
    // Two retries sleep 10ms and 20ms.
    assert!(started.elapsed() >= std::time::Duration::from_millis(30));
}
