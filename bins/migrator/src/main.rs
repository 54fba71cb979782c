//! Database migration runner for the sales schema.
//!
//! Usage:
//!   migrator up       - Run all pending migrations
//!   migrator down     - Rollback last migration
//!   migrator status   - Show migration status
//!   migrator fresh    - Drop all tables and re-run migrations
//!   migrator refresh  - Rollback all migrations, then re-apply them
//!   migrator reset    - Rollback all migrations
//!
//! The connection comes from `DATABASE_URL`. The demo Author/Book tables are
//! not managed here; the seeder applies them.

use salesdb_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Run the migrator CLI (it sets up its own tracing)
    cli::run_cli(Migrator).await;
}
