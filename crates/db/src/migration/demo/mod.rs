//! Migrations for the Author/Book sample tables.
//!
//! Kept apart from [`super::Migrator`] with its own history table so the
//! sample never mixes with the production schema.

use sea_orm_migration::prelude::*;

mod m20261016_000001_authors_books;

/// Migrator for the sample Author/Book tables.
pub struct DemoMigrator;

#[async_trait::async_trait]
impl MigratorTrait for DemoMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20261016_000001_authors_books::Migration)]
    }

    fn migration_table_name() -> DynIden {
        Alias::new("seaql_demo_migrations").into_iden()
    }
}
