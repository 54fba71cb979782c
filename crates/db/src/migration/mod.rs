//! Database migrations.
//!
//! Migrations are managed using sea-orm-migration. Tables are declared with
//! `sea_query` builders so every column, constraint and cascade action is
//! spelled out explicitly.

pub use sea_orm_migration::prelude::*;

pub mod demo;
mod m20261016_000001_sales_schema;

/// Migrator for running database migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20261016_000001_sales_schema::Migration)]
    }
}

/// Base-model columns present on every entity table.
#[derive(DeriveIden)]
pub(crate) enum Base {
    Id,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

/// Starts a `CREATE TABLE` with the base-model columns already declared.
pub(crate) fn base_table<T>(table: T) -> TableCreateStatement
where
    T: IntoIden + 'static,
{
    Table::create()
        .table(table)
        .if_not_exists()
        .col(
            ColumnDef::new(Base::Id)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(
            ColumnDef::new(Base::CreatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(Base::UpdatedAt)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(ColumnDef::new(Base::DeletedAt).timestamp_with_time_zone().null())
        .to_owned()
}

/// Index on `deleted_at`, named `idx_<table>_deleted_at`.
pub(crate) fn deleted_at_index<T>(table: T) -> IndexCreateStatement
where
    T: Iden + 'static,
{
    Index::create()
        .name(format!("idx_{}_deleted_at", Iden::to_string(&table)))
        .table(table)
        .col(Base::DeletedAt)
        .if_not_exists()
        .to_owned()
}
