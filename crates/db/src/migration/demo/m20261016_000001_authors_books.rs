//! Author/Book sample tables.
//!
//! Deleting an author keeps its books and clears `books.author_id`.

use sea_orm_migration::prelude::*;

use crate::migration::{Base, base_table, deleted_at_index};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(authors_table()).await?;
        manager.create_table(books_table()).await?;
        manager.create_index(deleted_at_index(Authors::Table)).await?;
        manager.create_index(deleted_at_index(Books::Table)).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Books::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Authors::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Authors {
    Table,
    Name,
}

#[derive(DeriveIden)]
enum Books {
    Table,
    Title,
    AuthorId,
}

fn authors_table() -> TableCreateStatement {
    base_table(Authors::Table)
        .col(ColumnDef::new(Authors::Name).string().not_null().default(""))
        .to_owned()
}

fn books_table() -> TableCreateStatement {
    base_table(Books::Table)
        .col(ColumnDef::new(Books::Title).string().not_null().default(""))
        .col(ColumnDef::new(Books::AuthorId).big_integer().null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_books_author")
                .from(Books::Table, Books::AuthorId)
                .to(Authors::Table, Base::Id)
                .on_update(ForeignKeyAction::Cascade)
                .on_delete(ForeignKeyAction::SetNull),
        )
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_books_set_null_on_author_delete() {
        let sql = books_table().to_string(PostgresQueryBuilder);
        assert!(sql.contains(r#"REFERENCES "authors" ("id")"#));
        assert!(sql.contains("ON DELETE SET NULL"));
        assert!(sql.contains("ON UPDATE CASCADE"));
    }
}
