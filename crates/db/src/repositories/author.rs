//! Repository for the demo Author/Book tables.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::RepositoryError;
use crate::entities::SoftDelete;
use crate::entities::demo::{authors, books};

/// Author/Book repository.
#[derive(Debug, Clone)]
pub struct AuthorRepository {
    db: DatabaseConnection,
}

impl AuthorRepository {
    /// Creates a new author repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an author.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_author(&self, name: &str) -> Result<authors::Model, RepositoryError> {
        let now = chrono::Utc::now().into();
        let author = authors::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        Ok(author.insert(&self.db).await?)
    }

    /// Creates a book, optionally written by `author_id`.
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyViolation` if the author does not exist.
    pub async fn create_book(
        &self,
        title: &str,
        author_id: Option<i64>,
    ) -> Result<books::Model, RepositoryError> {
        let now = chrono::Utc::now().into();
        let book = books::ActiveModel {
            title: Set(title.to_string()),
            author_id: Set(author_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        Ok(book.insert(&self.db).await?)
    }

    /// Finds a live book by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_book(&self, id: i64) -> Result<Option<books::Model>, RepositoryError> {
        Ok(books::Entity::find_active_by_id(id).one(&self.db).await?)
    }

    /// Lists the live books of an author.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn books_by_author(
        &self,
        author_id: i64,
    ) -> Result<Vec<books::Model>, RepositoryError> {
        Ok(books::Entity::find_active()
            .filter(books::Column::AuthorId.eq(author_id))
            .order_by_asc(books::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Physically deletes an author. Their books remain with `author_id` cleared.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no row has this ID.
    pub async fn delete_author(&self, id: i64) -> Result<(), RepositoryError> {
        let result = authors::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("author", id));
        }
        Ok(())
    }
}
