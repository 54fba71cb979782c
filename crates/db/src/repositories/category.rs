//! Category repository for database operations.

use salesdb_shared::types::{PageRequest, PageResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

use super::RepositoryError;
use crate::entities::{SoftDelete, categories, products, soft_delete_where};

const ENTITY: &str = "category";

/// Category repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new category.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the name is already taken, including by
    /// a soft-deleted category.
    pub async fn create(&self, name: &str) -> Result<categories::Model, RepositoryError> {
        let now = chrono::Utc::now().into();
        let category = categories::ActiveModel {
            name: Set(name.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        Ok(category.insert(&self.db).await?)
    }

    /// Finds a live category by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<categories::Model>, RepositoryError> {
        Ok(categories::Entity::find_active_by_id(id)
            .one(&self.db)
            .await?)
    }

    /// Finds a live category by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<categories::Model>, RepositoryError> {
        Ok(categories::Entity::find_active()
            .filter(categories::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    /// Lists live categories ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        page: PageRequest,
    ) -> Result<PageResponse<categories::Model>, RepositoryError> {
        let query = categories::Entity::find_active().order_by_asc(categories::Column::Name);

        let total = query.clone().count(&self.db).await?;
        let data = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(data, page, total))
    }

    /// Renames a category.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the category is missing or deleted, and
    /// `UniqueViolation` if the new name is taken.
    pub async fn rename(&self, id: i64, name: &str) -> Result<categories::Model, RepositoryError> {
        let category = self
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::not_found(ENTITY, id))?;

        let mut active: categories::ActiveModel = category.into();
        active.name = Set(name.to_string());
        active.updated_at = Set(chrono::Utc::now().into());

        categories::Entity::update(active)
            .filter(categories::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|err| RepositoryError::from_update(err, ENTITY, id))
    }

    /// Lists the live products of a category.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the category is missing or deleted.
    pub async fn products(&self, id: i64) -> Result<Vec<products::Model>, RepositoryError> {
        let category = self
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::not_found(ENTITY, id))?;

        Ok(category
            .find_related(products::Entity)
            .filter(products::Column::DeletedAt.is_null())
            .order_by_asc(products::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Soft-deletes a category together with its products.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the category is missing or already deleted.
    pub async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        let marked =
            soft_delete_where::<categories::Entity, _, _>(&txn, categories::Column::Id.eq(id))
                .await?;
        if marked == 0 {
            return Err(RepositoryError::not_found(ENTITY, id));
        }

        let cascaded =
            soft_delete_where::<products::Entity, _, _>(&txn, products::Column::CategoryId.eq(id))
                .await?;

        txn.commit().await?;

        debug!(category_id = id, cascaded, "Soft-deleted category");
        Ok(())
    }

    /// Physically deletes a category; its products go with it via `ON DELETE CASCADE`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no row has this ID.
    pub async fn purge(&self, id: i64) -> Result<(), RepositoryError> {
        let result = categories::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found(ENTITY, id));
        }
        Ok(())
    }
}
