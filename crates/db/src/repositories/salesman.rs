//! Salesman repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use super::{RepositoryError, UpdateAccountInput};
use crate::entities::{SoftDelete, orders, salesmen, soft_delete_where};

const ENTITY: &str = "salesman";

/// Salesman repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct SalesmanRepository {
    db: DatabaseConnection,
}

impl SalesmanRepository {
    /// Creates a new salesman repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new salesman.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        name: &str,
        password: &str,
    ) -> Result<salesmen::Model, RepositoryError> {
        let now = chrono::Utc::now().into();
        let salesman = salesmen::ActiveModel {
            name: Set(name.to_string()),
            password: Set(password.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        Ok(salesman.insert(&self.db).await?)
    }

    /// Finds a live salesman by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<salesmen::Model>, RepositoryError> {
        Ok(salesmen::Entity::find_active_by_id(id)
            .one(&self.db)
            .await?)
    }

    /// Updates a salesman.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the salesman is missing or deleted.
    pub async fn update(
        &self,
        id: i64,
        input: UpdateAccountInput,
    ) -> Result<salesmen::Model, RepositoryError> {
        let salesman = self
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::not_found(ENTITY, id))?;

        let mut active: salesmen::ActiveModel = salesman.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(password) = input.password {
            active.password = Set(password);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        salesmen::Entity::update(active)
            .filter(salesmen::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|err| RepositoryError::from_update(err, ENTITY, id))
    }

    /// Lists the live orders taken by a salesman, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the salesman is missing or deleted.
    pub async fn orders(&self, id: i64) -> Result<Vec<orders::Model>, RepositoryError> {
        let salesman = self
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::not_found(ENTITY, id))?;

        Ok(salesman
            .find_related(orders::Entity)
            .filter(orders::Column::DeletedAt.is_null())
            .order_by_asc(orders::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Soft-deletes a salesman together with their orders.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the salesman is missing or already deleted.
    pub async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        let marked =
            soft_delete_where::<salesmen::Entity, _, _>(&txn, salesmen::Column::Id.eq(id))
                .await?;
        if marked == 0 {
            return Err(RepositoryError::not_found(ENTITY, id));
        }

        let cascaded =
            soft_delete_where::<orders::Entity, _, _>(&txn, orders::Column::SalesmanId.eq(id))
                .await?;

        txn.commit().await?;

        debug!(salesman_id = id, cascaded, "Soft-deleted salesman");
        Ok(())
    }

    /// Physically deletes a salesman; their orders go with them via `ON DELETE CASCADE`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no row has this ID.
    pub async fn purge(&self, id: i64) -> Result<(), RepositoryError> {
        let result = salesmen::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found(ENTITY, id));
        }
        Ok(())
    }
}
