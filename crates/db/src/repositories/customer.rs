//! Customer repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use super::RepositoryError;
use crate::entities::{SoftDelete, customers, orders, soft_delete_where};

const ENTITY: &str = "customer";

/// Input for updating a customer or salesman.
///
/// The password is stored exactly as given; hashing is the caller's concern.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    /// Display name.
    pub name: Option<String>,
    /// Stored credential.
    pub password: Option<String>,
}

/// Customer repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    db: DatabaseConnection,
}

impl CustomerRepository {
    /// Creates a new customer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        name: &str,
        password: &str,
    ) -> Result<customers::Model, RepositoryError> {
        let now = chrono::Utc::now().into();
        let customer = customers::ActiveModel {
            name: Set(name.to_string()),
            password: Set(password.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        Ok(customer.insert(&self.db).await?)
    }

    /// Finds a live customer by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<customers::Model>, RepositoryError> {
        Ok(customers::Entity::find_active_by_id(id)
            .one(&self.db)
            .await?)
    }

    /// Updates a customer.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the customer is missing or deleted.
    pub async fn update(
        &self,
        id: i64,
        input: UpdateAccountInput,
    ) -> Result<customers::Model, RepositoryError> {
        let customer = self
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::not_found(ENTITY, id))?;

        let mut active: customers::ActiveModel = customer.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(password) = input.password {
            active.password = Set(password);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        customers::Entity::update(active)
            .filter(customers::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|err| RepositoryError::from_update(err, ENTITY, id))
    }

    /// Lists the live orders placed by a customer, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the customer is missing or deleted.
    pub async fn orders(&self, id: i64) -> Result<Vec<orders::Model>, RepositoryError> {
        let customer = self
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::not_found(ENTITY, id))?;

        Ok(customer
            .find_related(orders::Entity)
            .filter(orders::Column::DeletedAt.is_null())
            .order_by_asc(orders::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Soft-deletes a customer together with their orders.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the customer is missing or already deleted.
    pub async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        let marked =
            soft_delete_where::<customers::Entity, _, _>(&txn, customers::Column::Id.eq(id))
                .await?;
        if marked == 0 {
            return Err(RepositoryError::not_found(ENTITY, id));
        }

        let cascaded =
            soft_delete_where::<orders::Entity, _, _>(&txn, orders::Column::CustomerId.eq(id))
                .await?;

        txn.commit().await?;

        debug!(customer_id = id, cascaded, "Soft-deleted customer");
        Ok(())
    }

    /// Physically deletes a customer; their orders go with them via `ON DELETE CASCADE`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no row has this ID.
    pub async fn purge(&self, id: i64) -> Result<(), RepositoryError> {
        let result = customers::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found(ENTITY, id));
        }
        Ok(())
    }
}
