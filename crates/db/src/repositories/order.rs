//! Order repository for database operations.
//!
//! Orders link a salesman and a customer, and reference any number of
//! products through the `product_orders` association table.

use std::collections::BTreeSet;

use salesdb_shared::types::{PageRequest, PageResponse};
use sea_orm::sea_query::{OnConflict, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

use super::RepositoryError;
use crate::entities::{SoftDelete, orders, product_orders, products, soft_delete_where};

const ENTITY: &str = "order";

/// Order repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    db: DatabaseConnection,
}

impl OrderRepository {
    /// Creates a new order repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an order for a salesman and a customer.
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyViolation` if either party does not exist.
    pub async fn create(
        &self,
        salesman_id: i64,
        customer_id: i64,
    ) -> Result<orders::Model, RepositoryError> {
        Ok(insert_order(&self.db, salesman_id, customer_id).await?)
    }

    /// Creates an order and links it to `product_ids` in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyViolation` if a party or product does not exist;
    /// nothing is written in that case.
    pub async fn create_with_products(
        &self,
        salesman_id: i64,
        customer_id: i64,
        product_ids: &[i64],
    ) -> Result<orders::Model, RepositoryError> {
        let txn = self.db.begin().await?;

        let order = insert_order(&txn, salesman_id, customer_id).await?;
        let linked = link_products(&txn, order.id, product_ids).await?;

        txn.commit().await?;

        debug!(order_id = order.id, linked, "Created order with products");
        Ok(order)
    }

    /// Finds a live order by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<orders::Model>, RepositoryError> {
        Ok(orders::Entity::find_active_by_id(id).one(&self.db).await?)
    }

    /// Loads an order together with its live products, ordered by product ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the order is missing or deleted.
    pub async fn find_with_products(
        &self,
        id: i64,
    ) -> Result<(orders::Model, Vec<products::Model>), RepositoryError> {
        let order = self
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::not_found(ENTITY, id))?;

        let products = order
            .find_related(products::Entity)
            .filter(products::Column::DeletedAt.is_null())
            .order_by_asc(products::Column::Id)
            .all(&self.db)
            .await?;

        Ok((order, products))
    }

    /// Links products to an order.
    ///
    /// Repeated IDs and pairs that already exist are ignored. Returns the
    /// number of links actually added.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the order is missing or deleted, and
    /// `ForeignKeyViolation` if a product does not exist.
    pub async fn attach_products(
        &self,
        id: i64,
        product_ids: &[i64],
    ) -> Result<u64, RepositoryError> {
        if self.find_by_id(id).await?.is_none() {
            return Err(RepositoryError::not_found(ENTITY, id));
        }

        Ok(link_products(&self.db, id, product_ids).await?)
    }

    /// Removes product links from an order. Returns the number of links removed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the order is missing or deleted.
    pub async fn detach_products(
        &self,
        id: i64,
        product_ids: &[i64],
    ) -> Result<u64, RepositoryError> {
        if self.find_by_id(id).await?.is_none() {
            return Err(RepositoryError::not_found(ENTITY, id));
        }
        if product_ids.is_empty() {
            return Ok(0);
        }

        let result = product_orders::Entity::delete_many()
            .filter(product_orders::Column::OrderId.eq(id))
            .filter(product_orders::Column::ProductId.is_in(product_ids.iter().copied()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Lists live orders handled by a salesman, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_salesman(
        &self,
        salesman_id: i64,
        page: PageRequest,
    ) -> Result<PageResponse<orders::Model>, RepositoryError> {
        self.list_where(orders::Column::SalesmanId.eq(salesman_id), page)
            .await
    }

    /// Lists live orders placed by a customer, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_customer(
        &self,
        customer_id: i64,
        page: PageRequest,
    ) -> Result<PageResponse<orders::Model>, RepositoryError> {
        self.list_where(orders::Column::CustomerId.eq(customer_id), page)
            .await
    }

    async fn list_where(
        &self,
        condition: SimpleExpr,
        page: PageRequest,
    ) -> Result<PageResponse<orders::Model>, RepositoryError> {
        let query = orders::Entity::find_active()
            .filter(condition)
            .order_by_asc(orders::Column::Id);

        let total = query.clone().count(&self.db).await?;
        let data = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(data, page, total))
    }

    /// Soft-deletes an order. Its product links are kept.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the order is missing or already deleted.
    pub async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError> {
        let marked =
            soft_delete_where::<orders::Entity, _, _>(&self.db, orders::Column::Id.eq(id)).await?;
        if marked == 0 {
            return Err(RepositoryError::not_found(ENTITY, id));
        }
        Ok(())
    }

    /// Physically deletes an order and, by cascade, its product links.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no row has this ID.
    pub async fn purge(&self, id: i64) -> Result<(), RepositoryError> {
        let result = orders::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found(ENTITY, id));
        }
        Ok(())
    }
}

async fn insert_order<C: ConnectionTrait>(
    db: &C,
    salesman_id: i64,
    customer_id: i64,
) -> Result<orders::Model, DbErr> {
    let now = chrono::Utc::now().into();
    let order = orders::ActiveModel {
        salesman_id: Set(salesman_id),
        customer_id: Set(customer_id),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
        ..Default::default()
    };

    order.insert(db).await
}

/// Inserts `(product, order)` pairs, skipping repeats and existing links.
async fn link_products<C: ConnectionTrait>(
    db: &C,
    order_id: i64,
    product_ids: &[i64],
) -> Result<u64, DbErr> {
    let unique: BTreeSet<i64> = product_ids.iter().copied().collect();
    if unique.is_empty() {
        return Ok(0);
    }

    let links = unique.into_iter().map(|product_id| product_orders::ActiveModel {
        product_id: Set(product_id),
        order_id: Set(order_id),
    });

    product_orders::Entity::insert_many(links)
        .on_conflict(
            OnConflict::columns([
                product_orders::Column::ProductId,
                product_orders::Column::OrderId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(db)
        .await
}
