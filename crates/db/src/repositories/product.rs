//! Product repository for database operations.

use salesdb_shared::types::{PageRequest, PageResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::RepositoryError;
use crate::entities::{SoftDelete, products, soft_delete_where};

const ENTITY: &str = "product";

/// Input for creating a product.
#[derive(Debug, Clone, Default)]
pub struct CreateProductInput {
    /// Product name.
    pub name: String,
    /// Unit price in minor currency units.
    pub price: i64,
    /// Units in stock.
    pub stock: i64,
    /// Image reference (path or URL).
    pub image: String,
    /// Free-form description.
    pub description: String,
    /// Owning category.
    pub category_id: Option<i64>,
}

/// Input for updating a product.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    /// Product name.
    pub name: Option<String>,
    /// Unit price.
    pub price: Option<i64>,
    /// Units in stock.
    pub stock: Option<i64>,
    /// Image reference.
    pub image: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Owning category (`Some(None)` detaches the product).
    pub category_id: Option<Option<i64>>,
}

/// Product repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    /// Creates a new product repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new product.
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyViolation` if the category does not exist.
    pub async fn create(
        &self,
        input: CreateProductInput,
    ) -> Result<products::Model, RepositoryError> {
        let now = chrono::Utc::now().into();
        let product = products::ActiveModel {
            name: Set(input.name),
            price: Set(input.price),
            stock: Set(input.stock),
            image: Set(input.image),
            description: Set(input.description),
            category_id: Set(input.category_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        Ok(product.insert(&self.db).await?)
    }

    /// Finds a live product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<products::Model>, RepositoryError> {
        Ok(products::Entity::find_active_by_id(id).one(&self.db).await?)
    }

    /// Lists live products of a category, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_category(
        &self,
        category_id: i64,
        page: PageRequest,
    ) -> Result<PageResponse<products::Model>, RepositoryError> {
        let query = products::Entity::find_active()
            .filter(products::Column::CategoryId.eq(category_id))
            .order_by_asc(products::Column::Id);

        let total = query.clone().count(&self.db).await?;
        let data = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(data, page, total))
    }

    /// Updates a product.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product is missing or deleted.
    pub async fn update(
        &self,
        id: i64,
        input: UpdateProductInput,
    ) -> Result<products::Model, RepositoryError> {
        let product = self
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::not_found(ENTITY, id))?;

        let mut active: products::ActiveModel = product.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(price) = input.price {
            active.price = Set(price);
        }
        if let Some(stock) = input.stock {
            active.stock = Set(stock);
        }
        if let Some(image) = input.image {
            active.image = Set(image);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(category_id) = input.category_id {
            active.category_id = Set(category_id);
        }
        active.updated_at = Set(chrono::Utc::now().into());

        products::Entity::update(active)
            .filter(products::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(|err| RepositoryError::from_update(err, ENTITY, id))
    }

    /// Soft-deletes a product. Its order links are kept.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product is missing or already deleted.
    pub async fn soft_delete(&self, id: i64) -> Result<(), RepositoryError> {
        let marked =
            soft_delete_where::<products::Entity, _, _>(&self.db, products::Column::Id.eq(id))
                .await?;
        if marked == 0 {
            return Err(RepositoryError::not_found(ENTITY, id));
        }
        Ok(())
    }

    /// Physically deletes a product and, by cascade, its order links.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no row has this ID.
    pub async fn purge(&self, id: i64) -> Result<(), RepositoryError> {
        let result = products::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found(ENTITY, id));
        }
        Ok(())
    }
}
