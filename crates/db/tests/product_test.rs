//! Integration tests for Product repository.

mod common;

use salesdb_db::entities::products;
use salesdb_db::repositories::UpdateProductInput;
use salesdb_db::{OrderRepository, ProductRepository, RepositoryError};
use salesdb_shared::types::PageRequest;
use sea_orm::EntityTrait;

#[tokio::test]
async fn test_update_product_fields() {
    let db = common::setup().await;
    let (category_id, product_ids) = common::seed_products(&db, 1).await;
    let repo = ProductRepository::new(db.clone());

    let updated = repo
        .update(
            product_ids[0],
            UpdateProductInput {
                price: Some(4_200),
                stock: Some(0),
                description: Some("Out of stock".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update product");

    assert_eq!(updated.price, 4_200);
    assert_eq!(updated.stock, 0);
    assert_eq!(updated.description, "Out of stock");
    assert_eq!(updated.name, "Product 0");
    assert_eq!(updated.category_id, Some(category_id));
}

#[tokio::test]
async fn test_update_can_detach_and_move_category() {
    let db = common::setup().await;
    let (old_category, product_ids) = common::seed_products(&db, 1).await;
    let (new_category, _) = common::seed_products(&db, 0).await;
    let repo = ProductRepository::new(db.clone());
    let id = product_ids[0];

    let detached = repo
        .update(
            id,
            UpdateProductInput {
                category_id: Some(None),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to detach product");
    assert_eq!(detached.category_id, None);

    let page = repo
        .list_by_category(old_category, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.meta.total, 0);

    let moved = repo
        .update(
            id,
            UpdateProductInput {
                category_id: Some(Some(new_category)),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to move product");
    assert_eq!(moved.category_id, Some(new_category));

    let missing_category = repo
        .update(
            id,
            UpdateProductInput {
                category_id: Some(Some(i64::MAX)),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(
        missing_category,
        Err(RepositoryError::ForeignKeyViolation(_))
    ));
}

#[tokio::test]
async fn test_update_soft_deleted_product_is_not_found() {
    let db = common::setup().await;
    let (_, product_ids) = common::seed_products(&db, 1).await;
    let repo = ProductRepository::new(db.clone());

    repo.soft_delete(product_ids[0]).await.unwrap();
    let result = repo
        .update(
            product_ids[0],
            UpdateProductInput {
                stock: Some(1),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(RepositoryError::NotFound {
            entity: "product",
            ..
        })
    ));
}

#[tokio::test]
async fn test_purge_product_removes_its_links_only() {
    let db = common::setup().await;
    let (salesman, customer) = common::seed_parties(&db).await;
    let (_, product_ids) = common::seed_products(&db, 2).await;
    let orders = OrderRepository::new(db.clone());
    let order = orders
        .create_with_products(salesman.id, customer.id, &product_ids)
        .await
        .unwrap();
    assert_eq!(common::links_for_order(&db, order.id).await, 2);

    ProductRepository::new(db.clone())
        .purge(product_ids[0])
        .await
        .expect("Failed to purge product");

    let gone = products::Entity::find_by_id(product_ids[0])
        .one(&db)
        .await
        .unwrap();
    assert!(gone.is_none());
    assert_eq!(common::links_for_products(&db, &product_ids[..1]).await, 0);
    assert_eq!(common::links_for_order(&db, order.id).await, 1);

    let (_, remaining) = orders.find_with_products(order.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, product_ids[1]);
}
