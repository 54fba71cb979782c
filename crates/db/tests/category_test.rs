//! Integration tests for Category repository.

mod common;

use salesdb_db::entities::{categories, products};
use salesdb_db::{CategoryRepository, OrderRepository, ProductRepository, RepositoryError};
use salesdb_shared::types::PageRequest;
use sea_orm::EntityTrait;

#[tokio::test]
async fn test_category_create_and_find() {
    let db = common::setup().await;
    let repo = CategoryRepository::new(db.clone());
    let name = common::unique("Beverages");

    let category = repo.create(&name).await.expect("Failed to create category");
    assert_eq!(category.name, name);
    assert!(category.deleted_at.is_none());

    let found = repo
        .find_by_name(&name)
        .await
        .expect("Failed to find category")
        .expect("Category should exist");
    assert_eq!(found.id, category.id);
}

#[tokio::test]
async fn test_duplicate_category_name_is_unique_violation() {
    let db = common::setup().await;
    let repo = CategoryRepository::new(db.clone());
    let name = common::unique("Snacks");

    repo.create(&name).await.expect("Failed to create category");
    let result = repo.create(&name).await;

    assert!(
        matches!(result, Err(RepositoryError::UniqueViolation(_))),
        "expected unique violation, got {result:?}"
    );
}

#[tokio::test]
async fn test_soft_deleted_name_stays_reserved() {
    let db = common::setup().await;
    let repo = CategoryRepository::new(db.clone());
    let name = common::unique("Retired");

    let category = repo.create(&name).await.expect("Failed to create category");
    repo.soft_delete(category.id).await.expect("Failed to delete");

    let result = repo.create(&name).await;
    assert!(matches!(result, Err(RepositoryError::UniqueViolation(_))));
}

#[tokio::test]
async fn test_rename_category() {
    let db = common::setup().await;
    let repo = CategoryRepository::new(db.clone());
    let category = repo
        .create(&common::unique("Old"))
        .await
        .expect("Failed to create category");
    let new_name = common::unique("New");

    let renamed = repo
        .rename(category.id, &new_name)
        .await
        .expect("Failed to rename");

    assert_eq!(renamed.name, new_name);
    assert!(renamed.updated_at >= category.updated_at);
}

#[tokio::test]
async fn test_purge_category_cascades_to_products_and_links() {
    let db = common::setup().await;
    let (salesman, customer) = common::seed_parties(&db).await;
    let (category_id, product_ids) = common::seed_products(&db, 3).await;
    let order = OrderRepository::new(db.clone())
        .create_with_products(salesman.id, customer.id, &product_ids)
        .await
        .expect("Failed to create order");
    assert_eq!(common::links_for_products(&db, &product_ids).await, 3);

    CategoryRepository::new(db.clone())
        .purge(category_id)
        .await
        .expect("Failed to purge category");

    let category = categories::Entity::find_by_id(category_id)
        .one(&db)
        .await
        .unwrap();
    assert!(category.is_none());
    for id in &product_ids {
        let product = products::Entity::find_by_id(*id).one(&db).await.unwrap();
        assert!(product.is_none(), "product {id} should be physically gone");
    }
    assert_eq!(common::links_for_products(&db, &product_ids).await, 0);
    assert_eq!(common::links_for_order(&db, order.id).await, 0);

    // The order itself survives losing its products.
    let orders = OrderRepository::new(db.clone());
    assert!(orders.find_by_id(order.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_list_and_products_of_category() {
    let db = common::setup().await;
    let (category_id, product_ids) = common::seed_products(&db, 3).await;
    let repo = CategoryRepository::new(db.clone());

    let listed: Vec<i64> = repo
        .products(category_id)
        .await
        .expect("Failed to list products")
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(listed, product_ids);

    ProductRepository::new(db.clone())
        .soft_delete(product_ids[1])
        .await
        .unwrap();
    let listed = repo.products(category_id).await.unwrap();
    assert_eq!(listed.len(), 2);

    let first = repo.list(PageRequest::new(1, 1)).await.expect("Failed to list");
    assert_eq!(first.data.len(), 1);
    assert_eq!(first.meta.per_page, 1);
    assert!(first.meta.total >= 1);
    assert_eq!(u64::from(first.meta.total_pages), first.meta.total);

    let everything = repo.list(PageRequest::new(1, 10_000)).await.unwrap();
    assert!(everything.data.iter().any(|c| c.id == category_id));

    repo.soft_delete(category_id).await.unwrap();
    assert!(matches!(
        repo.products(category_id).await,
        Err(RepositoryError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_soft_delete_category_hides_it_and_its_products() {
    let db = common::setup().await;
    let (category_id, product_ids) = common::seed_products(&db, 2).await;
    let categories = CategoryRepository::new(db.clone());
    let products = ProductRepository::new(db.clone());

    categories
        .soft_delete(category_id)
        .await
        .expect("Failed to soft-delete category");

    assert!(categories.find_by_id(category_id).await.unwrap().is_none());
    for id in &product_ids {
        assert!(products.find_by_id(*id).await.unwrap().is_none());
    }
    let page = products
        .list_by_category(category_id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.meta.total, 0);

    let again = categories.soft_delete(category_id).await;
    assert!(matches!(again, Err(RepositoryError::NotFound { .. })));
}

#[tokio::test]
async fn test_missing_category_is_not_found() {
    let db = common::setup().await;
    let repo = CategoryRepository::new(db.clone());

    let result = repo.rename(i64::MAX, "nothing").await;
    assert!(matches!(
        result,
        Err(RepositoryError::NotFound {
            entity: "category",
            ..
        })
    ));
    assert!(matches!(
        repo.purge(i64::MAX).await,
        Err(RepositoryError::NotFound { .. })
    ));
}
