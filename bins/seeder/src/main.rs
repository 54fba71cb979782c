//! Database seeder for SalesDB development and testing.
//!
//! Applies pending migrations, seeds a small catalogue with one order, then
//! runs the Author/Book walkthrough showing that deleting an author leaves
//! their book in place with no author.
//!
//! Usage: cargo run --bin seeder

use salesdb_db::entities::HasBase;
use salesdb_db::migration::Migrator;
use salesdb_db::migration::demo::DemoMigrator;
use salesdb_db::repositories::CreateProductInput;
use salesdb_db::{
    AuthorRepository, CategoryRepository, CustomerRepository, OrderRepository, ProductRepository,
    SalesmanRepository,
};
use salesdb_shared::AppConfig;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

const SAMPLE_CATEGORY: &str = "Stationery";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    println!("Connecting to {}...", config.database.redacted_dsn());
    let db = salesdb_db::connect(&config.database).await?;

    println!("Applying migrations...");
    Migrator::up(&db, None).await?;
    DemoMigrator::up(&db, None).await?;

    println!("Seeding sales data...");
    seed_sales(&db).await?;

    println!("Running author/book demo...");
    author_book_demo(&db).await?;

    println!("Seeding complete!");
    Ok(())
}

/// Seeds a category with products and one order linking them.
async fn seed_sales(db: &DatabaseConnection) -> anyhow::Result<()> {
    let categories = CategoryRepository::new(db.clone());
    if categories.find_by_name(SAMPLE_CATEGORY).await?.is_some() {
        println!("  Sample data already exists, skipping...");
        return Ok(());
    }

    let category = categories.create(SAMPLE_CATEGORY).await?;
    let base = category.base();
    println!(
        "  Created category: {} ({} at {})",
        category.name, base.id, base.created_at
    );

    let products = ProductRepository::new(db.clone());
    let mut product_ids = Vec::new();
    for (name, price, stock) in [("Notebook", 350, 120), ("Fountain pen", 2_400, 15)] {
        let product = products
            .create(CreateProductInput {
                name: name.to_string(),
                price,
                stock,
                description: format!("Sample {}", name.to_lowercase()),
                category_id: Some(category.id),
                ..Default::default()
            })
            .await?;
        println!("  Created product: {} ({})", product.name, product.id);
        product_ids.push(product.id);
    }

    let salesman = SalesmanRepository::new(db.clone())
        .create("Sam Seller", "changeme")
        .await?;
    let customer = CustomerRepository::new(db.clone())
        .create("Casey Buyer", "changeme")
        .await?;

    let order = OrderRepository::new(db.clone())
        .create_with_products(salesman.id, customer.id, &product_ids)
        .await?;
    println!(
        "  Created order {} for salesman {} and customer {}",
        order.id, salesman.id, customer.id
    );

    Ok(())
}

/// Creates an author with one book, deletes the author and reloads the book.
async fn author_book_demo(db: &DatabaseConnection) -> anyhow::Result<()> {
    let repo = AuthorRepository::new(db.clone());

    let author = repo.create_author("Ada Writer").await?;
    let book = repo.create_book("Collected Notes", Some(author.id)).await?;
    println!("  Book {} written by author {:?}", book.id, book.author_id);

    repo.delete_author(author.id).await?;

    match repo.find_book(book.id).await? {
        Some(book) => println!(
            "  After deleting the author, author_id = {:?} (updated {})",
            book.author_id,
            book.base().updated_at
        ),
        None => println!("  Book {} is gone", book.id),
    }

    Ok(())
}
