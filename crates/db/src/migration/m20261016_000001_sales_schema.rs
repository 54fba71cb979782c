//! Sales schema migration.
//!
//! Creates categories, customers, salesmen, products, orders and the
//! `product_orders` association table with their foreign-key cascades.

use sea_orm_migration::prelude::*;

use super::{Base, base_table, deleted_at_index};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // PART 1: OWNING TABLES
        // ============================================================
        manager.create_table(categories_table()).await?;
        manager.create_table(customers_table()).await?;
        manager.create_table(salesmen_table()).await?;

        // ============================================================
        // PART 2: DEPENDENT TABLES
        // ============================================================
        manager.create_table(products_table()).await?;
        manager.create_table(orders_table()).await?;
        manager.create_table(product_orders_table()).await?;

        // ============================================================
        // PART 3: INDEXES
        // ============================================================
        for index in indexes() {
            manager.create_index(index).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductOrders::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Salesmen::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Name,
}

#[derive(DeriveIden)]
enum Customers {
    Table,
    Name,
    Password,
}

#[derive(DeriveIden)]
enum Salesmen {
    Table,
    Name,
    Password,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Name,
    Price,
    Stock,
    Image,
    Description,
    CategoryId,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    SalesmanId,
    CustomerId,
}

#[derive(DeriveIden)]
enum ProductOrders {
    Table,
    ProductId,
    OrderId,
}

fn categories_table() -> TableCreateStatement {
    base_table(Categories::Table)
        .col(
            ColumnDef::new(Categories::Name)
                .string()
                .not_null()
                .unique_key(),
        )
        .to_owned()
}

fn customers_table() -> TableCreateStatement {
    base_table(Customers::Table)
        .col(ColumnDef::new(Customers::Name).string().not_null().default(""))
        .col(
            ColumnDef::new(Customers::Password)
                .string()
                .not_null()
                .default(""),
        )
        .to_owned()
}

fn salesmen_table() -> TableCreateStatement {
    base_table(Salesmen::Table)
        .col(ColumnDef::new(Salesmen::Name).string().not_null().default(""))
        .col(
            ColumnDef::new(Salesmen::Password)
                .string()
                .not_null()
                .default(""),
        )
        .to_owned()
}

fn products_table() -> TableCreateStatement {
    base_table(Products::Table)
        .col(ColumnDef::new(Products::Name).string().not_null().default(""))
        .col(
            ColumnDef::new(Products::Price)
                .big_integer()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(Products::Stock)
                .big_integer()
                .not_null()
                .default(0),
        )
        .col(ColumnDef::new(Products::Image).string().not_null().default(""))
        .col(
            ColumnDef::new(Products::Description)
                .text()
                .not_null()
                .default(""),
        )
        .col(ColumnDef::new(Products::CategoryId).big_integer().null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_products_category")
                .from(Products::Table, Products::CategoryId)
                .to(Categories::Table, Base::Id)
                .on_update(ForeignKeyAction::Cascade)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn orders_table() -> TableCreateStatement {
    base_table(Orders::Table)
        .col(ColumnDef::new(Orders::SalesmanId).big_integer().not_null())
        .col(ColumnDef::new(Orders::CustomerId).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_orders_salesman")
                .from(Orders::Table, Orders::SalesmanId)
                .to(Salesmen::Table, Base::Id)
                .on_update(ForeignKeyAction::Cascade)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_orders_customer")
                .from(Orders::Table, Orders::CustomerId)
                .to(Customers::Table, Base::Id)
                .on_update(ForeignKeyAction::Cascade)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn product_orders_table() -> TableCreateStatement {
    Table::create()
        .table(ProductOrders::Table)
        .if_not_exists()
        .col(ColumnDef::new(ProductOrders::ProductId).big_integer().not_null())
        .col(ColumnDef::new(ProductOrders::OrderId).big_integer().not_null())
        .primary_key(
            Index::create()
                .name("pk_product_orders")
                .col(ProductOrders::ProductId)
                .col(ProductOrders::OrderId),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_product_orders_product")
                .from(ProductOrders::Table, ProductOrders::ProductId)
                .to(Products::Table, Base::Id)
                .on_update(ForeignKeyAction::Cascade)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_product_orders_order")
                .from(ProductOrders::Table, ProductOrders::OrderId)
                .to(Orders::Table, Base::Id)
                .on_update(ForeignKeyAction::Cascade)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn indexes() -> Vec<IndexCreateStatement> {
    vec![
        deleted_at_index(Categories::Table),
        deleted_at_index(Customers::Table),
        deleted_at_index(Salesmen::Table),
        deleted_at_index(Products::Table),
        deleted_at_index(Orders::Table),
        Index::create()
            .name("idx_products_category")
            .table(Products::Table)
            .col(Products::CategoryId)
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_orders_salesman")
            .table(Orders::Table)
            .col(Orders::SalesmanId)
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_orders_customer")
            .table(Orders::Table)
            .col(Orders::CustomerId)
            .if_not_exists()
            .to_owned(),
        // Reverse lookup; the primary key already covers product_id first.
        Index::create()
            .name("idx_product_orders_order")
            .table(ProductOrders::Table)
            .col(ProductOrders::OrderId)
            .if_not_exists()
            .to_owned(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn render(statement: &TableCreateStatement) -> String {
        statement.to_string(PostgresQueryBuilder)
    }

    #[test]
    fn test_categories_name_is_unique_and_required() {
        let sql = render(&categories_table());
        assert!(sql.contains(r#"CREATE TABLE IF NOT EXISTS "categories""#));
        assert!(sql.contains(r#""name" varchar"#));
        assert!(sql.contains("NOT NULL UNIQUE"));
        assert!(sql.contains(r#""deleted_at" timestamp with time zone"#));
    }

    #[test]
    fn test_every_entity_table_has_base_columns() {
        for statement in [
            categories_table(),
            customers_table(),
            salesmen_table(),
            products_table(),
            orders_table(),
        ] {
            let sql = render(&statement);
            assert!(sql.contains(r#""id" bigserial"#), "{sql}");
            assert!(sql.contains(r#""created_at""#), "{sql}");
            assert!(sql.contains(r#""updated_at""#), "{sql}");
            assert!(sql.contains(r#""deleted_at""#), "{sql}");
        }
    }

    #[test]
    fn test_products_cascade_from_category() {
        let sql = render(&products_table());
        assert!(sql.contains(r#""category_id" bigint"#));
        assert!(sql.contains(r#"REFERENCES "categories" ("id")"#));
        assert!(sql.contains("ON DELETE CASCADE"));
        assert!(sql.contains("ON UPDATE CASCADE"));
    }

    #[test]
    fn test_orders_require_salesman_and_customer() {
        let sql = render(&orders_table());
        assert!(sql.contains(r#""salesman_id" bigint NOT NULL"#));
        assert!(sql.contains(r#""customer_id" bigint NOT NULL"#));
        assert!(sql.contains(r#"REFERENCES "salesmen" ("id")"#));
        assert!(sql.contains(r#"REFERENCES "customers" ("id")"#));
        assert_eq!(sql.matches("ON DELETE CASCADE").count(), 2);
    }

    #[test]
    fn test_product_orders_is_pure_association() {
        let sql = render(&product_orders_table());
        assert!(sql.contains(r#"PRIMARY KEY ("product_id", "order_id")"#));
        assert!(!sql.contains("bigserial"));
        assert!(!sql.contains("deleted_at"));
        assert_eq!(sql.matches("ON DELETE CASCADE").count(), 2);
    }

    #[rstest]
    #[case("categories")]
    #[case("customers")]
    #[case("salesmen")]
    #[case("products")]
    #[case("orders")]
    fn test_deleted_at_index_is_named_per_table(#[case] table: &str) {
        let expected = format!(r#""idx_{table}_deleted_at""#);
        let found = indexes()
            .iter()
            .map(|index| index.to_string(PostgresQueryBuilder))
            .any(|sql| sql.contains(&expected) && sql.contains(&format!(r#"ON "{table}""#)));
        assert!(found, "missing {expected}");
    }
}
