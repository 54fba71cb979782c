//! `SeaORM` entity definitions.
//!
//! Production schema: categories, products, customers, salesmen, orders and
//! the `product_orders` association. The Author/Book pair under [`demo`]
//! lives outside the production migrator.

pub mod base;
pub mod categories;
pub mod customers;
pub mod demo;
pub mod orders;
pub mod product_orders;
pub mod products;
pub mod salesmen;

pub use base::{BaseModel, HasBase, SoftDelete, soft_delete_where};
