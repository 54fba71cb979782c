//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Reads skip soft-deleted rows; `soft_delete` stamps `deleted_at` and `purge`
//! removes the row, leaving the foreign keys to cascade.

pub mod author;
pub mod category;
pub mod customer;
pub mod error;
pub mod order;
pub mod product;
pub mod salesman;

pub use author::AuthorRepository;
pub use category::CategoryRepository;
pub use customer::{CustomerRepository, UpdateAccountInput};
pub use error::RepositoryError;
pub use order::OrderRepository;
pub use product::{CreateProductInput, ProductRepository, UpdateProductInput};
pub use salesman::SalesmanRepository;
