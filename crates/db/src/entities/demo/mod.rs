//! Sample Author/Book pair used to demonstrate `ON DELETE SET NULL`.
//!
//! These tables are created by [`crate::migration::demo::DemoMigrator`] only.

pub mod authors;
pub mod books;
