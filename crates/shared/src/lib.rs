//! Shared configuration, errors, and pagination types for SalesDB.
//!
//! This crate provides common types used across all other crates:
//! - Database and logging configuration
//! - Application-wide error types
//! - Pagination types for list queries

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DatabaseConfig, LoggingConfig, SslMode};
pub use error::{AppError, AppResult};
