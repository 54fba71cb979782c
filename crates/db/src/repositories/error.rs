//! Error type shared by all repositories.

use salesdb_shared::AppError;
use sea_orm::{DbErr, RuntimeErr};

/// Postgres SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";
/// Postgres SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// Postgres SQLSTATE for `not_null_violation`.
const NOT_NULL_VIOLATION: &str = "23502";

/// Error types for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The row does not exist or has been soft-deleted.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity name, e.g. `"category"`.
        entity: &'static str,
        /// Requested primary key.
        id: i64,
    },

    /// A unique constraint rejected the write.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint rejected the write.
    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// A required column was left empty.
    #[error("Not-null constraint violated: {0}")]
    NotNullViolation(String),

    /// Any other database error.
    #[error("Database error: {0}")]
    Database(DbErr),
}

impl RepositoryError {
    /// Builds a `NotFound` error.
    #[must_use]
    pub const fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Classifies the error of an update guarded by `deleted_at IS NULL`.
    ///
    /// No matching live row means the target vanished or was soft-deleted
    /// after it was loaded.
    pub(crate) fn from_update(err: DbErr, entity: &'static str, id: i64) -> Self {
        match err {
            DbErr::RecordNotUpdated => Self::not_found(entity, id),
            err => err.into(),
        }
    }
}

impl From<DbErr> for RepositoryError {
    fn from(err: DbErr) -> Self {
        let Some((code, message)) = postgres_error(&err) else {
            return Self::Database(err);
        };

        match code.as_str() {
            UNIQUE_VIOLATION => Self::UniqueViolation(message),
            FOREIGN_KEY_VIOLATION => Self::ForeignKeyViolation(message),
            NOT_NULL_VIOLATION => Self::NotNullViolation(message),
            _ => Self::Database(err),
        }
    }
}

/// Extracts the SQLSTATE code and message reported by Postgres, if any.
fn postgres_error(err: &DbErr) -> Option<(String, String)> {
    let (DbErr::Exec(runtime) | DbErr::Query(runtime) | DbErr::Conn(runtime)) = err else {
        return None;
    };
    let RuntimeErr::SqlxError(sqlx_err) = runtime else {
        return None;
    };
    sqlstate(sqlx_err)
}

fn sqlstate(err: &sqlx::Error) -> Option<(String, String)> {
    let db_err = err.as_database_error()?;
    let code = db_err.code()?.into_owned();

    Some((code, db_err.message().to_string()))
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => Self::NotFound(err.to_string()),
            RepositoryError::UniqueViolation(_) | RepositoryError::ForeignKeyViolation(_) => {
                Self::Conflict(err.to_string())
            }
            RepositoryError::NotNullViolation(_) => Self::Validation(err.to_string()),
            RepositoryError::Database(DbErr::Conn(_) | DbErr::ConnectionAcquire(_)) => {
                Self::Connection(err.to_string())
            }
            RepositoryError::Database(_) => Self::Database(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DbErr::Custom("boom".into()))]
    #[case(DbErr::Exec(RuntimeErr::Internal("boom".into())))]
    #[case(DbErr::Query(RuntimeErr::Internal("boom".into())))]
    fn test_non_sqlx_errors_stay_database_errors(#[case] err: DbErr) {
        assert!(matches!(
            RepositoryError::from(err),
            RepositoryError::Database(_)
        ));
    }

    #[test]
    fn test_not_found_display() {
        let err = RepositoryError::not_found("category", 42);
        assert_eq!(err.to_string(), "category not found: 42");
    }

    #[test]
    fn test_unmatched_update_is_not_found() {
        let err = RepositoryError::from_update(DbErr::RecordNotUpdated, "product", 9);
        assert!(matches!(
            err,
            RepositoryError::NotFound {
                entity: "product",
                id: 9
            }
        ));

        let err = RepositoryError::from_update(DbErr::Custom("boom".into()), "product", 9);
        assert!(matches!(err, RepositoryError::Database(DbErr::Custom(_))));
    }

    #[rstest]
    #[case(RepositoryError::not_found("order", 1), "NOT_FOUND")]
    #[case(RepositoryError::UniqueViolation("categories_name_key".into()), "CONFLICT")]
    #[case(RepositoryError::ForeignKeyViolation("fk".into()), "CONFLICT")]
    #[case(RepositoryError::NotNullViolation("salesman_id".into()), "VALIDATION_ERROR")]
    #[case(RepositoryError::Database(DbErr::Custom("boom".into())), "DATABASE_ERROR")]
    #[case(
        RepositoryError::Database(DbErr::Conn(RuntimeErr::Internal("refused".into()))),
        "CONNECTION_ERROR"
    )]
    fn test_app_error_mapping(#[case] err: RepositoryError, #[case] code: &str) {
        assert_eq!(AppError::from(err).error_code(), code);
    }
}
