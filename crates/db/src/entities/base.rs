//! Base-model columns shared by every entity.
//!
//! Each table carries `id`, `created_at`, `updated_at` and a nullable
//! `deleted_at` marker. Rows are soft-deleted by stamping `deleted_at`;
//! reads go through [`SoftDelete::find_active`] so stamped rows never leak.

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, IntoCondition};
use sea_orm::{ConnectionTrait, QueryFilter, Select};
use serde::{Deserialize, Serialize};

use super::demo::{authors, books};
use super::{categories, customers, orders, products, salesmen};

/// Identity and lifecycle timestamps common to all entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseModel {
    /// Primary key.
    pub id: i64,
    /// Insert time.
    pub created_at: DateTimeWithTimeZone,
    /// Last update time.
    pub updated_at: DateTimeWithTimeZone,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

impl BaseModel {
    /// Returns true once the row has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Models that embed the base-model columns.
pub trait HasBase {
    /// Returns the identity and timestamps of this row.
    fn base(&self) -> BaseModel;
}

/// Entities whose rows are soft-deleted rather than removed.
pub trait SoftDelete: EntityTrait {
    /// The `id` column.
    fn id_column() -> Self::Column;

    /// The `updated_at` column.
    fn updated_at_column() -> Self::Column;

    /// The `deleted_at` column.
    fn deleted_at_column() -> Self::Column;

    /// `SELECT` restricted to rows that are not soft-deleted.
    fn find_active() -> Select<Self> {
        Self::find().filter(Self::deleted_at_column().is_null())
    }

    /// [`Self::find_active`] narrowed to one id.
    fn find_active_by_id(id: i64) -> Select<Self> {
        Self::find_active().filter(Self::id_column().eq(id))
    }
}

/// Stamps `deleted_at` and `updated_at` on every live row matching `condition`.
///
/// Returns the number of rows newly marked; rows already deleted are left
/// untouched.
///
/// # Errors
///
/// Returns an error if the update fails.
pub async fn soft_delete_where<E, C, F>(db: &C, condition: F) -> Result<u64, DbErr>
where
    E: SoftDelete,
    C: ConnectionTrait,
    F: IntoCondition,
{
    let now = chrono::Utc::now();

    let result = E::update_many()
        .col_expr(E::deleted_at_column(), Expr::value(now))
        .col_expr(E::updated_at_column(), Expr::value(now))
        .filter(condition)
        .filter(E::deleted_at_column().is_null())
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

/// Implements [`SoftDelete`] and [`HasBase`] for entity modules.
macro_rules! base_model {
    ($($module:ident),+ $(,)?) => {
        $(
            impl SoftDelete for $module::Entity {
                fn id_column() -> Self::Column {
                    $module::Column::Id
                }

                fn updated_at_column() -> Self::Column {
                    $module::Column::UpdatedAt
                }

                fn deleted_at_column() -> Self::Column {
                    $module::Column::DeletedAt
                }
            }

            impl HasBase for $module::Model {
                fn base(&self) -> BaseModel {
                    BaseModel {
                        id: self.id,
                        created_at: self.created_at,
                        updated_at: self.updated_at,
                        deleted_at: self.deleted_at,
                    }
                }
            }
        )+
    };
}

base_model!(
    categories, products, customers, salesmen, orders, authors, books
);
