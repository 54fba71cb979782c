//! `SeaORM` Entity for orders table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub salesman_id: i64,
    pub customer_id: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::salesmen::Entity",
        from = "Column::SalesmanId",
        to = "super::salesmen::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Salesman,
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Customer,
    #[sea_orm(has_many = "super::product_orders::Entity")]
    ProductOrders,
}

impl Related<super::salesmen::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Salesman.def()
    }
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::product_orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductOrders.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        super::product_orders::Relation::Product.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::product_orders::Relation::Order.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
