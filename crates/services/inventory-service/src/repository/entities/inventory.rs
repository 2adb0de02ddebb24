//! Inventory database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Inventory;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub product_id: i32,
    pub quantity: i32,
    pub warehouse: String,
    pub last_updated: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Inventory {
    fn from(model: Model) -> Self {
        Inventory {
            id: model.id,
            product_id: model.product_id,
            quantity: model.quantity,
            warehouse: model.warehouse,
            last_updated: model.last_updated,
        }
    }
}
