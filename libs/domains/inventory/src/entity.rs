use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub min_stock: i32,
    pub price: f64,
    pub supplier: String,
    pub last_updated: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Product
impl From<Model> for crate::models::Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category: model.category,
            quantity: model.quantity,
            min_stock: model.min_stock,
            price: model.price,
            supplier: model.supplier,
            last_updated: model.last_updated.into(),
        }
    }
}

// Conversion from domain CreateProduct to Sea-ORM ActiveModel.
// The id stays NotSet so the database assigns it.
impl From<crate::models::CreateProduct> for ActiveModel {
    fn from(input: crate::models::CreateProduct) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            category: Set(input.category),
            quantity: Set(input.quantity),
            min_stock: Set(input.min_stock),
            price: Set(input.price),
            supplier: Set(input.supplier),
            last_updated: Set(Utc::now().into()),
        }
    }
}
