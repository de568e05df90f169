//! Product database entity for SeaORM.
//!
//! Field names are English; the `produto` table keeps its Portuguese
//! column names.

use sea_orm::entity::prelude::*;

use domain::{Product, ProductView};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "produto")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub hash: Uuid,
    #[sea_orm(column_name = "nome")]
    pub name: String,
    #[sea_orm(column_name = "descricao", column_type = "Text")]
    pub description: String,
    pub ean13: String,
    #[sea_orm(column_name = "preco")]
    pub price: f64,
    #[sea_orm(column_name = "quantidade")]
    pub quantity: f64,
    #[sea_orm(column_name = "estoque_min")]
    pub min_stock: f64,
    #[sea_orm(column_name = "lativo")]
    pub active: bool,
    #[sea_orm(column_name = "dtcreate")]
    pub created_at: DateTimeUtc,
    #[sea_orm(column_name = "dtupdate")]
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Product {
            id: model.id,
            hash: model.hash,
            name: model.name,
            description: model.description,
            ean13: model.ean13,
            price: model.price,
            quantity: model.quantity,
            min_stock: model.min_stock,
            active: model.active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert database model straight to the read-only projection
impl From<Model> for ProductView {
    fn from(model: Model) -> Self {
        ProductView::from(Product::from(model))
    }
}
