//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod product;

pub use product::{ActiveModel as ProductActiveModel, Entity as ProductEntity, Model as ProductModel};
