//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! The catalog service maps its storage rows onto these types.

pub mod constants;
pub mod error;
pub mod product;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use product::{ActiveState, NewProduct, Product, ProductView, UpdateProduct};
