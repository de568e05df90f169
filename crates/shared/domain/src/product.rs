//! Product domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{MIN_NAME_LENGTH, MIN_PRICE};
use crate::error::{DomainError, DomainResult};

/// Activation state of a product looked up by hash.
///
/// Separates "no such product" from "product exists but is inactive".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveState {
    NotFound,
    Inactive,
    Active,
}

impl ActiveState {
    /// Check if the product exists and is active
    pub fn is_active(&self) -> bool {
        matches!(self, ActiveState::Active)
    }

    /// Check if a product with the hash exists at all
    pub fn exists(&self) -> bool {
        !matches!(self, ActiveState::NotFound)
    }
}

impl From<Option<bool>> for ActiveState {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            None => ActiveState::NotFound,
            Some(false) => ActiveState::Inactive,
            Some(true) => ActiveState::Active,
        }
    }
}

impl std::fmt::Display for ActiveState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActiveState::NotFound => write!(f, "not_found"),
            ActiveState::Inactive => write!(f, "inactive"),
            ActiveState::Active => write!(f, "active"),
        }
    }
}

/// Product domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Storage-assigned surrogate key
    #[serde(skip_serializing, default)]
    pub id: i64,
    /// Business key used for every lookup
    pub hash: Uuid,
    pub name: String,
    pub description: String,
    pub ean13: String,
    pub price: f64,
    pub quantity: f64,
    pub min_stock: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    /// Last update timestamp (None until the first update)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Check if an active product has dropped below its reorder threshold
    pub fn is_below_min_stock(&self) -> bool {
        self.active && self.quantity < self.min_stock
    }

    /// Make the product visible in default listings
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Hide the product from default listings
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Product creation data transfer object.
///
/// The caller chooses the hash; id and timestamps are assigned on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub hash: Uuid,
    pub name: String,
    pub description: String,
    pub ean13: String,
    pub price: f64,
    pub quantity: f64,
    pub min_stock: f64,
    pub active: bool,
}

impl NewProduct {
    /// Check the business rules that must hold before insert.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().chars().count() < MIN_NAME_LENGTH {
            return Err(DomainError::validation("Product name must not be empty"));
        }
        validate_stock_fields(self.price, self.quantity, self.min_stock)
    }
}

/// Product update data transfer object.
///
/// Only these fields are writable after creation; name, ean13 and the
/// active flag are left untouched by an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProduct {
    pub hash: Uuid,
    pub description: String,
    pub price: f64,
    pub quantity: f64,
    pub min_stock: f64,
}

impl UpdateProduct {
    /// Check the business rules that must hold before the row is overwritten.
    pub fn validate(&self) -> DomainResult<()> {
        validate_stock_fields(self.price, self.quantity, self.min_stock)
    }
}

impl From<&Product> for UpdateProduct {
    fn from(product: &Product) -> Self {
        Self {
            hash: product.hash,
            description: product.description.clone(),
            price: product.price,
            quantity: product.quantity,
            min_stock: product.min_stock,
        }
    }
}

/// Price must be a non-negative amount; stock levels must be numbers.
fn validate_stock_fields(price: f64, quantity: f64, min_stock: f64) -> DomainResult<()> {
    if !price.is_finite() || price < MIN_PRICE {
        return Err(DomainError::validation(
            "Product price must be a non-negative amount",
        ));
    }
    if !quantity.is_finite() {
        return Err(DomainError::validation("Product quantity must be a number"));
    }
    if !min_stock.is_finite() {
        return Err(DomainError::validation("Product minimum stock must be a number"));
    }
    Ok(())
}

/// Read-only product projection (safe to return to callers).
///
/// Carries every business field but never the surrogate id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub hash: Uuid,
    pub name: String,
    pub description: String,
    pub ean13: String,
    pub price: f64,
    pub quantity: f64,
    pub min_stock: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            hash: product.hash,
            name: product.name,
            description: product.description,
            ean13: product.ean13,
            price: product.price,
            quantity: product.quantity,
            min_stock: product.min_stock,
            active: product.active,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self::from(product.clone())
    }
}
