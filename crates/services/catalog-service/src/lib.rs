//! Catalog Service Library
//!
//! Data access for the product catalog: a SeaORM-backed repository over the
//! `produto` table, the database handle it is built on, and the schema
//! migration that creates the table.

pub mod config;
pub mod infra;
pub mod repository;

use sea_orm::DbErr;
use tracing::info;

pub use crate::config::CatalogServiceConfig;
pub use crate::infra::Database;
pub use crate::repository::{ProductRepository, ProductStore};

/// Connect to the catalog database and build the product repository on it.
///
/// Pending migrations are applied before the repository is returned.
pub async fn connect(config: &CatalogServiceConfig) -> Result<ProductStore, DbErr> {
    let db = Database::connect(&config.database).await?;
    info!(service = %config.service_name, "Product repository ready");
    Ok(ProductStore::new(db.into_connection()))
}

/// Load configuration from the environment and connect.
pub async fn connect_from_env() -> Result<ProductStore, DbErr> {
    let config = CatalogServiceConfig::from_env();
    connect(&config).await
}
