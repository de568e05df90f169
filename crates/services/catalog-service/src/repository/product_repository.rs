//! Product repository implementation.
//!
//! Every method issues exactly one parameterized statement against the
//! `produto` table. Lookups, updates, activation toggles and deletes are keyed
//! by the product hash, never by the surrogate id.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use common::{AppError, AppResult};
use domain::{ActiveState, NewProduct, Product, ProductView, UpdateProduct};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
///
/// Storage failures are always returned as `AppError::Database`; a negative
/// answer (`false`, `None`) means the storage was reached and said no.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List every product, active or not (no ordering guarantee)
    async fn list_all(&self) -> AppResult<Vec<ProductView>>;

    /// List active products
    async fn list_active(&self) -> AppResult<Vec<ProductView>>;

    /// List inactive products
    async fn list_inactive(&self) -> AppResult<Vec<ProductView>>;

    /// List active products whose quantity is below their minimum stock
    async fn list_below_min_stock(&self) -> AppResult<Vec<ProductView>>;

    /// Find an active product by hash.
    ///
    /// An inactive product is reported exactly like a missing one.
    async fn find_active_by_hash(&self, hash: Uuid) -> AppResult<Option<ProductView>>;

    /// Find a product by hash regardless of its active flag
    async fn find_by_hash(&self, hash: Uuid) -> AppResult<Option<Product>>;

    /// Check if any product carries the hash
    async fn exists(&self, hash: Uuid) -> AppResult<bool>;

    /// Read the active flag for a hash (`false` when the hash is absent).
    ///
    /// Use `activation_state` to tell an absent hash from an inactive product.
    async fn is_active(&self, hash: Uuid) -> AppResult<bool>;

    /// Look up whether a hash is missing, inactive or active
    async fn activation_state(&self, hash: Uuid) -> AppResult<ActiveState>;

    /// Check if a product with exactly this name exists
    async fn is_name_duplicate(&self, name: &str) -> AppResult<bool>;

    /// Check if a product with exactly this EAN-13 exists
    async fn is_ean13_duplicate(&self, ean13: &str) -> AppResult<bool>;

    /// Insert a new product, stamping its creation time
    async fn create(&self, product: NewProduct) -> AppResult<Product>;

    /// Overwrite description, price, quantity and minimum stock.
    ///
    /// Returns `false` when no product matched the hash; nothing is inserted.
    async fn update(&self, changes: UpdateProduct) -> AppResult<bool>;

    /// Permanently delete a product (`AppError::NotFound` if none matched)
    async fn delete(&self, hash: Uuid) -> AppResult<()>;

    /// Set the active flag; returns whether a product matched
    async fn activate(&self, hash: Uuid) -> AppResult<bool>;

    /// Clear the active flag; returns whether a product matched
    async fn deactivate(&self, hash: Uuid) -> AppResult<bool>;
}

/// Concrete implementation of ProductRepository backed by SeaORM
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn list_where(&self, filter: Option<sea_orm::Condition>) -> AppResult<Vec<ProductView>> {
        let mut query = ProductEntity::find();
        if let Some(filter) = filter {
            query = query.filter(filter);
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;
        Ok(models.into_iter().map(ProductView::from).collect())
    }

    async fn set_active(&self, hash: Uuid, active: bool) -> AppResult<bool> {
        let result = ProductEntity::update_many()
            .col_expr(product::Column::Active, Expr::value(active))
            .filter(product::Column::Hash.eq(hash))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            tracing::debug!(%hash, active, "Activation toggle matched no product");
        }

        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn list_all(&self) -> AppResult<Vec<ProductView>> {
        self.list_where(None).await
    }

    async fn list_active(&self) -> AppResult<Vec<ProductView>> {
        self.list_where(Some(
            sea_orm::Condition::all().add(product::Column::Active.eq(true)),
        ))
        .await
    }

    async fn list_inactive(&self) -> AppResult<Vec<ProductView>> {
        self.list_where(Some(
            sea_orm::Condition::all().add(product::Column::Active.eq(false)),
        ))
        .await
    }

    async fn list_below_min_stock(&self) -> AppResult<Vec<ProductView>> {
        self.list_where(Some(
            sea_orm::Condition::all()
                .add(Expr::col(product::Column::Quantity).lt(Expr::col(product::Column::MinStock)))
                .add(product::Column::Active.eq(true)),
        ))
        .await
    }

    async fn find_active_by_hash(&self, hash: Uuid) -> AppResult<Option<ProductView>> {
        let result = ProductEntity::find()
            .filter(product::Column::Hash.eq(hash))
            .filter(product::Column::Active.eq(true))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(ProductView::from))
    }

    async fn find_by_hash(&self, hash: Uuid) -> AppResult<Option<Product>> {
        let result = ProductEntity::find()
            .filter(product::Column::Hash.eq(hash))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Product::from))
    }

    async fn exists(&self, hash: Uuid) -> AppResult<bool> {
        let count = ProductEntity::find()
            .filter(product::Column::Hash.eq(hash))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn is_active(&self, hash: Uuid) -> AppResult<bool> {
        Ok(self.activation_state(hash).await?.is_active())
    }

    async fn activation_state(&self, hash: Uuid) -> AppResult<ActiveState> {
        let flag: Option<bool> = ProductEntity::find()
            .select_only()
            .column(product::Column::Active)
            .filter(product::Column::Hash.eq(hash))
            .into_tuple::<bool>()
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(ActiveState::from(flag))
    }

    async fn is_name_duplicate(&self, name: &str) -> AppResult<bool> {
        let count = ProductEntity::find()
            .filter(product::Column::Name.eq(name))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn is_ean13_duplicate(&self, ean13: &str) -> AppResult<bool> {
        let count = ProductEntity::find()
            .filter(product::Column::Ean13.eq(ean13))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn create(&self, product: NewProduct) -> AppResult<Product> {
        product.validate()?;

        let active_model = ActiveModel {
            hash: Set(product.hash),
            name: Set(product.name),
            description: Set(product.description),
            ean13: Set(product.ean13),
            price: Set(product.price),
            quantity: Set(product.quantity),
            min_stock: Set(product.min_stock),
            active: Set(product.active),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(insert_error)?;
        tracing::debug!(hash = %model.hash, id = model.id, "Product created");

        Ok(Product::from(model))
    }

    async fn update(&self, changes: UpdateProduct) -> AppResult<bool> {
        changes.validate()?;

        let result = ProductEntity::update_many()
            .col_expr(product::Column::Description, Expr::value(changes.description))
            .col_expr(product::Column::Price, Expr::value(changes.price))
            .col_expr(product::Column::Quantity, Expr::value(changes.quantity))
            .col_expr(product::Column::MinStock, Expr::value(changes.min_stock))
            .col_expr(product::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(product::Column::Hash.eq(changes.hash))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            tracing::debug!(hash = %changes.hash, "Update matched no product");
        }

        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, hash: Uuid) -> AppResult<()> {
        let result = ProductEntity::delete_many()
            .filter(product::Column::Hash.eq(hash))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            tracing::warn!(%hash, "Delete matched no product");
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn activate(&self, hash: Uuid) -> AppResult<bool> {
        self.set_active(hash, true).await
    }

    async fn deactivate(&self, hash: Uuid) -> AppResult<bool> {
        self.set_active(hash, false).await
    }
}

/// The unique index on `hash` is the only constraint an insert can violate.
fn insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Product hash"),
        _ => AppError::from(err),
    }
}
