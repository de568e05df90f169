//! Product repository integration tests.
//!
//! These run the real `ProductStore` against an in-memory SQLite database
//! created through the same migration used in production.

use common::{AppError, DatabaseConfig};
use domain::{ActiveState, NewProduct, UpdateProduct};
use uuid::Uuid;

use catalog_service_lib::{Database, ProductRepository, ProductStore};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn setup() -> ProductStore {
    init_tracing();

    let mut config = DatabaseConfig::with_url("sqlite::memory:");
    config.max_connections = 1;
    config.min_connections = 1;

    let db = Database::connect(&config)
        .await
        .expect("in-memory database should open");
    ProductStore::new(db.into_connection())
}

fn widget(hash: Uuid) -> NewProduct {
    NewProduct {
        hash,
        name: "Widget".to_string(),
        description: "A widget".to_string(),
        ean13: "1234567890123".to_string(),
        price: 9.99,
        quantity: 5.0,
        min_stock: 10.0,
        active: true,
    }
}

fn product(name: &str, ean13: &str, quantity: f64, min_stock: f64, active: bool) -> NewProduct {
    NewProduct {
        hash: Uuid::new_v4(),
        name: name.to_string(),
        description: String::new(),
        ean13: ean13.to_string(),
        price: 1.5,
        quantity,
        min_stock,
        active,
    }
}

fn hashes(views: &[domain::ProductView]) -> Vec<Uuid> {
    views.iter().map(|v| v.hash).collect()
}

#[tokio::test]
async fn test_create_then_find_round_trip() {
    let repo = setup().await;
    let hash = Uuid::new_v4();
    let input = widget(hash);

    let created = repo.create(input.clone()).await.unwrap();
    let found = repo.find_by_hash(hash).await.unwrap().expect("product should exist");

    assert_eq!(found.id, created.id);
    assert_eq!(found.hash, input.hash);
    assert_eq!(found.name, input.name);
    assert_eq!(found.description, input.description);
    assert_eq!(found.ean13, input.ean13);
    assert_eq!(found.price, input.price);
    assert_eq!(found.quantity, input.quantity);
    assert_eq!(found.min_stock, input.min_stock);
    assert_eq!(found.active, input.active);
    assert!(found.updated_at.is_none());
}

#[tokio::test]
async fn test_exists_follows_create_and_delete() {
    let repo = setup().await;
    let hash = Uuid::new_v4();

    assert!(!repo.exists(hash).await.unwrap());

    repo.create(widget(hash)).await.unwrap();
    assert!(repo.exists(hash).await.unwrap());

    repo.delete(hash).await.unwrap();
    assert!(!repo.exists(hash).await.unwrap());
    assert!(repo.find_by_hash(hash).await.unwrap().is_none());
}

#[tokio::test]
async fn test_exists_ignores_active_flag() {
    let repo = setup().await;
    let hash = Uuid::new_v4();

    repo.create(NewProduct {
        active: false,
        ..widget(hash)
    })
    .await
    .unwrap();

    assert!(repo.exists(hash).await.unwrap());
    assert!(repo.find_by_hash(hash).await.unwrap().is_some());
}

#[tokio::test]
async fn test_find_active_by_hash_hides_inactive_like_missing() {
    let repo = setup().await;
    let inactive = Uuid::new_v4();
    let active = Uuid::new_v4();

    repo.create(NewProduct {
        active: false,
        ..widget(inactive)
    })
    .await
    .unwrap();
    repo.create(product("Gadget", "9876543210987", 3.0, 1.0, true))
        .await
        .unwrap();
    repo.create(NewProduct {
        name: "Gizmo".to_string(),
        ..widget(active)
    })
    .await
    .unwrap();

    assert!(repo.find_active_by_hash(Uuid::new_v4()).await.unwrap().is_none());
    assert!(repo.find_active_by_hash(inactive).await.unwrap().is_none());

    let view = repo.find_active_by_hash(active).await.unwrap().unwrap();
    assert_eq!(view.name, "Gizmo");
}

#[tokio::test]
async fn test_listings_partition_by_active_flag() {
    let repo = setup().await;
    let on = repo
        .create(product("On", "1111111111111", 1.0, 0.0, true))
        .await
        .unwrap();
    let off = repo
        .create(product("Off", "2222222222222", 1.0, 0.0, false))
        .await
        .unwrap();

    let all = hashes(&repo.list_all().await.unwrap());
    assert_eq!(all.len(), 2);
    assert!(all.contains(&on.hash) && all.contains(&off.hash));

    assert_eq!(hashes(&repo.list_active().await.unwrap()), vec![on.hash]);
    assert_eq!(hashes(&repo.list_inactive().await.unwrap()), vec![off.hash]);
}

#[tokio::test]
async fn test_below_min_stock_requires_active_and_shortage() {
    let repo = setup().await;
    let short_active = repo
        .create(product("Short", "1000000000001", 2.0, 5.0, true))
        .await
        .unwrap();
    let short_inactive = repo
        .create(product("Hidden", "1000000000002", 2.0, 5.0, false))
        .await
        .unwrap();
    let at_threshold = repo
        .create(product("Exact", "1000000000003", 5.0, 5.0, true))
        .await
        .unwrap();
    let fractional = repo
        .create(product("Bulk", "1000000000004", 0.25, 0.5, true))
        .await
        .unwrap();

    let below = hashes(&repo.list_below_min_stock().await.unwrap());

    assert!(below.contains(&short_active.hash));
    assert!(below.contains(&fractional.hash));
    assert!(!below.contains(&short_inactive.hash));
    assert!(!below.contains(&at_threshold.hash));
    assert_eq!(below.len(), 2);
}

#[tokio::test]
async fn test_update_overwrites_only_mutable_fields() {
    let repo = setup().await;
    let hash = Uuid::new_v4();
    repo.create(widget(hash)).await.unwrap();

    let updated = repo
        .update(UpdateProduct {
            hash,
            description: "A better widget".to_string(),
            price: 12.5,
            quantity: 20.0,
            min_stock: 4.0,
        })
        .await
        .unwrap();
    assert!(updated);

    let found = repo.find_by_hash(hash).await.unwrap().unwrap();
    assert_eq!(found.description, "A better widget");
    assert_eq!(found.price, 12.5);
    assert_eq!(found.quantity, 20.0);
    assert_eq!(found.min_stock, 4.0);
    assert_eq!(found.name, "Widget");
    assert_eq!(found.ean13, "1234567890123");
    assert!(found.active);
    assert!(found.updated_at.is_some());
}

#[tokio::test]
async fn test_update_missing_hash_reports_false_and_inserts_nothing() {
    let repo = setup().await;
    repo.create(widget(Uuid::new_v4())).await.unwrap();

    let missing = Uuid::new_v4();
    let updated = repo
        .update(UpdateProduct {
            hash: missing,
            description: "ghost".to_string(),
            price: 1.0,
            quantity: 1.0,
            min_stock: 1.0,
        })
        .await
        .unwrap();

    assert!(!updated);
    assert!(!repo.exists(missing).await.unwrap());
    assert_eq!(repo.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_rejects_negative_price_and_keeps_row() {
    let repo = setup().await;
    let hash = Uuid::new_v4();
    repo.create(widget(hash)).await.unwrap();

    let err = repo
        .update(UpdateProduct {
            hash,
            description: "Discounted".to_string(),
            price: -5.0,
            quantity: 5.0,
            min_stock: 10.0,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let found = repo.find_by_hash(hash).await.unwrap().unwrap();
    assert_eq!(found.price, 9.99);
    assert_eq!(found.description, "A widget");
    assert!(found.updated_at.is_none());
}

#[tokio::test]
async fn test_delete_missing_hash_is_an_error() {
    let repo = setup().await;

    let err = repo.delete(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_activation_toggles() {
    let repo = setup().await;
    let hash = Uuid::new_v4();
    repo.create(NewProduct {
        active: false,
        ..widget(hash)
    })
    .await
    .unwrap();

    assert!(repo.activate(hash).await.unwrap());
    assert!(repo.is_active(hash).await.unwrap());
    assert_eq!(repo.activation_state(hash).await.unwrap(), ActiveState::Active);

    assert!(repo.deactivate(hash).await.unwrap());
    assert!(!repo.is_active(hash).await.unwrap());
    assert_eq!(repo.activation_state(hash).await.unwrap(), ActiveState::Inactive);
}

#[tokio::test]
async fn test_activation_on_missing_hash() {
    let repo = setup().await;
    let missing = Uuid::new_v4();

    assert!(!repo.activate(missing).await.unwrap());
    assert!(!repo.deactivate(missing).await.unwrap());
    assert!(!repo.is_active(missing).await.unwrap());
    assert_eq!(
        repo.activation_state(missing).await.unwrap(),
        ActiveState::NotFound
    );
    assert!(!repo.exists(missing).await.unwrap());
}

#[tokio::test]
async fn test_duplicate_checks_use_exact_match() {
    let repo = setup().await;
    repo.create(widget(Uuid::new_v4())).await.unwrap();

    assert!(repo.is_name_duplicate("Widget").await.unwrap());
    assert!(!repo.is_name_duplicate("Widget ").await.unwrap());
    assert!(!repo.is_name_duplicate("Gadget").await.unwrap());

    assert!(repo.is_ean13_duplicate("1234567890123").await.unwrap());
    assert!(!repo.is_ean13_duplicate("123456789012").await.unwrap());
}

#[tokio::test]
async fn test_duplicate_hash_is_a_conflict() {
    let repo = setup().await;
    let hash = Uuid::new_v4();
    repo.create(widget(hash)).await.unwrap();

    let err = repo
        .create(NewProduct {
            name: "Other".to_string(),
            ..widget(hash)
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    assert!(!err.is_transient());
    assert_eq!(repo.find_by_hash(hash).await.unwrap().unwrap().name, "Widget");
}

#[tokio::test]
async fn test_widget_leaves_low_stock_report_when_deactivated() {
    let repo = setup().await;
    let u1 = Uuid::new_v4();
    repo.create(widget(u1)).await.unwrap();

    let below = hashes(&repo.list_below_min_stock().await.unwrap());
    assert!(below.contains(&u1));

    repo.deactivate(u1).await.unwrap();

    let below = hashes(&repo.list_below_min_stock().await.unwrap());
    assert!(!below.contains(&u1));
}

#[tokio::test]
async fn test_database_ping() {
    init_tracing();
    let mut config = DatabaseConfig::with_url("sqlite::memory:");
    config.max_connections = 1;

    let db = Database::connect(&config).await.unwrap();
    assert!(db.ping().await.is_ok());
}
