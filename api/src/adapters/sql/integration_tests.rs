//! SQL integration tests
//!
//! These run against an in-memory SQLite database, so they need no setup.
//! A single pooled connection keeps every query on the same database.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

use super::*;
use crate::domain::entities::Snapshot;
use crate::domain::ports::{SnapshotStore, ORDERS_KEY, PRODUCTS_KEY};
use crate::entity::snapshots;
use crate::error::DomainError;
use crate::test_utils::{test_order, test_product, test_snapshot};

async fn get_test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    Database::connect(options)
        .await
        .expect("Failed to open in-memory database")
}

async fn get_test_store() -> SqlSnapshotStore {
    let store = SqlSnapshotStore::new(get_test_db().await);
    store.ensure_schema().await.expect("Failed to create schema");
    store
}

#[tokio::test]
async fn missing_blobs_load_as_empty_collections() {
    let store = get_test_store().await;

    let snapshot = store.load_snapshot().await.expect("Failed to load");
    assert_eq!(snapshot, Snapshot::default());
}

#[tokio::test]
async fn saved_collections_load_back() {
    let store = get_test_store().await;
    let snapshot = test_snapshot();

    store.save_products(&snapshot.products).await.unwrap();
    store.save_orders(&snapshot.orders).await.unwrap();

    assert_eq!(store.load_snapshot().await.unwrap(), snapshot);
}

#[tokio::test]
async fn save_overwrites_previous_blob() {
    let store = get_test_store().await;

    store
        .save_products(&[test_product("p1", "Panetone"), test_product("p2", "Chocotone")])
        .await
        .unwrap();
    store
        .save_products(&[test_product("p3", "Colomba")])
        .await
        .unwrap();

    assert_eq!(
        store.load_products().await.unwrap(),
        vec![test_product("p3", "Colomba")]
    );
}

#[tokio::test]
async fn collections_are_stored_independently() {
    let store = get_test_store().await;

    store
        .save_orders(&[test_order("o1", "Ana", "2024-12-20", &[("p1", 1)])])
        .await
        .unwrap();

    assert!(store.load_products().await.unwrap().is_empty());
    assert_eq!(store.load_orders().await.unwrap().len(), 1);
}

#[tokio::test]
async fn corrupt_blob_is_a_storage_error() {
    let db = get_test_db().await;
    let store = SqlSnapshotStore::new(db.clone());
    store.ensure_schema().await.unwrap();

    snapshots::ActiveModel {
        key: Set(ORDERS_KEY.to_string()),
        payload: Set("{not json".to_string()),
        updated_at: Set(Utc::now().fixed_offset()),
    }
    .insert(&db)
    .await
    .unwrap();

    let err = store.load_orders().await.unwrap_err();
    assert!(matches!(err, DomainError::Storage(_)));
    assert!(store.load_products().await.unwrap().is_empty());
}

#[tokio::test]
async fn stored_blob_decodes_leniently() {
    let db = get_test_db().await;
    let store = SqlSnapshotStore::new(db.clone());
    store.ensure_schema().await.unwrap();

    snapshots::ActiveModel {
        key: Set(PRODUCTS_KEY.to_string()),
        payload: Set(r#"[{"id": 7, "name": null}]"#.to_string()),
        updated_at: Set(Utc::now().fixed_offset()),
    }
    .insert(&db)
    .await
    .unwrap();

    assert_eq!(store.load_products().await.unwrap(), vec![test_product("7", "")]);
}

#[tokio::test]
async fn ensure_schema_is_idempotent() {
    let store = get_test_store().await;
    store.ensure_schema().await.expect("Second run should succeed");
}
