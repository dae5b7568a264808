//! OrdersFlow API Server
//!
//! Order and production-planning service for a small food business: a product
//! catalog, customer orders, per-product totals and spreadsheet backups.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::{Arc, RwLock};

use anyhow::Context;
use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tokio::sync::mpsc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;
mod report;

#[cfg(test)]
mod test_utils;


use adapters::{SheetsClient, SqlSnapshotStore};
use app::{spawn_persistence_worker, BackupService, EntityStore, StoreService};
use config::Config;
use domain::ports::{RemoteSync, SnapshotStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store_service: Arc<StoreService>,
    pub backup_service: Arc<BackupService>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router over the given state
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Catalog
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/products/:id",
            delete(handlers::delete_product).patch(handlers::rename_product),
        )
        // Orders
        .route(
            "/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route("/orders/totals", get(handlers::get_totals))
        .route(
            "/orders/:id",
            get(handlers::get_order)
                .put(handlers::update_order)
                .delete(handlers::delete_order),
        )
        .route("/orders/:id/items", post(handlers::add_item))
        .route(
            "/orders/:id/items/:product_id",
            delete(handlers::remove_item),
        )
        // Backup
        .route("/backup", get(handlers::export_backup))
        .route("/backup/share", get(handlers::share_backup))
        .route("/backup/import", post(handlers::import_backup))
        .route("/backup/remote/push", post(handlers::push_backup))
        .route("/backup/remote/pull", post(handlers::pull_backup))
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ordersflow_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting OrdersFlow API...");

    // Load configuration
    let config = Config::from_env();
    tracing::info!(
        remote_backup = config.remote_sync_enabled(),
        "Configuration loaded"
    );

    // Open local storage
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    let snapshot_store = Arc::new(SqlSnapshotStore::new(db));
    snapshot_store
        .ensure_schema()
        .await
        .context("Failed to create snapshot table")?;
    tracing::info!("Database connected");

    // Seed the store from the persisted blobs
    let snapshot = snapshot_store
        .load_snapshot()
        .await
        .context("Failed to load stored data")?;
    tracing::info!(
        products = snapshot.products.len(),
        orders = snapshot.orders.len(),
        "Loaded stored data"
    );

    let (changes_tx, changes_rx) = mpsc::unbounded_channel();
    let store = Arc::new(RwLock::new(
        EntityStore::new(snapshot).with_notifier(changes_tx),
    ));
    spawn_persistence_worker(snapshot_store, changes_rx);

    // Remote backup is optional
    let remote: Option<Arc<dyn RemoteSync>> = match &config.sheets_webhook_url {
        Some(url) => Some(Arc::new(SheetsClient::new(url.clone())) as Arc<dyn RemoteSync>),
        None => {
            tracing::warn!("SHEETS_WEBHOOK_URL not set, remote backup disabled");
            None
        }
    };

    // Create app state
    let state = AppState {
        store_service: Arc::new(StoreService::new(store.clone())),
        backup_service: Arc::new(BackupService::new(store, remote)),
    };

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.bind_addr, config.port)
        .parse()
        .context("Invalid BIND_ADDR/PORT")?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind listener")?;
    axum::serve(listener, router(state))
        .await
        .context("Server error")?;

    Ok(())
}
