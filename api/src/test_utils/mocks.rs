//! Mock implementations of port traits
//!
//! In-memory implementations that can be configured for testing.
//! They keep what they receive so tests can verify behavior.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{Order, Product, Snapshot};
use crate::domain::ports::{RemoteSync, SnapshotStore};
use crate::error::{DomainError, SyncError};

// ============================================================================
// In-Memory Snapshot Store
// ============================================================================

#[derive(Default)]
pub struct InMemorySnapshotStore {
    products: Arc<RwLock<Option<Vec<Product>>>>,
    orders: Arc<RwLock<Option<Vec<Order>>>>,
    product_saves: AtomicUsize,
    order_saves: AtomicUsize,
    failing: AtomicBool,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate both blobs
    pub fn with_snapshot(self, snapshot: Snapshot) -> Self {
        *self.products.write().unwrap() = Some(snapshot.products);
        *self.orders.write().unwrap() = Some(snapshot.orders);
        self
    }

    /// Make every load and save fail with a storage error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn stored_products(&self) -> Option<Vec<Product>> {
        self.products.read().unwrap().clone()
    }

    pub fn stored_orders(&self) -> Option<Vec<Order>> {
        self.orders.read().unwrap().clone()
    }

    pub fn product_saves(&self) -> usize {
        self.product_saves.load(Ordering::SeqCst)
    }

    pub fn order_saves(&self) -> usize {
        self.order_saves.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::Storage("storage unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn load_products(&self) -> Result<Vec<Product>, DomainError> {
        self.check()?;
        Ok(self.products.read().unwrap().clone().unwrap_or_default())
    }

    async fn load_orders(&self) -> Result<Vec<Order>, DomainError> {
        self.check()?;
        Ok(self.orders.read().unwrap().clone().unwrap_or_default())
    }

    async fn save_products(&self, products: &[Product]) -> Result<(), DomainError> {
        self.check()?;
        *self.products.write().unwrap() = Some(products.to_vec());
        self.product_saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn save_orders(&self, orders: &[Order]) -> Result<(), DomainError> {
        self.check()?;
        *self.orders.write().unwrap() = Some(orders.to_vec());
        self.order_saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Mock Remote Sync
// ============================================================================

/// Remote that keeps the last pushed payload and hands it back on pull
#[derive(Default)]
pub struct MockRemoteSync {
    stored: RwLock<Option<String>>,
    pushes: RwLock<Vec<String>>,
    failing: AtomicBool,
}

impl MockRemoteSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a payload already stored remotely
    pub fn with_payload(payload: impl Into<String>) -> Self {
        let remote = Self::default();
        *remote.stored.write().unwrap() = Some(payload.into());
        remote
    }

    /// Make push and pull report a remote failure
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn pushed(&self) -> Vec<String> {
        self.pushes.read().unwrap().clone()
    }
}

#[async_trait]
impl RemoteSync for MockRemoteSync {
    async fn push(&self, payload: &str) -> Result<(), SyncError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SyncError::Remote("sheet is locked".to_string()));
        }
        self.pushes.write().unwrap().push(payload.to_string());
        *self.stored.write().unwrap() = Some(payload.to_string());
        Ok(())
    }

    async fn pull(&self) -> Result<String, SyncError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SyncError::Remote("sheet is locked".to_string()));
        }
        self.stored
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| SyncError::Remote("no backup stored".to_string()))
    }
}
