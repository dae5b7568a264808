//! Local persistence port
//!
//! The two collections are stored as independent blobs under fixed keys.
//! They are read once at startup and overwritten after every mutation.

use async_trait::async_trait;

use crate::domain::entities::{Order, Product, Snapshot};
use crate::error::DomainError;

/// Storage key of the product blob
pub const PRODUCTS_KEY: &str = "ordersflow_products";

/// Storage key of the order blob
pub const ORDERS_KEY: &str = "ordersflow_orders";

/// Port for loading and saving the persisted collections
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the product blob. A missing blob is an empty collection.
    async fn load_products(&self) -> Result<Vec<Product>, DomainError>;

    /// Load the order blob. A missing blob is an empty collection.
    async fn load_orders(&self) -> Result<Vec<Order>, DomainError>;

    /// Overwrite the product blob
    async fn save_products(&self, products: &[Product]) -> Result<(), DomainError>;

    /// Overwrite the order blob
    async fn save_orders(&self, orders: &[Order]) -> Result<(), DomainError>;

    /// Load both blobs
    async fn load_snapshot(&self) -> Result<Snapshot, DomainError> {
        let products = self.load_products().await?;
        let orders = self.load_orders().await?;
        Ok(Snapshot::new(products, orders))
    }
}
