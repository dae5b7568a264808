//! Persistence worker
//!
//! Background task that writes store changes through the [`SnapshotStore`]
//! port. Changes queued while a write is in flight are coalesced so only the
//! latest value of each collection is written.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

use crate::app::entity_store::StoreChange;
use crate::domain::entities::{Order, Product};
use crate::domain::ports::SnapshotStore;

/// Latest unsaved value per collection
#[derive(Debug, Default)]
struct PendingWrites {
    products: Option<Vec<Product>>,
    orders: Option<Vec<Order>>,
}

impl PendingWrites {
    fn absorb(&mut self, change: StoreChange) {
        match change {
            StoreChange::Products(products) => self.products = Some(products),
            StoreChange::Orders(orders) => self.orders = Some(orders),
        }
    }
}

/// Spawn the worker on the current runtime
pub fn spawn_persistence_worker(
    store: Arc<dyn SnapshotStore>,
    changes: UnboundedReceiver<StoreChange>,
) -> JoinHandle<()> {
    tokio::spawn(run_persistence(store, changes))
}

/// Drain the channel until every sender is gone.
///
/// Save failures are logged and the worker keeps going; the next change to
/// the same collection writes the full value again.
pub async fn run_persistence(
    store: Arc<dyn SnapshotStore>,
    mut changes: UnboundedReceiver<StoreChange>,
) {
    tracing::debug!("Persistence worker started");

    while let Some(first) = changes.recv().await {
        let mut pending = PendingWrites::default();
        pending.absorb(first);
        while let Ok(next) = changes.try_recv() {
            pending.absorb(next);
        }

        if let Some(products) = pending.products {
            match store.save_products(&products).await {
                Ok(()) => tracing::debug!(count = products.len(), "Products saved"),
                Err(e) => tracing::error!(error = %e, "Failed to save products"),
            }
        }
        if let Some(orders) = pending.orders {
            match store.save_orders(&orders).await {
                Ok(()) => tracing::debug!(count = orders.len(), "Orders saved"),
                Err(e) => tracing::error!(error = %e, "Failed to save orders"),
            }
        }
    }

    tracing::debug!("Persistence worker stopped");
}
