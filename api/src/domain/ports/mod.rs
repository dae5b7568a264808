//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod remote_sync;
pub mod snapshot_store;

pub use remote_sync::RemoteSync;
pub use snapshot_store::{SnapshotStore, ORDERS_KEY, PRODUCTS_KEY};
