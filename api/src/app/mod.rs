//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between the entity store, ports, and external systems.

pub mod aggregation;
pub mod backup_codec;
pub mod backup_service;
pub mod entity_store;
pub mod persistence_worker;
pub mod store_service;

pub use aggregation::{OrderFilter, ProductTotal};
pub use backup_service::{BackupService, ImportSummary};
pub use entity_store::{EntityStore, StoreChange};
pub use persistence_worker::spawn_persistence_worker;
pub use store_service::{OrderBoard, OrderItemView, OrderView, SharedStore, StoreService};
