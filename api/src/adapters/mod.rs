//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod sheets;
pub mod sql;

pub use sheets::SheetsClient;
pub use sql::SqlSnapshotStore;
