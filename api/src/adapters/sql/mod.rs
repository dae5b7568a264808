//! SQL adapters
//!
//! Implementation of the snapshot store using SeaORM. SQLite by default,
//! PostgreSQL works with the same code.

pub mod snapshot_store;

#[cfg(test)]
mod integration_tests;

pub use snapshot_store::SqlSnapshotStore;
