//! Backup service
//!
//! Export, import and the spreadsheet round-trip. Remote calls run without
//! holding the store lock: the snapshot is exported first, and a pulled
//! payload is decoded before the lock is taken to replace the store.

use std::sync::Arc;

use serde::Serialize;

use crate::app::backup_codec::{export_payload, import_payload, share_link};
use crate::app::store_service::SharedStore;
use crate::domain::entities::Snapshot;
use crate::domain::ports::RemoteSync;
use crate::error::{AppError, SyncError};

/// What an import or pull put into the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub products: usize,
    pub orders: usize,
}

/// Service for backup use cases
pub struct BackupService {
    store: SharedStore,
    remote: Option<Arc<dyn RemoteSync>>,
}

impl BackupService {
    pub fn new(store: SharedStore, remote: Option<Arc<dyn RemoteSync>>) -> Self {
        Self { store, remote }
    }

    /// Current snapshot as a payload string
    pub fn export(&self) -> Result<String, AppError> {
        let snapshot = self.snapshot()?;
        Ok(export_payload(&snapshot)?)
    }

    /// Share link for the current payload
    pub fn share_link(&self) -> Result<String, AppError> {
        Ok(share_link(&self.export()?))
    }

    /// Decode a payload and replace the store with it. The store is left
    /// untouched when decoding fails.
    pub fn import(&self, text: &str) -> Result<ImportSummary, AppError> {
        let snapshot = import_payload(text)?;
        self.replace(snapshot)
    }

    /// Send the full current payload to the spreadsheet
    pub async fn push_remote(&self) -> Result<(), AppError> {
        let remote = self.remote()?;
        let payload = self.export()?;

        remote.push(&payload).await?;
        tracing::info!(bytes = payload.len(), "Backup pushed to spreadsheet");
        Ok(())
    }

    /// Fetch the spreadsheet's payload and replace the store with it
    pub async fn pull_remote(&self) -> Result<ImportSummary, AppError> {
        let remote = self.remote()?;
        let text = remote.pull().await?;

        let summary = self.import(&text)?;
        tracing::info!(
            products = summary.products,
            orders = summary.orders,
            "Backup restored from spreadsheet"
        );
        Ok(summary)
    }

    fn remote(&self) -> Result<Arc<dyn RemoteSync>, AppError> {
        self.remote
            .clone()
            .ok_or(AppError::Sync(SyncError::NotConfigured))
    }

    fn snapshot(&self) -> Result<Snapshot, AppError> {
        let store = self
            .store
            .read()
            .map_err(|_| AppError::Internal("entity store lock poisoned".to_string()))?;
        Ok(store.snapshot())
    }

    fn replace(&self, snapshot: Snapshot) -> Result<ImportSummary, AppError> {
        let summary = ImportSummary {
            products: snapshot.products.len(),
            orders: snapshot.orders.len(),
        };
        let mut store = self
            .store
            .write()
            .map_err(|_| AppError::Internal("entity store lock poisoned".to_string()))?;
        store.replace_all(snapshot);
        Ok(summary)
    }
}
