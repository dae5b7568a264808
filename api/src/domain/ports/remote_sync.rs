//! Remote backup port
//!
//! The remote side stores the last full payload it received and hands it back
//! verbatim. Every push is a full-snapshot replace, never a partial update.

use async_trait::async_trait;

use crate::error::SyncError;

/// Port for the spreadsheet-backed backup endpoint
#[async_trait]
pub trait RemoteSync: Send + Sync {
    /// Send a complete payload, replacing whatever the remote holds
    async fn push(&self, payload: &str) -> Result<(), SyncError>;

    /// Fetch the last payload the remote stored
    async fn pull(&self) -> Result<String, SyncError>;
}
