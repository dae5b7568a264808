//! Backup handlers
//!
//! Endpoints for export, import and the spreadsheet round-trip.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::app::ImportSummary;
use crate::error::AppError;
use crate::AppState;

/// Response for GET /backup/share
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub url: String,
}

/// Response for POST /backup/remote/push
#[derive(Debug, Serialize)]
pub struct PushResponse {
    pub result: &'static str,
}

/// GET /backup
///
/// The full payload, exactly as it would be imported.
pub async fn export_backup(State(state): State<AppState>) -> Result<Response, AppError> {
    let payload = state.backup_service.export()?;
    Ok(([(header::CONTENT_TYPE, "application/json")], payload).into_response())
}

/// GET /backup/share
pub async fn share_backup(State(state): State<AppState>) -> Result<Json<ShareResponse>, AppError> {
    let url = state.backup_service.share_link()?;
    Ok(Json(ShareResponse { url }))
}

/// POST /backup/import
///
/// Replace both collections with the posted payload (raw text body).
pub async fn import_backup(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportSummary>, AppError> {
    if body.trim().is_empty() {
        return Err(AppError::BadRequest("Backup payload is empty".to_string()));
    }
    let summary = state.backup_service.import(&body)?;
    tracing::info!(
        products = summary.products,
        orders = summary.orders,
        "Backup imported"
    );
    Ok(Json(summary))
}

/// POST /backup/remote/push
pub async fn push_backup(State(state): State<AppState>) -> Result<Json<PushResponse>, AppError> {
    state.backup_service.push_remote().await?;
    Ok(Json(PushResponse { result: "success" }))
}

/// POST /backup/remote/pull
pub async fn pull_backup(State(state): State<AppState>) -> Result<Json<ImportSummary>, AppError> {
    Ok(Json(state.backup_service.pull_remote().await?))
}
