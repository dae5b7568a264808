//! Spreadsheet web-app client implementation
//!
//! The endpoint is a single URL. POST stores a full payload and answers
//! `{"result":"success"}`; GET returns the stored payload. Both report
//! failures with HTTP 200 and `{"result":"error","error":"..."}`.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::ports::RemoteSync;
use crate::error::SyncError;

/// Implementation of the remote backup client
pub struct SheetsClient {
    http: Client,
    webhook_url: String,
}

impl SheetsClient {
    pub fn new(webhook_url: String) -> Self {
        Self {
            http: Client::new(),
            webhook_url: webhook_url.trim().to_string(),
        }
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<String, SyncError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SyncError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        if let Some(message) = reported_failure(&body) {
            return Err(SyncError::Remote(message));
        }
        Ok(body)
    }
}

/// Status envelope the web-app wraps its answers in
#[derive(Deserialize)]
struct StatusEnvelope {
    result: String,
    #[serde(default)]
    error: Option<String>,
}

/// The failure message if the body is an error envelope
fn reported_failure(body: &str) -> Option<String> {
    let envelope: StatusEnvelope = serde_json::from_str(body).ok()?;
    if envelope.result != "error" {
        return None;
    }
    Some(
        envelope
            .error
            .unwrap_or_else(|| "spreadsheet reported an error".to_string()),
    )
}

#[async_trait]
impl RemoteSync for SheetsClient {
    async fn push(&self, payload: &str) -> Result<(), SyncError> {
        let response = self
            .http
            .post(&self.webhook_url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_string())
            .send()
            .await?;

        self.handle_response(response).await?;
        tracing::debug!(bytes = payload.len(), "Payload sent to spreadsheet");
        Ok(())
    }

    async fn pull(&self) -> Result<String, SyncError> {
        let response = self.http.get(&self.webhook_url).send().await?;
        let body = self.handle_response(response).await?;

        tracing::debug!(bytes = body.len(), "Payload fetched from spreadsheet");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_is_a_failure() {
        let body = r#"{"result":"error","error":"Exception: sheet locked"}"#;
        assert_eq!(
            reported_failure(body).as_deref(),
            Some("Exception: sheet locked")
        );
    }

    #[test]
    fn error_envelope_without_message_gets_default() {
        assert_eq!(
            reported_failure(r#"{"result":"error"}"#).as_deref(),
            Some("spreadsheet reported an error")
        );
    }

    #[test]
    fn success_envelope_is_not_a_failure() {
        assert!(reported_failure(r#"{"result":"success"}"#).is_none());
    }

    #[test]
    fn payload_is_not_a_failure() {
        assert!(reported_failure(r#"{"products":[],"orders":[]}"#).is_none());
        assert!(reported_failure("not json at all").is_none());
    }

    #[test]
    fn webhook_url_is_trimmed() {
        let client = SheetsClient::new("  https://script.example.com/exec \n".to_string());
        assert_eq!(client.webhook_url, "https://script.example.com/exec");
    }
}
