//! HTTP client for the OrdersFlow API
//!
//! Every call returns the response body as text so tools can hand it to the
//! model unchanged. The order board is requested as plain text; everything
//! else comes back as JSON.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Serialize;

/// HTTP client for communicating with the OrdersFlow API
#[derive(Clone)]
pub struct OrdersFlowClient {
    client: reqwest::Client,
    base_url: String,
}

impl OrdersFlowClient {
    /// Create a new client from environment variables
    ///
    /// Optional env vars:
    /// - ORDERSFLOW_API_URL: Base URL of the API (default http://localhost:8080)
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("ORDERSFLOW_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        Self::new(&base_url)
    }

    /// Create a new client with explicit configuration
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- Orders ---

    /// Get the order board as readable text
    pub async fn get_orders(&self, product: Option<&str>, date: Option<&str>) -> Result<String> {
        self.get_text("/orders", &OrderQuery { product, date }).await
    }

    /// Get per-product totals for the filtered orders
    pub async fn get_totals(&self, product: Option<&str>, date: Option<&str>) -> Result<String> {
        self.get_text("/orders/totals", &OrderQuery { product, date })
            .await
    }

    pub async fn create_order(&self, order: &CreateOrderRequest) -> Result<String> {
        self.post_text("/orders", order).await
    }

    /// Add a product line to an order, or bump its quantity
    pub async fn add_item(&self, order_id: &str, product_id: &str, quantity: u32) -> Result<String> {
        self.post_text(
            &format!("/orders/{}/items", order_id),
            &AddItemRequest {
                product_id: product_id.to_string(),
                quantity,
            },
        )
        .await
    }

    pub async fn delete_order(&self, order_id: &str) -> Result<String> {
        self.delete_text(&format!("/orders/{}", order_id)).await
    }

    // --- Products ---

    pub async fn get_products(&self) -> Result<String> {
        self.get_text("/products", &NoQuery {}).await
    }

    pub async fn add_product(&self, name: &str) -> Result<String> {
        self.post_text(
            "/products",
            &ProductRequest {
                name: name.to_string(),
            },
        )
        .await
    }

    pub async fn rename_product(&self, product_id: &str, name: &str) -> Result<String> {
        self.patch_text(
            &format!("/products/{}", product_id),
            &ProductRequest {
                name: name.to_string(),
            },
        )
        .await
    }

    pub async fn delete_product(&self, product_id: &str) -> Result<String> {
        self.delete_text(&format!("/products/{}", product_id))
            .await
    }

    // --- Backup ---

    pub async fn share_link(&self) -> Result<String> {
        self.get_text("/backup/share", &NoQuery {}).await
    }

    pub async fn push_backup(&self) -> Result<String> {
        self.post_text("/backup/remote/push", &serde_json::json!({}))
            .await
    }

    pub async fn pull_backup(&self) -> Result<String> {
        self.post_text("/backup/remote/pull", &serde_json::json!({}))
            .await
    }

    // --- Internal helpers ---

    async fn get_text<Q: Serialize>(&self, path: &str, query: &Q) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .header("Accept", "text/plain")
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to GET {}", path))?;

        handle_text_response(response).await
    }

    async fn post_text<T: Serialize>(&self, path: &str, body: &T) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .header("Accept", "text/plain")
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to POST {}", path))?;

        handle_text_response(response).await
    }

    async fn patch_text<T: Serialize>(&self, path: &str, body: &T) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .patch(&url)
            .header("Accept", "text/plain")
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to PATCH {}", path))?;

        handle_text_response(response).await
    }

    async fn delete_text(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("Failed to DELETE {}", path))?;

        handle_text_response(response).await
    }
}

async fn handle_text_response(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    if !status.is_success() {
        anyhow::bail!("API error ({}): {}", status, body);
    }

    Ok(body)
}

// --- Request Types ---

#[derive(Debug, Serialize)]
struct OrderQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    product: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct NoQuery {}

#[derive(Debug, Serialize)]
struct ProductRequest {
    name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddItemRequest {
    product_id: String,
    quantity: u32,
}

/// Body of POST /orders
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub delivery_date: String,
    pub items: Vec<OrderLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: u32,
}
