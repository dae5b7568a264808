//! OrdersFlow MCP Server implementation
//!
//! Wraps the OrdersFlow HTTP API as MCP tools. Failures come back as tool
//! errors with the API's message, never as protocol errors.

use crate::client::{CreateOrderRequest, OrderLine, OrdersFlowClient};
use anyhow::Result;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{
    handler::server::tool::ToolRouter,
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;

/// OrdersFlow MCP Server
///
/// Provides tools for managing products, orders and backups.
#[derive(Clone)]
pub struct OrdersFlowServer {
    client: OrdersFlowClient,
    tool_router: ToolRouter<Self>,
}

impl OrdersFlowServer {
    pub fn from_env() -> Result<Self> {
        let client = OrdersFlowClient::from_env()?;
        Ok(Self {
            client,
            tool_router: Self::tool_router(),
        })
    }
}

/// Turn a client result into a tool result. Empty bodies (204) get `done`.
fn respond(result: Result<String>, done: &str) -> Result<CallToolResult, McpError> {
    match result {
        Ok(body) if body.trim().is_empty() => {
            Ok(CallToolResult::success(vec![Content::text(done.to_string())]))
        }
        Ok(body) => Ok(CallToolResult::success(vec![Content::text(body)])),
        Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
    }
}

// --- Tool Parameter Types ---

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct OrderFilterParams {
    /// Case-insensitive part of a product name (optional)
    #[serde(default)]
    pub product: Option<String>,
    /// Exact delivery date, YYYY-MM-DD (optional)
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ProductNameParams {
    /// Product name
    pub name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RenameProductParams {
    /// Id of the product to rename
    pub product_id: String,
    /// New product name
    pub name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ProductIdParams {
    /// Product id
    pub product_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct OrderLineParams {
    /// Product id
    pub product_id: String,
    /// Quantity, at least 1
    pub quantity: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateOrderParams {
    /// Customer name
    pub customer_name: String,
    /// Delivery date, YYYY-MM-DD
    pub delivery_date: String,
    /// At least one product line
    pub items: Vec<OrderLineParams>,
    /// Free-text notes (optional)
    #[serde(default)]
    pub observations: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddItemParams {
    /// Order id
    pub order_id: String,
    /// Product id
    pub product_id: String,
    /// Quantity to add, at least 1
    pub quantity: u32,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct OrderIdParams {
    /// Order id
    pub order_id: String,
}

impl From<CreateOrderParams> for CreateOrderRequest {
    fn from(params: CreateOrderParams) -> Self {
        Self {
            customer_name: params.customer_name,
            delivery_date: params.delivery_date,
            items: params
                .items
                .into_iter()
                .map(|line| OrderLine {
                    product_id: line.product_id,
                    quantity: line.quantity,
                })
                .collect(),
            observations: params.observations,
        }
    }
}

#[tool_router]
impl OrdersFlowServer {
    // === Orders ===

    #[tool(
        description = "Get the order board: orders sorted by delivery date with product totals. Optionally filter by product name and delivery date. Call this first."
    )]
    async fn orders(
        &self,
        params: Parameters<OrderFilterParams>,
    ) -> Result<CallToolResult, McpError> {
        let filter = params.0;
        respond(
            self.client
                .get_orders(filter.product.as_deref(), filter.date.as_deref())
                .await,
            "No orders.",
        )
    }

    #[tool(description = "Get how many units of each product must be produced, largest first.")]
    async fn totals(
        &self,
        params: Parameters<OrderFilterParams>,
    ) -> Result<CallToolResult, McpError> {
        let filter = params.0;
        respond(
            self.client
                .get_totals(filter.product.as_deref(), filter.date.as_deref())
                .await,
            "No totals.",
        )
    }

    #[tool(description = "Create an order for a customer with one or more product lines.")]
    async fn create_order(
        &self,
        params: Parameters<CreateOrderParams>,
    ) -> Result<CallToolResult, McpError> {
        let request = CreateOrderRequest::from(params.0);
        respond(self.client.create_order(&request).await, "Order created.")
    }

    #[tool(description = "Add a product to an existing order. Adds to the quantity if it is already there.")]
    async fn add_item(&self, params: Parameters<AddItemParams>) -> Result<CallToolResult, McpError> {
        let p = params.0;
        respond(
            self.client
                .add_item(&p.order_id, &p.product_id, p.quantity)
                .await,
            "Item added.",
        )
    }

    #[tool(description = "Delete an order.")]
    async fn delete_order(
        &self,
        params: Parameters<OrderIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            self.client.delete_order(&params.0.order_id).await,
            "Order deleted.",
        )
    }

    // === Products ===

    #[tool(description = "List the product catalog with ids.")]
    async fn products(&self) -> Result<CallToolResult, McpError> {
        respond(self.client.get_products().await, "No products.")
    }

    #[tool(description = "Add a product to the catalog.")]
    async fn add_product(
        &self,
        params: Parameters<ProductNameParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            self.client.add_product(&params.0.name).await,
            "Product added.",
        )
    }

    #[tool(description = "Rename a product. Orders keep pointing at it.")]
    async fn rename_product(
        &self,
        params: Parameters<RenameProductParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            self.client
                .rename_product(&params.0.product_id, &params.0.name)
                .await,
            "No product with that id.",
        )
    }

    #[tool(description = "Delete a product. Refused while any order still uses it.")]
    async fn delete_product(
        &self,
        params: Parameters<ProductIdParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            self.client.delete_product(&params.0.product_id).await,
            "Product deleted.",
        )
    }

    // === Backup ===

    #[tool(description = "Get a WhatsApp link that shares the full backup as a message.")]
    async fn backup_share_link(&self) -> Result<CallToolResult, McpError> {
        respond(self.client.share_link().await, "No link.")
    }

    #[tool(description = "Send the full backup to the spreadsheet, replacing what it holds.")]
    async fn backup_push(&self) -> Result<CallToolResult, McpError> {
        respond(self.client.push_backup().await, "Backup sent.")
    }

    #[tool(
        description = "Restore from the spreadsheet. Replaces ALL local products and orders."
    )]
    async fn backup_pull(&self) -> Result<CallToolResult, McpError> {
        respond(self.client.pull_backup().await, "Backup restored.")
    }
}

#[tool_handler]
impl ServerHandler for OrdersFlowServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "ordersflow".into(),
                title: Some("OrdersFlow MCP Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                r#"OrdersFlow - Orders and production planning

SETUP: Set ORDERSFLOW_API_URL if the API is not on http://localhost:8080

WORKFLOW:
1. 'products' - See the catalog and product ids
2. 'create_order' - Record a customer order
3. 'orders' - See the board for a day or a product
4. 'totals' - See how much of each product to make

BACKUP:
- 'backup_push' sends everything to the spreadsheet
- 'backup_pull' replaces everything local with the spreadsheet copy
- 'backup_share_link' gives a WhatsApp link carrying the backup

TIPS:
- Products used by an order can't be deleted
- Dates are YYYY-MM-DD"#
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_filter_params_default_to_none() {
        let params: OrderFilterParams = serde_json::from_str("{}").unwrap();
        assert!(params.product.is_none());
        assert!(params.date.is_none());
    }

    #[test]
    fn test_order_filter_params_deserialize() {
        let json = r#"{"product": "panetone", "date": "2024-12-20"}"#;
        let params: OrderFilterParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.product.as_deref(), Some("panetone"));
        assert_eq!(params.date.as_deref(), Some("2024-12-20"));
    }

    #[test]
    fn test_rename_product_params_deserialize() {
        let json = r#"{"product_id": "p1", "name": "Panetone Trufado"}"#;
        let params: RenameProductParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.product_id, "p1");
        assert_eq!(params.name, "Panetone Trufado");
    }

    #[test]
    fn test_create_order_params_into_request() {
        let json = r#"{
            "customer_name": "Maria",
            "delivery_date": "2024-12-20",
            "items": [{"product_id": "p1", "quantity": 3}]
        }"#;
        let params: CreateOrderParams = serde_json::from_str(json).unwrap();
        let request = CreateOrderRequest::from(params);

        assert_eq!(request.customer_name, "Maria");
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].product_id, "p1");
        assert_eq!(request.items[0].quantity, 3);
        assert!(request.observations.is_none());
    }

    #[test]
    fn test_add_item_params_deserialize() {
        let json = r#"{"order_id": "o1", "product_id": "p2", "quantity": 1}"#;
        let params: AddItemParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.order_id, "o1");
        assert_eq!(params.product_id, "p2");
        assert_eq!(params.quantity, 1);
    }

    #[test]
    fn test_respond_maps_empty_body_and_errors() {
        let result = respond(Ok(String::new()), "Order deleted.").unwrap();
        assert_ne!(result.is_error, Some(true));

        let result = respond(Err(anyhow::anyhow!("API error (409)")), "unused").unwrap();
        assert_eq!(result.is_error, Some(true));
    }
}
