//! Order domain entity
//!
//! A customer order for a delivery date, made of product lines.

use serde::{Deserialize, Deserializer, Serialize};

use super::{lenient, ProductId};

/// Unique identifier for an order
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient::string(deserializer)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One product line of an order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub product_id: ProductId,
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub quantity: u32,
}

impl OrderItem {
    pub fn new(product_id: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// A customer order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: OrderId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub customer_name: String,
    /// `YYYY-MM-DD`
    #[serde(default, deserialize_with = "lenient::string")]
    pub delivery_date: String,
    #[serde(default, deserialize_with = "lenient::items")]
    pub items: Vec<OrderItem>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub observations: String,
}

impl Order {
    pub fn references(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.product_id == product_id)
    }

    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// Everything about an order except its id.
///
/// Used both to create and to edit: an edit replaces all of these fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub delivery_date: String,
    #[serde(default, deserialize_with = "strict_items")]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub observations: String,
}

/// Draft lines come from the order form, so quantities must be whole numbers.
/// A missing quantity decodes as 0 and is rejected by validation.
fn strict_items<'de, D>(deserializer: D) -> Result<Vec<OrderItem>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct DraftLine {
        #[serde(default)]
        product_id: ProductId,
        #[serde(default)]
        quantity: u32,
    }

    let lines = Vec::<DraftLine>::deserialize(deserializer)?;
    Ok(lines
        .into_iter()
        .map(|line| OrderItem {
            product_id: line.product_id,
            quantity: line.quantity,
        })
        .collect())
}

impl OrderDraft {
    pub fn new(customer_name: impl Into<String>, delivery_date: impl Into<String>) -> Self {
        Self {
            customer_name: customer_name.into(),
            delivery_date: delivery_date.into(),
            ..Self::default()
        }
    }

    pub fn with_item(mut self, product_id: impl Into<ProductId>, quantity: u32) -> Self {
        self.add_item(product_id.into(), quantity);
        self
    }

    pub fn with_observations(mut self, observations: impl Into<String>) -> Self {
        self.observations = observations.into();
        self
    }

    /// Add a line, or bump the quantity of the line already holding this product
    pub fn add_item(&mut self, product_id: ProductId, quantity: u32) {
        match self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => self.items.push(OrderItem {
                product_id,
                quantity,
            }),
        }
    }

    /// Remove the line for a product. Returns false if there was none.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.product_id != product_id);
        self.items.len() != before
    }

    /// Collapse duplicate product lines, keeping first-seen order
    pub fn merge_duplicate_items(&mut self) {
        let items = std::mem::take(&mut self.items);
        for item in items {
            self.add_item(item.product_id, item.quantity);
        }
    }

    pub fn into_order(self, id: OrderId) -> Order {
        Order {
            id,
            customer_name: self.customer_name,
            delivery_date: self.delivery_date,
            items: self.items,
            observations: self.observations,
        }
    }
}

impl From<&Order> for OrderDraft {
    fn from(order: &Order) -> Self {
        Self {
            customer_name: order.customer_name.clone(),
            delivery_date: order.delivery_date.clone(),
            items: order.items.clone(),
            observations: order.observations.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_item_merges_duplicate_product() {
        let mut draft = OrderDraft::new("Maria", "2024-12-20");
        draft.add_item(ProductId::from("p1"), 3);
        draft.add_item(ProductId::from("p2"), 1);
        draft.add_item(ProductId::from("p1"), 2);

        assert_eq!(
            draft.items,
            vec![OrderItem::new("p1", 5), OrderItem::new("p2", 1)]
        );
    }

    #[test]
    fn remove_item_reports_whether_removed() {
        let mut draft = OrderDraft::new("Maria", "2024-12-20").with_item("p1", 1);
        assert!(!draft.remove_item(&ProductId::from("p9")));
        assert!(draft.remove_item(&ProductId::from("p1")));
        assert!(draft.items.is_empty());
    }

    #[test]
    fn merge_duplicate_items_keeps_first_position() {
        let mut draft = OrderDraft {
            items: vec![
                OrderItem::new("p2", 1),
                OrderItem::new("p1", 1),
                OrderItem::new("p2", 4),
            ],
            ..OrderDraft::default()
        };
        draft.merge_duplicate_items();
        assert_eq!(
            draft.items,
            vec![OrderItem::new("p2", 5), OrderItem::new("p1", 1)]
        );
    }

    #[test]
    fn order_uses_camel_case_on_the_wire() {
        let order = OrderDraft::new("Ana", "2024-12-24")
            .with_item("p1", 2)
            .into_order(OrderId::from("o1"));
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["customerName"], "Ana");
        assert_eq!(json["deliveryDate"], "2024-12-24");
        assert_eq!(json["items"][0]["productId"], "p1");
        assert_eq!(json["items"][0]["quantity"], 2);
        assert_eq!(json["observations"], "");
    }

    #[test]
    fn order_decodes_sloppy_spreadsheet_rows() {
        let order: Order = serde_json::from_str(
            r#"{"id": 17, "customerName": "Ana", "deliveryDate": "2024-12-24",
                "items": [{"productId": 5, "quantity": "2"}, "junk"],
                "observations": null}"#,
        )
        .unwrap();

        assert_eq!(order.id, OrderId::from("17"));
        assert_eq!(order.items, vec![OrderItem::new("5", 2)]);
        assert_eq!(order.observations, "");
    }

    #[test]
    fn order_with_non_array_items_decodes_empty() {
        let order: Order = serde_json::from_str(r#"{"id": "o1", "items": "oops"}"#).unwrap();
        assert!(order.items.is_empty());
    }

    #[test]
    fn draft_rejects_non_integer_quantities() {
        let fractional = r#"{"customerName": "Ana", "deliveryDate": "2024-12-20",
            "items": [{"productId": "p1", "quantity": 2.9}]}"#;
        assert!(serde_json::from_str::<OrderDraft>(fractional).is_err());

        let textual = r#"{"customerName": "Ana", "deliveryDate": "2024-12-20",
            "items": [{"productId": "p1", "quantity": "3"}]}"#;
        assert!(serde_json::from_str::<OrderDraft>(textual).is_err());

        let negative = r#"{"customerName": "Ana", "deliveryDate": "2024-12-20",
            "items": [{"productId": "p1", "quantity": -1}]}"#;
        assert!(serde_json::from_str::<OrderDraft>(negative).is_err());
    }

    #[test]
    fn draft_decodes_whole_quantities() {
        let draft: OrderDraft = serde_json::from_str(
            r#"{"customerName": "Ana", "deliveryDate": "2024-12-20",
                "items": [{"productId": "p1", "quantity": 3}, {"productId": "p2"}]}"#,
        )
        .unwrap();
        assert_eq!(
            draft.items,
            vec![OrderItem::new("p1", 3), OrderItem::new("p2", 0)]
        );
    }

    #[test]
    fn order_references_and_totals() {
        let order = OrderDraft::new("Ana", "2024-12-24")
            .with_item("p1", 2)
            .with_item("p2", 3)
            .into_order(OrderId::from("o1"));

        assert!(order.references(&ProductId::from("p2")));
        assert!(!order.references(&ProductId::from("p3")));
        assert_eq!(order.total_quantity(), 5);
    }

    #[test]
    fn draft_from_order_drops_only_the_id() {
        let order = OrderDraft::new("Ana", "2024-12-24")
            .with_item("p1", 2)
            .with_observations("sem nozes")
            .into_order(OrderId::from("o1"));
        let draft = OrderDraft::from(&order);
        assert_eq!(draft.into_order(OrderId::from("o1")), order);
    }
}
