//! Aggregation engine
//!
//! Derived views over a snapshot: filtered order lists and per-product totals.
//! Everything here is pure and recomputed from scratch on every call.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Order, Product, ProductId};

/// Label shown for an item whose product no longer exists
pub const REMOVED_PRODUCT_LABEL: &str = "Removed product";

/// Filters for the order list. Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OrderFilter {
    /// Case-insensitive substring of a product name
    #[serde(default)]
    pub product: Option<String>,
    /// Exact `YYYY-MM-DD` delivery date
    #[serde(default)]
    pub date: Option<String>,
}

impl OrderFilter {
    #[cfg(test)]
    pub fn new(product: Option<String>, date: Option<String>) -> Self {
        Self { product, date }
    }

    #[cfg(test)]
    pub fn by_product(product: impl Into<String>) -> Self {
        Self::new(Some(product.into()), None)
    }

    #[cfg(test)]
    pub fn by_date(date: impl Into<String>) -> Self {
        Self::new(None, Some(date.into()))
    }

    fn product_needle(&self) -> Option<String> {
        self.product
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(str::to_lowercase)
    }

    fn date_value(&self) -> Option<&str> {
        self.date.as_deref().filter(|d| !d.is_empty())
    }
}

/// Total quantity ordered for one product name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductTotal {
    pub name: String,
    pub total: u64,
}

/// Find a product by id. A dangling reference is `None`, not an error.
pub fn find_product<'a>(products: &'a [Product], id: &ProductId) -> Option<&'a Product> {
    products.iter().find(|p| &p.id == id)
}

/// Display name for a product reference, with a placeholder for dangling ones
pub fn product_label<'a>(products: &'a [Product], id: &ProductId) -> &'a str {
    find_product(products, id)
        .map(|p| p.name.as_str())
        .unwrap_or(REMOVED_PRODUCT_LABEL)
}

/// One-line summary of an order's items, e.g. `3x Panetone, 1x Removed product`
pub fn describe_items(order: &Order, products: &[Product]) -> String {
    order
        .items
        .iter()
        .map(|item| format!("{}x {}", item.quantity, product_label(products, &item.product_id)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a delivery date as a calendar date.
///
/// Accepts `YYYY-MM-DD` and, for data that went through a spreadsheet,
/// full RFC 3339 timestamps.
pub fn parse_delivery_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Orders passing both filters, ascending by delivery date.
///
/// The sort is stable; orders whose date doesn't parse go last.
pub fn filter_orders<'a>(
    orders: &'a [Order],
    products: &[Product],
    filter: &OrderFilter,
) -> Vec<&'a Order> {
    let names = name_index(products);
    let needle = filter.product_needle();
    let date = filter.date_value();

    let mut matched: Vec<&Order> = orders
        .iter()
        .filter(|order| date.map_or(true, |d| order.delivery_date == d))
        .filter(|order| {
            needle.as_deref().map_or(true, |needle| {
                order.items.iter().any(|item| {
                    names
                        .get(item.product_id.as_str())
                        .is_some_and(|p| p.name_contains(needle))
                })
            })
        })
        .collect();

    matched.sort_by_key(|order| {
        let date = parse_delivery_date(&order.delivery_date);
        (date.is_none(), date)
    });
    matched
}

/// Sum item quantities per product name, largest total first.
///
/// Keyed by name, not id: two products sharing a name merge into one line.
/// Items whose product no longer exists are left out. Ties keep the order
/// in which the names were first seen.
pub fn compute_totals(orders: &[&Order], products: &[Product]) -> Vec<ProductTotal> {
    let names = name_index(products);
    let mut totals: Vec<ProductTotal> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for item in orders.iter().flat_map(|order| &order.items) {
        let Some(product) = names.get(item.product_id.as_str()) else {
            continue;
        };
        let position = *positions.entry(product.name.as_str()).or_insert_with(|| {
            totals.push(ProductTotal {
                name: product.name.clone(),
                total: 0,
            });
            totals.len() - 1
        });
        totals[position].total += u64::from(item.quantity);
    }

    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// Id lookup where the first product with a given id wins
fn name_index(products: &[Product]) -> HashMap<&str, &Product> {
    let mut index = HashMap::with_capacity(products.len());
    for product in products {
        index.entry(product.id.as_str()).or_insert(product);
    }
    index
}
