//! Backup codec
//!
//! Converts a snapshot to and from the portable JSON payload
//! `{ "products": [...], "orders": [...] }`. The payload string is the whole
//! contract with the spreadsheet endpoint and with manual exports.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::entities::{Order, Product, Snapshot};
use crate::error::DomainError;

/// Fixed text put in front of the payload in a share message
pub const SHARE_PREAMBLE: &str = "Backup OrdersFlow:\n\n";

/// Messaging app link target for manual export
pub const SHARE_BASE_URL: &str = "https://wa.me/";

/// Serialize a snapshot to the payload string. Field values are not transformed.
pub fn export_payload(snapshot: &Snapshot) -> Result<String, DomainError> {
    serde_json::to_string(snapshot).map_err(|e| DomainError::Internal(e.to_string()))
}

/// Decode an inbound payload.
///
/// Fails with `Parse` if the text isn't JSON and with `Shape` if `products`
/// or `orders` is missing or not an array. Individual entries are not
/// validated: dangling references and sloppy fields come through as-is.
pub fn import_payload(text: &str) -> Result<Snapshot, DomainError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| DomainError::Parse(e.to_string()))?;

    let products = required_array(&value, "products")?;
    let orders = required_array(&value, "orders")?;

    Ok(Snapshot::new(
        decode_entries::<Product>(products, "products"),
        decode_entries::<Order>(orders, "orders"),
    ))
}

/// Share link carrying the preamble and the payload as message text
pub fn share_link(payload: &str) -> String {
    let text = format!("{}{}", SHARE_PREAMBLE, payload);
    format!("{}?text={}", SHARE_BASE_URL, urlencoding::encode(&text))
}

fn required_array<'a>(value: &'a Value, key: &str) -> Result<&'a [Value], DomainError> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| DomainError::Shape(format!("expected a `{}` array", key)))
}

/// Decode every object entry; anything that isn't an object is skipped
fn decode_entries<T: DeserializeOwned>(entries: &[Value], collection: &str) -> Vec<T> {
    let mut decoded = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if !entry.is_object() {
            tracing::warn!(collection, index, "Skipping non-object entry in payload");
            continue;
        }
        match serde_json::from_value(entry.clone()) {
            Ok(item) => decoded.push(item),
            Err(e) => {
                tracing::warn!(collection, index, error = %e, "Skipping undecodable entry in payload")
            }
        }
    }
    decoded
}
