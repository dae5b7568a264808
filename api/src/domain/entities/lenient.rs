//! Lenient field decoders
//!
//! Stored and imported payloads are taken as-is: the spreadsheet round-trip
//! turns ids into numbers, empty cells into nulls, and so on. These helpers
//! accept whatever scalar shows up instead of rejecting the whole payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::OrderItem;

/// Decode any JSON scalar as a string. `null` becomes empty.
pub fn string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::from(value_to_string(value)))
}

/// Decode a quantity from a number or a numeric string. Anything else is 0,
/// which the store treats as invalid if the order is ever edited.
///
/// Quantities are `u32`: larger stored values clamp to `u32::MAX` and
/// fractions truncate, so such a payload does not re-export byte for byte.
pub fn quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_quantity(&value))
}

/// Decode an item list, skipping entries that are not objects.
/// A non-array value decodes as an empty list.
pub fn items<'de, D>(deserializer: D) -> Result<Vec<OrderItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(entries) = value else {
        return Ok(Vec::new());
    };

    Ok(entries
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn value_to_quantity(value: &Value) -> u32 {
    match value {
        Value::Number(n) => {
            if let Some(q) = n.as_u64() {
                u32::try_from(q).unwrap_or(u32::MAX)
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.trunc().min(u32::MAX as f64) as u32)
                    .unwrap_or(0)
            }
        }
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
