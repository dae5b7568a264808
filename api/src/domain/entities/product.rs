//! Product domain entity
//!
//! A catalog entry that orders refer to by id.

use serde::{Deserialize, Deserializer, Serialize};

use super::lenient;

/// Unique identifier for a product
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        lenient::string(deserializer)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product in the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: ProductId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Case-insensitive substring match on the name
    pub fn name_contains(&self, needle_lowercase: &str) -> bool {
        self.name.to_lowercase().contains(needle_lowercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_serializes_flat() {
        let product = Product::new("p1", "Panetone");
        let json = serde_json::to_string(&product).unwrap();
        assert_eq!(json, r#"{"id":"p1","name":"Panetone"}"#);
    }

    #[test]
    fn product_accepts_numeric_id() {
        let product: Product = serde_json::from_str(r#"{"id": 1702934000000, "name": "Bolo"}"#).unwrap();
        assert_eq!(product.id, ProductId::from("1702934000000"));
        assert_eq!(product.name, "Bolo");
    }

    #[test]
    fn product_tolerates_missing_fields() {
        let product: Product = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(product, Product::default());
    }

    #[test]
    fn name_contains_is_case_insensitive() {
        let product = Product::new("p1", "Panetone Trufado");
        assert!(product.name_contains("trufado"));
        assert!(product.name_contains("pane"));
        assert!(!product.name_contains("chocotone"));
    }

    #[test]
    fn product_id_display() {
        assert_eq!(ProductId::from("abc").to_string(), "abc");
    }
}
