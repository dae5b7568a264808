//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use crate::domain::entities::{Order, OrderId, OrderItem, Product, Snapshot};

/// Create a test product
pub fn test_product(id: &str, name: &str) -> Product {
    Product::new(id, name)
}

/// Create a test order with the given `(product id, quantity)` lines
pub fn test_order(id: &str, customer: &str, date: &str, items: &[(&str, u32)]) -> Order {
    Order {
        id: OrderId::from(id),
        customer_name: customer.to_string(),
        delivery_date: date.to_string(),
        items: items
            .iter()
            .map(|(product_id, quantity)| OrderItem::new(*product_id, *quantity))
            .collect(),
        observations: String::new(),
    }
}

/// A small realistic snapshot.
///
/// Both orders use `p1`; the second one also points at a product that no
/// longer exists, as imported data may.
pub fn test_snapshot() -> Snapshot {
    Snapshot::new(
        vec![
            test_product("p1", "Panetone"),
            test_product("p2", "Chocotone"),
        ],
        vec![
            Order {
                observations: "sem passas".to_string(),
                ..test_order("o1", "Maria", "2024-12-20", &[("p1", 3)])
            },
            test_order("o2", "João", "2024-12-24", &[("p1", 1), ("gone", 2)]),
        ],
    )
}
