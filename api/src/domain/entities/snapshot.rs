//! Snapshot of both collections
//!
//! This is also the backup payload: `{ "products": [...], "orders": [...] }`.

use serde::{Deserialize, Serialize};

use super::{Order, Product};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
}

impl Snapshot {
    pub fn new(products: Vec<Product>, orders: Vec<Order>) -> Self {
        Self { products, orders }
    }
}
