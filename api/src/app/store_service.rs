//! Store service
//!
//! Use cases over the shared entity store: catalog and order management plus
//! the order board shown to the operator. The board is the one-request view
//! of the business: filtered orders with resolved item names and totals.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use crate::app::aggregation::{
    compute_totals, describe_items, filter_orders, find_product, product_label, OrderFilter,
    ProductTotal,
};
use crate::app::entity_store::EntityStore;
use crate::domain::entities::{Order, OrderDraft, OrderId, Product, ProductId};
use crate::error::{AppError, DomainError};

/// Entity store shared between handlers and services
pub type SharedStore = Arc<RwLock<EntityStore>>;

/// Filtered orders plus the totals computed over exactly those orders
#[derive(Debug, Clone, Serialize)]
pub struct OrderBoard {
    pub orders: Vec<OrderView>,
    pub totals: Vec<ProductTotal>,
}

/// An order with its product references resolved for display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: String,
    pub customer_name: String,
    pub delivery_date: String,
    pub observations: String,
    pub items: Vec<OrderItemView>,
    /// e.g. "3x Panetone, 1x Removed product"
    pub summary: String,
    pub total_quantity: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub product_id: String,
    /// `None` when the product no longer exists
    pub product_name: Option<String>,
    pub label: String,
    pub quantity: u32,
}

impl OrderView {
    pub fn build(order: &Order, products: &[Product]) -> Self {
        let items = order
            .items
            .iter()
            .map(|item| OrderItemView {
                product_id: item.product_id.to_string(),
                product_name: find_product(products, &item.product_id).map(|p| p.name.clone()),
                label: product_label(products, &item.product_id).to_string(),
                quantity: item.quantity,
            })
            .collect();

        Self {
            id: order.id.to_string(),
            customer_name: order.customer_name.clone(),
            delivery_date: order.delivery_date.clone(),
            observations: order.observations.clone(),
            items,
            summary: describe_items(order, products),
            total_quantity: order.total_quantity(),
        }
    }
}

/// Service for catalog and order use cases
pub struct StoreService {
    store: SharedStore,
}

impl StoreService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    // --- Products ---

    pub fn list_products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.read()?.products().to_vec())
    }

    pub fn add_product(&self, name: &str) -> Result<Product, AppError> {
        Ok(self.write()?.add_product(name)?)
    }

    /// Returns `None` if no product has this id
    pub fn rename_product(&self, id: &ProductId, name: &str) -> Result<Option<Product>, AppError> {
        Ok(self.write()?.update_product(id, name)?)
    }

    pub fn delete_product(&self, id: &ProductId) -> Result<bool, AppError> {
        Ok(self.write()?.delete_product(id)?)
    }

    // --- Orders ---

    /// Filtered, date-sorted orders and their totals
    pub fn board(&self, filter: &OrderFilter) -> Result<OrderBoard, AppError> {
        let store = self.read()?;
        let products = store.products();
        let matched = filter_orders(store.orders(), products, filter);

        Ok(OrderBoard {
            orders: matched
                .iter()
                .map(|order| OrderView::build(order, products))
                .collect(),
            totals: compute_totals(&matched, products),
        })
    }

    pub fn totals(&self, filter: &OrderFilter) -> Result<Vec<ProductTotal>, AppError> {
        let store = self.read()?;
        let matched = filter_orders(store.orders(), store.products(), filter);
        Ok(compute_totals(&matched, store.products()))
    }

    pub fn order(&self, id: &OrderId) -> Result<Option<OrderView>, AppError> {
        let store = self.read()?;
        Ok(store
            .order(id)
            .map(|order| OrderView::build(order, store.products())))
    }

    pub fn add_order(&self, draft: OrderDraft) -> Result<OrderView, AppError> {
        let mut store = self.write()?;
        let order = store.add_order(draft)?;
        Ok(OrderView::build(&order, store.products()))
    }

    /// Returns `None` if no order has this id
    pub fn update_order(
        &self,
        id: &OrderId,
        draft: OrderDraft,
    ) -> Result<Option<OrderView>, AppError> {
        let mut store = self.write()?;
        let updated = store.update_order(id, draft)?;
        Ok(updated.map(|order| OrderView::build(&order, store.products())))
    }

    /// Fails with `NotFound` if the order doesn't exist
    pub fn add_order_item(
        &self,
        order_id: &OrderId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<OrderView, AppError> {
        let mut store = self.write()?;
        let order = store
            .add_order_item(order_id, product_id, quantity)?
            .ok_or_else(|| DomainError::NotFound(format!("Order {} not found", order_id)))?;
        Ok(OrderView::build(&order, store.products()))
    }

    /// Fails with `NotFound` if the order doesn't exist
    pub fn remove_order_item(
        &self,
        order_id: &OrderId,
        product_id: &ProductId,
    ) -> Result<OrderView, AppError> {
        let mut store = self.write()?;
        let order = store
            .remove_order_item(order_id, product_id)?
            .ok_or_else(|| DomainError::NotFound(format!("Order {} not found", order_id)))?;
        Ok(OrderView::build(&order, store.products()))
    }

    pub fn delete_order(&self, id: &OrderId) -> Result<bool, AppError> {
        Ok(self.write()?.delete_order(id))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, EntityStore>, AppError> {
        self.store
            .read()
            .map_err(|_| AppError::Internal("entity store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, EntityStore>, AppError> {
        self.store
            .write()
            .map_err(|_| AppError::Internal("entity store lock poisoned".to_string()))
    }
}
