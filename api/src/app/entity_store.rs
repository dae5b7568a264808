//! Entity store
//!
//! In-memory owner of the product and order collections. Every mutation goes
//! through here so the reference and validation rules hold in one place.
//!
//! After each successful mutation the store emits a [`StoreChange`] carrying
//! the new value of the touched collection. Emitting never blocks and never
//! fails the mutation: the host decides how and when to persist.

use chrono::{NaiveDate, Utc};
use rand::Rng;
use tokio::sync::mpsc::UnboundedSender;

use crate::domain::entities::{Order, OrderDraft, OrderId, Product, ProductId, Snapshot};
use crate::error::DomainError;

/// Notification that a collection changed and should be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Products(Vec<Product>),
    Orders(Vec<Order>),
}

/// Owner of both collections
#[derive(Debug, Default)]
pub struct EntityStore {
    products: Vec<Product>,
    orders: Vec<Order>,
    notifier: Option<UnboundedSender<StoreChange>>,
}

impl EntityStore {
    /// Seed a store from a loaded snapshot. Seeding is not a mutation.
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            products: snapshot.products,
            orders: snapshot.orders,
            notifier: None,
        }
    }

    /// Emit change notifications on this channel
    pub fn with_notifier(mut self, notifier: UnboundedSender<StoreChange>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.products.clone(), self.orders.clone())
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn order(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    // --- Products ---

    /// Add a product to the catalog
    pub fn add_product(&mut self, name: &str) -> Result<Product, DomainError> {
        let name = validate_product_name(name)?;
        let id = fresh_id(|candidate| self.products.iter().any(|p| p.id.as_str() == candidate));

        let product = Product::new(id, name);
        self.products.push(product.clone());
        self.notify_products();

        tracing::debug!(product_id = %product.id, "Product added");
        Ok(product)
    }

    /// Rename a product. Returns `None` without side effects if the id is unknown.
    pub fn update_product(
        &mut self,
        id: &ProductId,
        name: &str,
    ) -> Result<Option<Product>, DomainError> {
        let name = validate_product_name(name)?;

        let mut updated = None;
        for product in self.products.iter_mut().filter(|p| &p.id == id) {
            product.name = name.clone();
            updated.get_or_insert_with(|| product.clone());
        }

        if updated.is_some() {
            self.notify_products();
            tracing::debug!(product_id = %id, "Product renamed");
        }
        Ok(updated)
    }

    /// Remove a product. Blocked while any order still references it.
    ///
    /// Returns whether anything was removed.
    pub fn delete_product(&mut self, id: &ProductId) -> Result<bool, DomainError> {
        if let Some(order) = self.orders.iter().find(|o| o.references(id)) {
            return Err(DomainError::Constraint(format!(
                "Cannot delete product {}: it is used by the order for {} ({})",
                id, order.customer_name, order.id
            )));
        }

        let before = self.products.len();
        self.products.retain(|p| &p.id != id);
        let removed = self.products.len() != before;

        if removed {
            self.notify_products();
            tracing::debug!(product_id = %id, "Product deleted");
        }
        Ok(removed)
    }

    // --- Orders ---

    /// Create an order from a draft
    pub fn add_order(&mut self, draft: OrderDraft) -> Result<Order, DomainError> {
        let draft = self.validate_draft(draft, None)?;
        let id = fresh_id(|candidate| self.orders.iter().any(|o| o.id.as_str() == candidate));

        let order = draft.into_order(OrderId::from(id));
        self.orders.push(order.clone());
        self.notify_orders();

        tracing::debug!(order_id = %order.id, items = order.items.len(), "Order added");
        Ok(order)
    }

    /// Replace everything but the id of an order.
    /// The draft is validated first; a valid draft for an unknown id returns
    /// `None` without side effects.
    pub fn update_order(
        &mut self,
        id: &OrderId,
        draft: OrderDraft,
    ) -> Result<Option<Order>, DomainError> {
        let Some(index) = self.orders.iter().position(|o| &o.id == id) else {
            self.validate_draft(draft, None)?;
            return Ok(None);
        };

        let draft = self.validate_draft(draft, Some(&self.orders[index]))?;
        let order = draft.into_order(id.clone());
        self.orders[index] = order.clone();
        self.notify_orders();

        tracing::debug!(order_id = %id, "Order updated");
        Ok(Some(order))
    }

    /// Add a product line to an order, bumping the quantity if the product
    /// is already on it.
    pub fn add_order_item(
        &mut self,
        order_id: &OrderId,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Option<Order>, DomainError> {
        let Some(index) = self.orders.iter().position(|o| &o.id == order_id) else {
            return Ok(None);
        };
        if quantity == 0 {
            return Err(DomainError::validation(
                "quantity",
                "Quantity must be at least 1",
            ));
        }
        if self.product(product_id).is_none() {
            return Err(DomainError::validation(
                "productId",
                format!("Unknown product {}", product_id),
            ));
        }

        let mut draft = OrderDraft::from(&self.orders[index]);
        draft.add_item(product_id.clone(), quantity);
        self.orders[index].items = draft.items;
        let order = self.orders[index].clone();
        self.notify_orders();

        Ok(Some(order))
    }

    /// Remove a product line from an order. An order can't be left empty.
    pub fn remove_order_item(
        &mut self,
        order_id: &OrderId,
        product_id: &ProductId,
    ) -> Result<Option<Order>, DomainError> {
        let Some(index) = self.orders.iter().position(|o| &o.id == order_id) else {
            return Ok(None);
        };

        let mut draft = OrderDraft::from(&self.orders[index]);
        if !draft.remove_item(product_id) {
            return Ok(Some(self.orders[index].clone()));
        }
        if draft.items.is_empty() {
            return Err(DomainError::validation(
                "items",
                "An order needs at least one product; delete the order instead",
            ));
        }

        self.orders[index].items = draft.items;
        let order = self.orders[index].clone();
        self.notify_orders();

        Ok(Some(order))
    }

    /// Remove an order. Returns whether anything was removed.
    pub fn delete_order(&mut self, id: &OrderId) -> bool {
        let before = self.orders.len();
        self.orders.retain(|o| &o.id != id);
        let removed = self.orders.len() != before;

        if removed {
            self.notify_orders();
            tracing::debug!(order_id = %id, "Order deleted");
        }
        removed
    }

    /// Replace both collections wholesale. No merging and no validation:
    /// imported data may carry dangling references.
    pub fn replace_all(&mut self, snapshot: Snapshot) {
        self.products = snapshot.products;
        self.orders = snapshot.orders;
        self.notify_products();
        self.notify_orders();

        tracing::info!(
            products = self.products.len(),
            orders = self.orders.len(),
            "Store replaced from import"
        );
    }

    // --- Internals ---

    /// Check a draft in field order and normalize it.
    ///
    /// Items already on `existing` may point at removed products; only lines
    /// new to the order must resolve.
    fn validate_draft(
        &self,
        mut draft: OrderDraft,
        existing: Option<&Order>,
    ) -> Result<OrderDraft, DomainError> {
        draft.customer_name = draft.customer_name.trim().to_string();
        draft.delivery_date = draft.delivery_date.trim().to_string();

        if draft.customer_name.is_empty() {
            return Err(DomainError::validation(
                "customerName",
                "Customer name is required",
            ));
        }
        if draft.items.is_empty() {
            return Err(DomainError::validation(
                "items",
                "Add at least one product to the order",
            ));
        }
        if draft.delivery_date.is_empty() {
            return Err(DomainError::validation(
                "deliveryDate",
                "Delivery date is required",
            ));
        }
        if NaiveDate::parse_from_str(&draft.delivery_date, "%Y-%m-%d").is_err() {
            return Err(DomainError::validation(
                "deliveryDate",
                format!(
                    "Delivery date must be YYYY-MM-DD, got '{}'",
                    draft.delivery_date
                ),
            ));
        }
        if let Some(item) = draft.items.iter().find(|item| item.quantity == 0) {
            return Err(DomainError::validation(
                "items",
                format!("Quantity for product {} must be at least 1", item.product_id),
            ));
        }
        for item in &draft.items {
            let carried_over = existing.is_some_and(|order| order.references(&item.product_id));
            if !carried_over && self.product(&item.product_id).is_none() {
                return Err(DomainError::validation(
                    "items",
                    format!("Unknown product {}", item.product_id),
                ));
            }
        }

        draft.merge_duplicate_items();
        Ok(draft)
    }

    fn notify_products(&self) {
        self.emit(StoreChange::Products(self.products.clone()));
    }

    fn notify_orders(&self) {
        self.emit(StoreChange::Orders(self.orders.clone()));
    }

    fn emit(&self, change: StoreChange) {
        if let Some(notifier) = &self.notifier {
            if notifier.send(change).is_err() {
                tracing::warn!("Persistence channel closed, change will not be saved");
            }
        }
    }
}

fn validate_product_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("name", "Product name is required"));
    }
    Ok(name.to_string())
}

/// Millisecond timestamp plus a random suffix, re-drawn until unused
fn fresh_id(taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = generate_id();
        if !taken(&id) {
            return id;
        }
    }
}

fn generate_id() -> String {
    let suffix: [u8; 3] = rand::thread_rng().gen();
    format!("{}-{}", Utc::now().timestamp_millis(), hex::encode(suffix))
}
