//! Domain entities
//!
//! Pure domain models for the catalog and the order book.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod lenient;
pub mod order;
pub mod product;
pub mod snapshot;

pub use order::{Order, OrderDraft, OrderId, OrderItem};
pub use product::{Product, ProductId};
pub use snapshot::Snapshot;
