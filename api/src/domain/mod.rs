//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Products, orders and the snapshot that holds them
//! - `ports`: Trait definitions for persistence and remote backup

pub mod entities;
pub mod ports;
