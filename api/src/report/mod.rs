//! Report module
//!
//! Plain-text rendering of the order board for terminals and chat tools.

pub mod renderer;

pub use renderer::{render_board, render_products, render_totals};
