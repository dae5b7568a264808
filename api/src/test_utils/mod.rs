//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//! The mocks record what was saved or pushed so tests can inspect it.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
