//! Spreadsheet adapter
//!
//! Client for the spreadsheet web-app that keeps the remote backup.

pub mod client;

pub use client::SheetsClient;
