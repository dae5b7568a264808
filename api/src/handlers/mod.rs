//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

use axum::{
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};

pub mod backup;
pub mod orders;
pub mod products;

pub use backup::{export_backup, import_backup, pull_backup, push_backup, share_backup};
pub use orders::{
    add_item, create_order, delete_order, get_order, get_totals, list_orders, remove_item,
    update_order,
};
pub use products::{create_product, delete_product, list_products, rename_product};

/// Check if the Accept header names this media type
pub(crate) fn accepts(headers: &HeaderMap, media_type: &str) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains(media_type))
        .unwrap_or(false)
}

pub(crate) fn plain_text(body: String) -> Response {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn accepts_reads_accept_header() {
        let mut headers = HeaderMap::new();
        assert!(!accepts(&headers, "application/json"));

        headers.insert(header::ACCEPT, HeaderValue::from_static("text/plain"));
        assert!(!accepts(&headers, "application/json"));
        assert!(accepts(&headers, "text/plain"));

        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json, text/plain"),
        );
        assert!(accepts(&headers, "application/json"));
    }
}
