//! Report renderer
//!
//! Renders the order board to readable markdown-ish text.

use crate::app::{OrderBoard, OrderFilter, OrderView, ProductTotal};
use crate::domain::entities::Product;

/// Render the order board with its totals
pub fn render_board(board: &OrderBoard, filter: &OrderFilter) -> String {
    let mut buf = String::new();

    buf.push_str("# OrdersFlow Orders\n\n");

    if let Some(line) = describe_filter(filter) {
        buf.push_str(&format!("Filtered by {}\n\n", line));
    }

    buf.push_str(&format!("## Orders ({})\n\n", board.orders.len()));
    if board.orders.is_empty() {
        buf.push_str("_No orders match._\n\n");
    } else {
        for order in &board.orders {
            buf.push_str(&render_order(order));
            buf.push('\n');
        }
    }

    buf.push_str(&render_totals(&board.totals));
    buf
}

/// Render the per-product totals section
pub fn render_totals(totals: &[ProductTotal]) -> String {
    let mut buf = String::from("## Totals\n\n");

    if totals.is_empty() {
        buf.push_str("_Nothing to produce._\n");
        return buf;
    }

    let width = totals
        .iter()
        .map(|t| t.name.chars().count())
        .max()
        .unwrap_or(0);
    for total in totals {
        buf.push_str(&format!(
            "- {:<width$}  {}\n",
            total.name,
            total.total,
            width = width
        ));
    }
    buf
}

/// Render the product catalog
pub fn render_products(products: &[Product]) -> String {
    let mut buf = String::from("# Products\n\n");

    if products.is_empty() {
        buf.push_str("_No products yet._\n");
        return buf;
    }

    for product in products {
        buf.push_str(&format!("- {} ({})\n", product.name, product.id));
    }
    buf
}

fn render_order(order: &OrderView) -> String {
    let mut buf = format!(
        "[{}] {} ({})\n",
        order.delivery_date, order.customer_name, order.id
    );

    for item in &order.items {
        buf.push_str(&format!("    {}x {}\n", item.quantity, item.label));
    }

    let notes = order.observations.trim();
    if !notes.is_empty() {
        buf.push_str(&format!("    Notes: {}\n", truncate(notes, 80)));
    }
    buf
}

fn describe_filter(filter: &OrderFilter) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(product) = filter.product.as_deref().filter(|p| !p.is_empty()) {
        parts.push(format!("product \"{}\"", product));
    }
    if let Some(date) = filter.date.as_deref().filter(|d| !d.is_empty()) {
        parts.push(format!("date {}", date));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Truncate on a character boundary, with ellipsis
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::OrderItemView;

    fn view(id: &str, customer: &str, date: &str, items: &[(&str, u32)]) -> OrderView {
        OrderView {
            id: id.to_string(),
            customer_name: customer.to_string(),
            delivery_date: date.to_string(),
            observations: String::new(),
            items: items
                .iter()
                .map(|(label, quantity)| OrderItemView {
                    product_id: label.to_lowercase(),
                    product_name: Some(label.to_string()),
                    label: label.to_string(),
                    quantity: *quantity,
                })
                .collect(),
            summary: String::new(),
            total_quantity: items.iter().map(|(_, q)| u64::from(*q)).sum(),
        }
    }

    fn total(name: &str, total: u64) -> ProductTotal {
        ProductTotal {
            name: name.to_string(),
            total,
        }
    }

    #[test]
    fn render_board_empty() {
        let board = OrderBoard {
            orders: vec![],
            totals: vec![],
        };
        let output = render_board(&board, &OrderFilter::default());

        assert!(output.contains("# OrdersFlow Orders"));
        assert!(output.contains("## Orders (0)"));
        assert!(output.contains("_No orders match._"));
        assert!(output.contains("_Nothing to produce._"));
        assert!(!output.contains("Filtered by"));
    }

    #[test]
    fn render_board_with_orders() {
        let mut maria = view("o1", "Maria", "2024-12-20", &[("Panetone", 3)]);
        maria.observations = "sem passas".to_string();
        let board = OrderBoard {
            orders: vec![
                maria,
                view("o2", "João", "2024-12-24", &[("Panetone", 1), ("Removed product", 2)]),
            ],
            totals: vec![total("Panetone", 4)],
        };
        let output = render_board(&board, &OrderFilter::default());

        assert!(output.contains("## Orders (2)"));
        assert!(output.contains("[2024-12-20] Maria (o1)"));
        assert!(output.contains("    3x Panetone"));
        assert!(output.contains("    Notes: sem passas"));
        assert!(output.contains("    2x Removed product"));
        assert!(output.contains("- Panetone  4"));
        assert!(output.find("Maria").unwrap() < output.find("João").unwrap());
    }

    #[test]
    fn render_board_names_active_filters() {
        let board = OrderBoard {
            orders: vec![],
            totals: vec![],
        };
        let filter = OrderFilter::new(Some("pane".into()), Some("2024-12-20".into()));
        let output = render_board(&board, &filter);
        assert!(output.contains("Filtered by product \"pane\", date 2024-12-20"));

        let filter = OrderFilter::new(Some(String::new()), None);
        assert!(!render_board(&board, &filter).contains("Filtered by"));
    }

    #[test]
    fn render_totals_aligns_names() {
        let output = render_totals(&[total("Panetone Trufado", 5), total("Bolo", 1)]);
        assert!(output.contains("- Panetone Trufado  5\n"));
        assert!(output.contains("- Bolo              1\n"));
    }

    #[test]
    fn render_products_lists_catalog() {
        let output = render_products(&[Product::new("p1", "Panetone")]);
        assert!(output.contains("- Panetone (p1)"));
        assert!(render_products(&[]).contains("_No products yet._"));
    }

    #[test]
    fn truncate_long_string() {
        let result = truncate("Hello, this is a very long string", 10);
        assert_eq!(result, "Hello, ...");
    }

    #[test]
    fn truncate_short_string() {
        assert_eq!(truncate("Hello", 10), "Hello");
    }

    #[test]
    fn truncate_respects_multibyte_characters() {
        assert_eq!(truncate("ããããããã", 5), "ãã...");
    }
}
