//! Plain-text order receipts.

use std::fmt::Write as _;

use crate::format::format_xaf;
use crate::order::SubmittedOrder;

pub const STORE_NAME: &str = "TechSupplies Cameroon";

const WIDTH: usize = 60;

/// Renders a printable receipt for `order`.
#[must_use]
pub fn render_receipt(order: &SubmittedOrder) -> String {
    let draft = &order.draft;
    let w = WIDTH;
    let rule = "-".repeat(w);
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{:^w$}", STORE_NAME);
    let _ = writeln!(out, "{:^w$}", "Order Receipt");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Date:     {}", order.created_at.format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(out, "Order ID: {}", order.id);
    let _ = writeln!(out, "Ship to:  {}", draft.shipping_address);
    let _ = writeln!(out, "Payment:  {} ({})", draft.payment_method, draft.payment_number);
    if let Some(guest) = &draft.guest {
        let _ = writeln!(out, "Customer: {} <{}>", guest.full_name, guest.email);
    }
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{:<26}{:>6}{:>14}{:>14}", "Item", "Qty", "Price", "Total");
    for line in &draft.lines {
        let _ = writeln!(
            out,
            "{:<26}{:>6}{:>14}{:>14}",
            truncate(&line.name, 25),
            line.quantity,
            format_xaf(line.unit_price),
            format_xaf(line.line_total())
        );
    }
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{:<40}{:>20}", "Subtotal", format_xaf(draft.summary.subtotal));
    let _ = writeln!(out, "{:<40}{:>20}", "Shipping", format_xaf(draft.summary.shipping));
    let _ = writeln!(out, "{:<40}{:>20}", "Total", format_xaf(draft.summary.total));
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{:^w$}", "Thank you for shopping with us!");
    out
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        t.push('…');
        t
    }
}
