//! Read-only computations over a `Quote` snapshot. Every function here is
//! pure; rendering and export surfaces decide what to show.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::quote::{Quote, SelectedItem};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

pub fn totals(quote: &Quote, tax_rate: Decimal) -> QuoteTotals {
    let subtotal: Decimal =
        quote.items.iter().map(|line| line.item.price * Decimal::from(line.quantity)).sum();
    let tax = (subtotal * tax_rate).round_dp(2);
    QuoteTotals { subtotal, tax, total: subtotal + tax }
}

/// Presentation predicate: surfaces hide totals when nothing carries a
/// price. The totals computation itself never branches on this.
pub fn any_item_has_positive_price(quote: &Quote) -> bool {
    quote.items.iter().any(|line| line.item.price > Decimal::ZERO)
}

/// Categories in order of first occurrence, line order preserved within
/// each category.
pub fn group_by_category(quote: &Quote) -> Vec<(&str, Vec<&SelectedItem>)> {
    let mut groups: Vec<(&str, Vec<&SelectedItem>)> = Vec::new();
    for line in &quote.items {
        match groups.iter_mut().find(|(category, _)| *category == line.item.category) {
            Some((_, lines)) => lines.push(line),
            None => groups.push((line.item.category.as_str(), vec![line])),
        }
    }
    groups
}

/// Flattened listing of categories, item names, quantities, and notes.
/// Deterministic for a given quote value; feeds the package suggester and
/// the email/WhatsApp composers.
pub fn summary_text(quote: &Quote) -> String {
    let mut blocks = Vec::new();
    for (category, lines) in group_by_category(quote) {
        let mut block = format!("{category}:\n");
        for line in lines {
            block.push_str(&format!("- {} (x{})\n", line.item.name, line.quantity));
            if let Some(comment) = &line.comment {
                block.push_str(&format!("  Note: {comment}\n"));
            }
        }
        blocks.push(block);
    }
    blocks.join("\n")
}
