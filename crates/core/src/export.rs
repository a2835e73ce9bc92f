//! Text composition for the share surfaces: email, WhatsApp, and the PDF
//! file name. All functions work on a quote snapshot and never mutate it.

use rust_decimal::Decimal;

use crate::domain::quote::Quote;
use crate::views;

/// File stem for an exported PDF: runs of non-alphanumeric characters
/// collapse to a single `_`; an empty result falls back to `quote`.
pub fn pdf_file_stem(client_name: &str) -> String {
    let mut stem = String::new();
    let mut gap = false;
    for ch in client_name.chars() {
        if ch.is_alphanumeric() {
            if gap && !stem.is_empty() {
                stem.push('_');
            }
            gap = false;
            stem.push(ch);
        } else {
            gap = true;
        }
    }

    if stem.is_empty() {
        "quote".to_string()
    } else {
        stem
    }
}

pub fn email_subject(quote: &Quote) -> String {
    format!("Quote for {}", quote.client_info.name)
}

pub fn email_body(quote: &Quote, tax_rate: Decimal, business_name: &str) -> String {
    let client = &quote.client_info;
    let event_date = client
        .event_date
        .map(|date| date.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let mut body = format!(
        "Hello {},\n\nHere is your quote for the event on {event_date}.\n\nGuest Count: {}\n\n",
        client.name, client.guest_count
    );
    body.push_str(&views::summary_text(quote));

    if views::any_item_has_positive_price(quote) {
        let totals = views::totals(quote, tax_rate);
        body.push_str(&format!(
            "\nSubtotal: ${:.2}\nTax: ${:.2}\nTotal: ${:.2}\n",
            totals.subtotal, totals.tax, totals.total
        ));
    }

    body.push_str(&format!("\nThank you,\n{business_name}"));
    body
}

pub fn mailto_link(quote: &Quote, tax_rate: Decimal, business_name: &str) -> String {
    format!(
        "mailto:?subject={}&body={}",
        urlencoding::encode(&email_subject(quote)),
        urlencoding::encode(&email_body(quote, tax_rate, business_name))
    )
}

pub fn whatsapp_text(quote: &Quote) -> String {
    let mut text = format!("*Quote for {}*\n\n", quote.client_info.name);
    for (category, lines) in views::group_by_category(quote) {
        text.push_str(&format!("*{category}:*\n"));
        for line in lines {
            text.push_str(&format!("- {} (x{})\n", line.item.name, line.quantity));
            if let Some(comment) = &line.comment {
                text.push_str(&format!("  Note: {comment}\n"));
            }
        }
        text.push('\n');
    }
    text
}

pub fn whatsapp_link(quote: &Quote) -> String {
    format!("https://wa.me/?text={}", urlencoding::encode(&whatsapp_text(quote)))
}
