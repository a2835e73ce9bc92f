use anyhow::Result;

use quotecraft_core::{views, AppConfig, Quote};

use super::{open_store, short_uid};

pub async fn run(config: &AppConfig) -> Result<String> {
    let store = open_store(config).await?;
    Ok(render(store.active(), config))
}

fn render(quote: &Quote, config: &AppConfig) -> String {
    let client = &quote.client_info;
    let mut out = format!(
        "Quote {} (created {})\n\n",
        short_uid_of_quote(quote),
        quote.created_at.format("%B %-d, %Y")
    );

    out.push_str(&format!(
        "Client: {}\n",
        if client.name.is_empty() { "(not set)" } else { client.name.as_str() }
    ));
    if let Some(phone) = &client.phone_number {
        out.push_str(&format!("Phone: {phone}\n"));
    }
    if let Some(event_date) = client.event_date {
        out.push_str(&format!("Event date: {}\n", event_date.format("%B %-d, %Y")));
    }
    out.push_str(&format!("Guests: {}\n\n", client.guest_count));

    if quote.items.is_empty() {
        out.push_str("Select items to build the quote.");
        return out;
    }

    for (category, lines) in views::group_by_category(quote) {
        out.push_str(&format!("{category}:\n"));
        for line in lines {
            out.push_str(&format!(
                "- [{}] {} (x{})\n",
                short_uid(&line.uid),
                line.item.name,
                line.quantity
            ));
            if let Some(comment) = &line.comment {
                out.push_str(&format!("    Note: {comment}\n"));
            }
        }
        out.push('\n');
    }

    if views::any_item_has_positive_price(quote) {
        let totals = views::totals(quote, config.quote.tax_rate);
        out.push_str(&format!(
            "Subtotal: ${:.2}\nTax: ${:.2}\nTotal: ${:.2}",
            totals.subtotal, totals.tax, totals.total
        ));
    } else {
        out = out.trim_end().to_string();
    }

    out
}

fn short_uid_of_quote(quote: &Quote) -> String {
    quote.id.to_string().chars().take(8).collect()
}
