use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use quotecraft_core::{export, views, AppConfig, Quote};

use super::open_store;
use crate::pdf;

#[derive(Debug, Subcommand)]
pub enum ExportTarget {
    #[command(about = "Print a plain-text quote sheet to stdout")]
    Print,
    #[command(about = "Render the quote to PDF (keeps the HTML when wkhtmltopdf is missing)")]
    Pdf {
        #[arg(long, help = "Output directory; defaults to the current directory")]
        out: Option<PathBuf>,
    },
    #[command(about = "Compose a mailto: link for the quote email")]
    Email,
    #[command(about = "Compose a wa.me share link")]
    Whatsapp,
}

pub async fn run(config: &AppConfig, target: ExportTarget) -> Result<String> {
    // Exports read a snapshot taken here; later mutations never affect an
    // in-flight export.
    let store = open_store(config).await?;
    let quote = store.active().clone();

    match target {
        ExportTarget::Print => Ok(print_sheet(&quote, config)),
        ExportTarget::Pdf { out } => pdf::write_pdf(&quote, config, out.as_deref()).await,
        ExportTarget::Email => {
            Ok(export::mailto_link(&quote, config.quote.tax_rate, &config.business.name))
        }
        ExportTarget::Whatsapp => Ok(export::whatsapp_link(&quote)),
    }
}

fn print_sheet(quote: &Quote, config: &AppConfig) -> String {
    let client = &quote.client_info;
    let mut sheet = format!(
        "{}\nQuote prepared {}\n{}\n\n",
        config.business.name,
        quote.created_at.format("%B %-d, %Y"),
        "=".repeat(40)
    );

    sheet.push_str(&format!(
        "Client: {}\n",
        if client.name.is_empty() { "N/A" } else { client.name.as_str() }
    ));
    sheet.push_str(&format!("Phone: {}\n", client.phone_number.as_deref().unwrap_or("N/A")));
    sheet.push_str(&format!(
        "Event date: {}\n",
        client
            .event_date
            .map(|date| date.format("%B %-d, %Y").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    ));
    sheet.push_str(&format!("Guests: {}\n\n", client.guest_count));

    sheet.push_str(&views::summary_text(quote));

    if views::any_item_has_positive_price(quote) {
        let totals = views::totals(quote, config.quote.tax_rate);
        sheet.push_str(&format!(
            "\nSubtotal: ${:.2}\nTax: ${:.2}\nTotal: ${:.2}\n",
            totals.subtotal, totals.tax, totals.total
        ));
    }

    sheet.push_str(&format!("\n{}\nClient signature: ____________\nAuthorized signature: ____________", "=".repeat(40)));
    sheet
}
