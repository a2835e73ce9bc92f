//! Print/PDF rendering for the active quote: a Tera HTML template plus
//! conversion through an external `wkhtmltopdf` binary when one is on the
//! PATH. Rendering reads a snapshot and never touches quote state.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tera::Tera;
use tokio::process::Command;
use tracing::{info, warn};

use quotecraft_core::{export, views, AppConfig, Quote};

const QUOTE_TEMPLATE: &str = include_str!("../templates/quote.html");

/// Formats a number to 2 decimal places. Usage: `{{ amount | money }}`.
fn tera_money_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let num = match value {
        tera::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        tera::Value::Null => 0.0,
        _ => 0.0,
    };
    Ok(tera::Value::String(format!("{num:.2}")))
}

#[derive(Serialize)]
struct LineRow {
    name: String,
    quantity: u32,
    comment: String,
}

#[derive(Serialize)]
struct CategoryBlock {
    name: String,
    lines: Vec<LineRow>,
}

pub fn render_html(quote: &Quote, config: &AppConfig) -> Result<String> {
    let mut tera = Tera::default();
    tera.register_filter("money", tera_money_filter);
    tera.add_raw_template("quote.html", QUOTE_TEMPLATE)
        .context("quote template failed to parse")?;

    let client = &quote.client_info;
    let categories: Vec<CategoryBlock> = views::group_by_category(quote)
        .into_iter()
        .map(|(name, lines)| CategoryBlock {
            name: name.to_string(),
            lines: lines
                .iter()
                .map(|line| LineRow {
                    name: line.item.name.clone(),
                    quantity: line.quantity,
                    comment: line.comment.clone().unwrap_or_else(|| "-".to_string()),
                })
                .collect(),
        })
        .collect();
    let totals = views::totals(quote, config.quote.tax_rate);

    let mut context = tera::Context::new();
    context.insert("business_name", &config.business.name);
    context.insert("created_at", &quote.created_at.format("%B %-d, %Y").to_string());
    context.insert(
        "client_name",
        if client.name.is_empty() { "N/A" } else { client.name.as_str() },
    );
    context.insert("client_phone", client.phone_number.as_deref().unwrap_or("N/A"));
    context.insert(
        "event_date",
        &client
            .event_date
            .map(|date| date.format("%B %-d, %Y").to_string())
            .unwrap_or_else(|| "N/A".to_string()),
    );
    context.insert("guest_count", &client.guest_count);
    context.insert("categories", &categories);
    context.insert("show_totals", &views::any_item_has_positive_price(quote));
    context.insert("subtotal", &totals.subtotal.to_f64().unwrap_or(0.0));
    context.insert("tax", &totals.tax.to_f64().unwrap_or(0.0));
    context.insert("total", &totals.total.to_f64().unwrap_or(0.0));

    tera.render("quote.html", &context).context("quote template failed to render")
}

/// Writes `<sanitized-client-name>.pdf` into `out_dir`. Without a usable
/// `wkhtmltopdf` the rendered HTML is kept instead and the operator is told
/// where it is; quote state is unaffected either way.
pub async fn write_pdf(quote: &Quote, config: &AppConfig, out_dir: Option<&Path>) -> Result<String> {
    let html = render_html(quote, config)?;
    let stem = export::pdf_file_stem(&quote.client_info.name);
    let dir = out_dir.unwrap_or_else(|| Path::new("."));

    let html_path = dir.join(format!("{stem}.html"));
    tokio::fs::write(&html_path, &html)
        .await
        .with_context(|| format!("could not write {}", html_path.display()))?;

    let Ok(wkhtmltopdf) = which::which("wkhtmltopdf") else {
        warn!("wkhtmltopdf not found in PATH, keeping the rendered HTML");
        return Ok(format!(
            "wkhtmltopdf not found; wrote {} (print it from a browser)",
            html_path.display()
        ));
    };

    let pdf_path = dir.join(format!("{stem}.pdf"));
    let status = Command::new(wkhtmltopdf)
        .arg("--quiet")
        .arg(&html_path)
        .arg(&pdf_path)
        .status()
        .await
        .context("failed to launch wkhtmltopdf")?;
    if !status.success() {
        bail!("wkhtmltopdf exited with {status}; the rendered HTML is at {}", html_path.display());
    }

    tokio::fs::remove_file(&html_path).await.ok();
    info!(path = %pdf_path.display(), "quote pdf written");
    Ok(format!("wrote {}", pdf_path.display()))
}
