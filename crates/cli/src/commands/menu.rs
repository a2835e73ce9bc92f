use anyhow::Result;
use rust_decimal::Decimal;

use quotecraft_core::AppConfig;

use super::load_catalog;

pub fn run(config: &AppConfig) -> Result<String> {
    let catalog = load_catalog(config)?;

    let mut out = String::new();
    for category in catalog.categories() {
        out.push_str(&format!("{category}\n"));
        for item in catalog.items_in(category) {
            if item.price > Decimal::ZERO {
                out.push_str(&format!("  [{}] {} (${:.2})\n", item.id, item.name, item.price));
            } else {
                out.push_str(&format!("  [{}] {}\n", item.id, item.name));
            }
            if !item.description.is_empty() {
                out.push_str(&format!("      {}\n", item.description));
            }
        }
        out.push('\n');
    }

    Ok(out.trim_end().to_string())
}
