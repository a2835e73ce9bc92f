use anyhow::{bail, Result};

use quotecraft_core::{AppConfig, MenuItemId};

use super::{load_catalog, open_store, short_uid};

pub async fn run(config: &AppConfig, menu_id: u32, note: Option<String>) -> Result<String> {
    let catalog = load_catalog(config)?;
    let Some(item) = catalog.find(MenuItemId(menu_id)) else {
        bail!("no menu item with id {menu_id}; run `quotecraft menu` to list the catalog");
    };

    let mut store = open_store(config).await?;
    let uid = store.add_item(item, note).await?;

    let quantity = store.active().line(&uid).map(|line| line.quantity).unwrap_or(1);
    Ok(format!("added {} (x{quantity}) [line {}]", item.name, short_uid(&uid)))
}
