use anyhow::Result;

use quotecraft_core::AppConfig;

use super::{open_store, resolve_uid, short_uid};

pub async fn run(config: &AppConfig, uid_arg: &str, quantity: i64) -> Result<String> {
    let mut store = open_store(config).await?;

    let Some(uid) = resolve_uid(store.active(), uid_arg) else {
        return Ok(format!("no quote line matches `{uid_arg}`; nothing to do"));
    };

    store.update_quantity(&uid, quantity).await?;
    if quantity <= 0 {
        Ok(format!("removed line {}", short_uid(&uid)))
    } else {
        Ok(format!("line {} quantity set to {quantity}", short_uid(&uid)))
    }
}
