use anyhow::Result;

use quotecraft_core::AppConfig;

use super::{open_store, resolve_uid, short_uid};

pub async fn run(config: &AppConfig, uid_arg: &str, text: &str) -> Result<String> {
    let mut store = open_store(config).await?;

    let Some(uid) = resolve_uid(store.active(), uid_arg) else {
        return Ok(format!("no quote line matches `{uid_arg}`; nothing to do"));
    };

    store.update_comment(&uid, text).await?;
    if text.trim().is_empty() {
        Ok(format!("cleared note on line {}", short_uid(&uid)))
    } else {
        Ok(format!("note set on line {}", short_uid(&uid)))
    }
}
