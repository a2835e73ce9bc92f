pub mod add;
pub mod client;
pub mod config;
pub mod export;
pub mod menu;
pub mod note;
pub mod quantity;
pub mod remove;
pub mod show;
pub mod suggest;

use anyhow::Result;
use quotecraft_core::{AppConfig, Catalog, LineId, Quote};
use quotecraft_store::{JsonFileStorage, QuoteStore};

pub(crate) async fn open_store(config: &AppConfig) -> Result<QuoteStore<JsonFileStorage>> {
    let storage = JsonFileStorage::new(&config.storage.path);
    Ok(QuoteStore::open(storage, config.quote.duplicate_policy).await?)
}

pub(crate) fn load_catalog(config: &AppConfig) -> Result<Catalog> {
    match &config.catalog.path {
        Some(path) => Ok(Catalog::from_json_file(path)?),
        None => Ok(Catalog::builtin()),
    }
}

/// Resolve a uid argument against the active quote. Accepts the full uid or
/// a prefix, as long as exactly one line matches.
pub(crate) fn resolve_uid(quote: &Quote, needle: &str) -> Option<LineId> {
    let matches: Vec<LineId> = quote
        .items
        .iter()
        .map(|line| line.uid)
        .filter(|uid| uid.to_string().starts_with(needle))
        .collect();

    match matches.as_slice() {
        [uid] => Some(*uid),
        _ => None,
    }
}

pub(crate) fn short_uid(uid: &LineId) -> String {
    uid.to_string().chars().take(8).collect()
}
