use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use quotecraft_core::Quote;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not read quote archive `{path}`: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not decode quote archive `{path}`: {source}")]
    Decode { path: PathBuf, source: serde_json::Error },
    #[error("could not encode quote collection: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("could not write quote archive `{path}`: {source}")]
    Write { path: PathBuf, source: io::Error },
}

#[async_trait]
pub trait QuoteStorage: Send + Sync {
    /// Absent or corrupt storage yields an empty collection, never an
    /// error; the session starts fresh instead of failing.
    async fn load(&self) -> Vec<Quote>;

    /// Write failures are surfaced: a dropped save loses a mutation.
    async fn save(&self, quotes: &[Quote]) -> Result<(), StorageError>;
}

#[async_trait]
impl<S: QuoteStorage + ?Sized> QuoteStorage for Arc<S> {
    async fn load(&self) -> Vec<Quote> {
        (**self).load().await
    }

    async fn save(&self, quotes: &[Quote]) -> Result<(), StorageError> {
        (**self).save(quotes).await
    }
}

/// Persists the whole quote collection as one JSON document. Dates travel
/// as ISO-8601 strings through the serde codecs on the domain types.
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_archive(&self) -> Result<Vec<Quote>, StorageError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StorageError::Read { path: self.path.clone(), source }),
        };

        serde_json::from_slice(&raw)
            .map_err(|source| StorageError::Decode { path: self.path.clone(), source })
    }
}

#[async_trait]
impl QuoteStorage for JsonFileStorage {
    async fn load(&self) -> Vec<Quote> {
        match self.read_archive().await {
            Ok(quotes) => quotes,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "quote archive unreadable, starting empty");
                Vec::new()
            }
        }
    }

    async fn save(&self, quotes: &[Quote]) -> Result<(), StorageError> {
        let encoded = serde_json::to_vec_pretty(quotes).map_err(StorageError::Encode)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| StorageError::Write { path: self.path.clone(), source })?;
            }
        }

        // Stage to a sibling file so a failed write cannot truncate the
        // previous archive.
        let staged = self.path.with_extension("json.tmp");
        tokio::fs::write(&staged, &encoded)
            .await
            .map_err(|source| StorageError::Write { path: staged.clone(), source })?;
        tokio::fs::rename(&staged, &self.path)
            .await
            .map_err(|source| StorageError::Write { path: self.path.clone(), source })?;

        debug!(path = %self.path.display(), quotes = quotes.len(), "quote archive saved");
        Ok(())
    }
}

/// Collection held behind an `RwLock`; serves tests and ephemeral sessions.
#[derive(Default)]
pub struct InMemoryStorage {
    quotes: RwLock<Vec<Quote>>,
}

#[async_trait]
impl QuoteStorage for InMemoryStorage {
    async fn load(&self) -> Vec<Quote> {
        self.quotes.read().await.clone()
    }

    async fn save(&self, quotes: &[Quote]) -> Result<(), StorageError> {
        *self.quotes.write().await = quotes.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use quotecraft_core::{DuplicatePolicy, MenuItem, MenuItemId, Quote};

    use super::{JsonFileStorage, QuoteStorage};

    fn sample_quote() -> Quote {
        let mut quote = Quote::new();
        quote.client_info.name = "Dana Cohen".to_string();
        quote.client_info.event_date = NaiveDate::from_ymd_opt(2026, 9, 12);
        quote.client_info.guest_count = 140;
        quote.add_item(
            &MenuItem {
                id: MenuItemId(1),
                name: "Garden Salad".to_string(),
                category: "Salads".to_string(),
                price: Decimal::new(850, 2),
                image: String::new(),
                description: String::new(),
            },
            Some("extra dressing".to_string()),
            DuplicatePolicy::Merge,
        );
        quote
    }

    #[tokio::test]
    async fn round_trip_reproduces_quotes_exactly() {
        let dir = tempfile::tempdir().expect("temp dir");
        let storage = JsonFileStorage::new(dir.path().join("quotes.json"));
        let quotes = vec![sample_quote(), Quote::new()];

        storage.save(&quotes).await.expect("save archive");
        let loaded = storage.load().await;

        assert_eq!(loaded, quotes);
    }

    #[tokio::test]
    async fn missing_archive_loads_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let storage = JsonFileStorage::new(dir.path().join("absent.json"));

        assert!(storage.load().await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_archive_loads_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("quotes.json");
        tokio::fs::write(&path, b"{ this is not an archive").await.expect("write garbage");

        let storage = JsonFileStorage::new(path);
        assert!(storage.load().await.is_empty());
    }

    #[tokio::test]
    async fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let storage = JsonFileStorage::new(dir.path().join("nested/deep/quotes.json"));

        storage.save(&[sample_quote()]).await.expect("save archive");
        assert_eq!(storage.load().await.len(), 1);
    }

    #[tokio::test]
    async fn save_replaces_the_previous_archive() {
        let dir = tempfile::tempdir().expect("temp dir");
        let storage = JsonFileStorage::new(dir.path().join("quotes.json"));

        storage.save(&[sample_quote(), Quote::new()]).await.expect("first save");
        storage.save(&[sample_quote()]).await.expect("second save");

        assert_eq!(storage.load().await.len(), 1);
    }
}
