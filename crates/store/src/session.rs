use tracing::debug;

use quotecraft_core::{ClientInfoUpdate, DuplicatePolicy, LineId, MenuItem, Quote};

use crate::storage::{QuoteStorage, StorageError};

/// Session state manager for the active quote. Owns the loaded collection,
/// applies every mutation to the active quote, and persists the whole
/// collection before the operation returns. Operations referencing a uid
/// that no longer exists are silent no-ops; the only error a mutation can
/// produce is a storage write failure.
pub struct QuoteStore<S: QuoteStorage> {
    storage: S,
    policy: DuplicatePolicy,
    quotes: Vec<Quote>,
    active: Quote,
}

impl<S: QuoteStorage> QuoteStore<S> {
    /// Loads the persisted collection; when it is empty a fresh quote is
    /// synthesized, persisted, and becomes the active quote. Otherwise the
    /// first loaded quote is activated.
    pub async fn open(storage: S, policy: DuplicatePolicy) -> Result<Self, StorageError> {
        let mut quotes = storage.load().await;
        let active = match quotes.first() {
            Some(quote) => quote.clone(),
            None => {
                let quote = Quote::new();
                quotes.push(quote.clone());
                storage.save(&quotes).await?;
                debug!(quote_id = %quote.id, "no persisted quotes, started a fresh one");
                quote
            }
        };

        Ok(Self { storage, policy, quotes, active })
    }

    pub fn active(&self) -> &Quote {
        &self.active
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub async fn update_client_info(
        &mut self,
        update: ClientInfoUpdate,
    ) -> Result<(), StorageError> {
        self.active.client_info.merge(update);
        self.commit().await
    }

    pub async fn add_item(
        &mut self,
        item: &MenuItem,
        comment: Option<String>,
    ) -> Result<LineId, StorageError> {
        let uid = self.active.add_item(item, comment, self.policy);
        self.commit().await?;
        Ok(uid)
    }

    pub async fn update_quantity(
        &mut self,
        uid: &LineId,
        quantity: i64,
    ) -> Result<(), StorageError> {
        if self.active.set_quantity(uid, quantity) {
            self.commit().await?;
        }
        Ok(())
    }

    pub async fn remove_item(&mut self, uid: &LineId) -> Result<(), StorageError> {
        if self.active.remove_line(uid) {
            self.commit().await?;
        }
        Ok(())
    }

    pub async fn update_comment(&mut self, uid: &LineId, comment: &str) -> Result<(), StorageError> {
        if self.active.set_comment(uid, comment) {
            self.commit().await?;
        }
        Ok(())
    }

    /// Write the active quote back into the collection (replace by id,
    /// prepend if absent) and persist the whole archive.
    async fn commit(&mut self) -> Result<(), StorageError> {
        match self.quotes.iter_mut().find(|quote| quote.id == self.active.id) {
            Some(slot) => *slot = self.active.clone(),
            None => self.quotes.insert(0, self.active.clone()),
        }
        self.storage.save(&self.quotes).await
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::PathBuf;
    use std::sync::Arc;

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use quotecraft_core::{
        ClientInfoUpdate, DuplicatePolicy, LineId, MenuItem, MenuItemId, Quote,
    };

    use crate::storage::{InMemoryStorage, JsonFileStorage, QuoteStorage, StorageError};

    use super::QuoteStore;

    fn menu_item(id: u32, name: &str, category: &str, price_cents: i64) -> MenuItem {
        MenuItem {
            id: MenuItemId(id),
            name: name.to_string(),
            category: category.to_string(),
            price: Decimal::new(price_cents, 2),
            image: String::new(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn open_synthesizes_and_persists_a_first_quote() {
        let storage = Arc::new(InMemoryStorage::default());
        let store =
            QuoteStore::open(Arc::clone(&storage), DuplicatePolicy::Merge).await.expect("open");

        assert!(store.active().items.is_empty());
        assert_eq!(store.active().client_info.guest_count, 1);

        let persisted = storage.load().await;
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].id, store.active().id);
    }

    #[tokio::test]
    async fn first_loaded_quote_becomes_active() {
        let storage = Arc::new(InMemoryStorage::default());
        let first = Quote::new();
        let second = Quote::new();
        storage.save(&[first.clone(), second]).await.expect("seed");

        let store =
            QuoteStore::open(Arc::clone(&storage), DuplicatePolicy::Merge).await.expect("open");

        assert_eq!(store.active().id, first.id);
        assert_eq!(store.quotes().len(), 2);
    }

    #[tokio::test]
    async fn every_mutation_survives_a_reload() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("quotes.json");
        let salad = menu_item(1, "Garden Salad", "Salads", 850);

        let mut store = QuoteStore::open(JsonFileStorage::new(&path), DuplicatePolicy::Merge)
            .await
            .expect("open");

        let uid = store.add_item(&salad, Some("no onions".to_string())).await.expect("add");
        let reloaded = reload(&path).await;
        assert_eq!(reloaded.items.len(), 1);
        assert_eq!(reloaded.items[0].comment.as_deref(), Some("no onions"));

        store.update_quantity(&uid, 4).await.expect("quantity");
        assert_eq!(reload(&path).await.items[0].quantity, 4);

        store.update_comment(&uid, "extra dressing").await.expect("comment");
        assert_eq!(reload(&path).await.items[0].comment.as_deref(), Some("extra dressing"));

        store
            .update_client_info(ClientInfoUpdate {
                name: Some("Dana Cohen".to_string()),
                ..ClientInfoUpdate::default()
            })
            .await
            .expect("client info");
        assert_eq!(reload(&path).await.client_info.name, "Dana Cohen");

        store.remove_item(&uid).await.expect("remove");
        assert!(reload(&path).await.items.is_empty());
    }

    async fn reload(path: &std::path::Path) -> Quote {
        let store = QuoteStore::open(JsonFileStorage::new(path), DuplicatePolicy::Merge)
            .await
            .expect("reopen");
        store.active().clone()
    }

    #[tokio::test]
    async fn merge_policy_flows_through_the_store() {
        let mut store = QuoteStore::open(InMemoryStorage::default(), DuplicatePolicy::Merge)
            .await
            .expect("open");
        let salad = menu_item(1, "Garden Salad", "Salads", 850);

        let first = store.add_item(&salad, None).await.expect("add");
        let second = store.add_item(&salad, None).await.expect("add again");

        assert_eq!(first, second);
        assert_eq!(store.active().items.len(), 1);
        assert_eq!(store.active().items[0].quantity, 2);
    }

    #[tokio::test]
    async fn append_policy_flows_through_the_store() {
        let mut store = QuoteStore::open(InMemoryStorage::default(), DuplicatePolicy::Append)
            .await
            .expect("open");
        let salad = menu_item(1, "Garden Salad", "Salads", 850);

        store.add_item(&salad, None).await.expect("add");
        store.add_item(&salad, None).await.expect("add again");

        assert_eq!(store.active().items.len(), 2);
    }

    #[tokio::test]
    async fn quantity_floor_removes_through_the_store() {
        let mut store = QuoteStore::open(InMemoryStorage::default(), DuplicatePolicy::Merge)
            .await
            .expect("open");
        let uid = store
            .add_item(&menu_item(1, "Garden Salad", "Salads", 850), None)
            .await
            .expect("add");

        store.update_quantity(&uid, 0).await.expect("quantity to zero");
        assert!(store.active().items.is_empty());
    }

    struct FailingStorage;

    #[async_trait]
    impl QuoteStorage for FailingStorage {
        async fn load(&self) -> Vec<Quote> {
            vec![Quote::new()]
        }

        async fn save(&self, _quotes: &[Quote]) -> Result<(), StorageError> {
            Err(StorageError::Write {
                path: PathBuf::from("quotes.json"),
                source: io::Error::new(io::ErrorKind::Other, "disk full"),
            })
        }
    }

    #[tokio::test]
    async fn write_failures_surface_to_the_caller() {
        let mut store =
            QuoteStore::open(FailingStorage, DuplicatePolicy::Merge).await.expect("open");

        let result = store.add_item(&menu_item(1, "Garden Salad", "Salads", 850), None).await;
        assert!(matches!(result, Err(StorageError::Write { .. })));
    }

    #[tokio::test]
    async fn noop_operations_skip_the_save() {
        // FailingStorage would error on any save; a missing uid must not
        // trigger one.
        let mut store =
            QuoteStore::open(FailingStorage, DuplicatePolicy::Merge).await.expect("open");
        let ghost = LineId::generate();

        store.update_quantity(&ghost, 3).await.expect("noop quantity");
        store.remove_item(&ghost).await.expect("noop remove");
        store.update_comment(&ghost, "nobody").await.expect("noop comment");
    }
}
