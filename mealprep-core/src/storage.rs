//! The injected persistence capability and the records kept behind it.
//!
//! The engine persists exactly three things: the favorite set, the shopping
//! list and the daily-pick record. All of them cross the [`Store`] boundary
//! as JSON values, and every failure at that boundary degrades to a default
//! instead of propagating. Cross-tab or cross-process consistency is the
//! host's concern.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::StoreError;
use crate::types::{ListItem, Recipe};

pub const FAVORITES_KEY: &str = "mealprep_favs";
pub const LIST_KEY: &str = "mealprep_list";
pub const DAILY_KEY: &str = "mealprep.daily";

/// Key-value persistence capability, injected by the host.
pub trait Store {
    fn read(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn write(&self, key: &str, value: &Value) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// HashMap-backed store for tests and embedding hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl Store for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON document on disk. A missing file reads as
/// empty; every write rewrites the whole document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    fn load(&self) -> Result<HashMap<String, Value>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, entries: &HashMap<String, Value>) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl Store for FileStore {
    fn read(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.load()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.clone());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

/// Read and decode a stored record. Backend failures and malformed payloads
/// both degrade to `None` with a warning.
pub(crate) fn read_record<T: DeserializeOwned>(store: &dyn Store, key: &str) -> Option<T> {
    match store.read(key) {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(key, %err, "discarding malformed stored payload");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(key, %err, "store read failed, falling back to default");
            None
        }
    }
}

/// Encode and persist a record. Failures are logged and swallowed; the
/// in-memory state the caller holds stays authoritative for this call.
pub(crate) fn write_record<T: Serialize>(store: &dyn Store, key: &str, record: &T) {
    let value = match serde_json::to_value(record) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, %err, "failed to encode record for storage");
            return;
        }
    };
    if let Err(err) = store.write(key, &value) {
        tracing::warn!(key, %err, "store write failed");
    }
}

/// The persisted favorite slugs, in toggle order.
pub fn load_favorites(store: &dyn Store) -> Vec<String> {
    read_record(store, FAVORITES_KEY).unwrap_or_default()
}

pub fn is_favorite(store: &dyn Store, slug: &str) -> bool {
    load_favorites(store).iter().any(|s| s == slug)
}

/// Toggle a slug in the favorite set. Returns whether it is now a favorite.
pub fn toggle_favorite(store: &dyn Store, slug: &str) -> bool {
    let mut favorites = load_favorites(store);
    let now_favorite = if let Some(pos) = favorites.iter().position(|s| s == slug) {
        favorites.remove(pos);
        false
    } else {
        favorites.push(slug.to_string());
        true
    };
    write_record(store, FAVORITES_KEY, &favorites);
    now_favorite
}

/// Favorite recipes resolved against the catalog. Slugs that no longer
/// resolve (catalog update) are dropped from the view.
pub fn favorite_recipes<'a>(catalog: &'a [Recipe], store: &dyn Store) -> Vec<&'a Recipe> {
    load_favorites(store)
        .iter()
        .filter_map(|slug| catalog.iter().find(|r| &r.slug == slug))
        .collect()
}

/// The persisted shopping list, empty on any read failure.
pub fn load_list(store: &dyn Store) -> Vec<ListItem> {
    read_record(store, LIST_KEY).unwrap_or_default()
}

pub fn save_list(store: &dyn Store, list: &[ListItem]) {
    write_record(store, LIST_KEY, &list);
}
