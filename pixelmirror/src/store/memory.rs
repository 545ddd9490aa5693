//! In-process tile store backed by a concurrent map.

use super::{StoreError, TileStore};
use dashmap::DashMap;
use std::collections::HashMap;

/// In-memory [`TileStore`] implementation.
///
/// Each `set_fields` replaces the whole map for its key in one insert,
/// so readers of that key never observe a partial update. Suitable for
/// tests and single-process deployments; it never reports
/// [`StoreError::Unavailable`].
///
/// # Example
///
/// ```
/// use pixelmirror::store::{MemoryTileStore, TileStore};
/// use std::collections::HashMap;
///
/// let store = MemoryTileStore::new();
/// store.set_fields("0", HashMap::from([("url".to_string(), "example.com".to_string())])).unwrap();
/// assert_eq!(store.get_fields("0").unwrap()["url"], "example.com");
/// ```
#[derive(Debug, Default)]
pub struct MemoryTileStore {
    entries: DashMap<String, HashMap<String, String>>,
}

impl MemoryTileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TileStore for MemoryTileStore {
    fn get_fields(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
        Ok(self
            .entries
            .get(key)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    fn set_fields(&self, key: &str, fields: HashMap<String, String>) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), fields);
        Ok(())
    }

    fn multi_get(&self, keys: &[String]) -> Result<Vec<HashMap<String, String>>, StoreError> {
        keys.iter().map(|key| self.get_fields(key)).collect()
    }
}
