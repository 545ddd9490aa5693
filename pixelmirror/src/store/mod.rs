//! Tile cache boundary
//!
//! The cache's storage engine is an external collaborator; this module
//! defines the narrow key-value contract the pipeline needs: a flat
//! string field-map per key, with per-key atomic replacement and an
//! order-preserving batched multi-get.
//!
//! [`MemoryTileStore`] is the in-process implementation used by tests and
//! as the default local store; a networked store plugs in by implementing
//! [`TileStore`].

mod memory;

pub use memory::MemoryTileStore;

use std::collections::HashMap;
use std::fmt;

/// Field name for the owning address in the cached field-map.
pub const FIELD_OWNER: &str = "owner";

/// Field name for the tile URL in the cached field-map.
pub const FIELD_URL: &str = "url";

/// Errors that can occur talking to the store.
///
/// The store is the one collaborator the pipeline cannot degrade around:
/// an unavailable store fails the affected stage outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Store endpoint unavailable
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "Tile store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// The cached per-tile projection: just enough to render the HTML map
/// without querying the chain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CacheEntry {
    /// Owning address as read from the chain
    pub owner: String,
    /// Tile URL after default substitution
    pub url: String,
}

impl CacheEntry {
    /// Convert to the flat field-map stored under the tile's key.
    pub fn to_fields(&self) -> HashMap<String, String> {
        HashMap::from([
            (FIELD_OWNER.to_string(), self.owner.clone()),
            (FIELD_URL.to_string(), self.url.clone()),
        ])
    }

    /// Rebuild from a stored field-map; missing fields read as empty
    /// strings, so a never-rendered tile yields a blank entry rather
    /// than an error.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        CacheEntry {
            owner: fields.get(FIELD_OWNER).cloned().unwrap_or_default(),
            url: fields.get(FIELD_URL).cloned().unwrap_or_default(),
        }
    }
}

/// Key-value store abstraction for cached tile projections.
///
/// Keys are stringified tile locations. `set_fields` must replace the
/// whole field-map atomically per key: a concurrent reader of the same
/// key sees either the old map or the new one, never a partial update.
pub trait TileStore: Send + Sync {
    /// Get all fields stored under `key`; empty map if the key is absent.
    fn get_fields(&self, key: &str) -> Result<HashMap<String, String>, StoreError>;

    /// Replace the field-map stored under `key`.
    fn set_fields(&self, key: &str, fields: HashMap<String, String>) -> Result<(), StoreError>;

    /// Batched get: one field-map per key, in the order the keys were
    /// given. Preferred over per-key round trips when reading the whole
    /// grid.
    fn multi_get(&self, keys: &[String]) -> Result<Vec<HashMap<String, String>>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_entry_field_roundtrip() {
        let entry = CacheEntry {
            owner: "0xabc".to_string(),
            url: "example.com".to_string(),
        };
        assert_eq!(CacheEntry::from_fields(&entry.to_fields()), entry);
    }

    #[test]
    fn test_missing_fields_read_as_empty() {
        let entry = CacheEntry::from_fields(&HashMap::new());
        assert_eq!(entry, CacheEntry::default());
    }

    #[test]
    fn test_unavailable_display() {
        let err = StoreError::Unavailable("connection reset".to_string());
        assert_eq!(err.to_string(), "Tile store unavailable: connection reset");
    }
}
