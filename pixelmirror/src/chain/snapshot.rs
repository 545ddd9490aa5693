//! Chain reader backed by a local tile-data snapshot.
//!
//! Serves tile records from a JSON snapshot file (an array of records with
//! `id`, `owner`, `url`, `image`, `price` fields, the same shape the
//! historical mirror exported as `tiledata.json`). Useful for re-rendering
//! all artifacts from an export without a live chain endpoint.

use super::{ChainError, ChainReader, TileRecord};
use crate::grid::Location;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SnapshotRecord {
    id: u16,
    #[serde(default)]
    owner: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    price: u64,
}

/// Reads tile records from an in-memory copy of a tile-data JSON snapshot.
///
/// Locations absent from the snapshot read as the blank unowned tile.
#[derive(Debug)]
pub struct SnapshotChainReader {
    records: HashMap<Location, TileRecord>,
}

impl SnapshotChainReader {
    /// Load a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::Transient` if the file cannot be read (a
    /// missing snapshot is retryable like an unreachable endpoint) and
    /// `ChainError::InvalidRecord` if it is not valid snapshot JSON or
    /// contains an out-of-range tile id.
    pub fn load(path: &Path) -> Result<Self, ChainError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ChainError::Transient(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&data)
    }

    /// Parse a snapshot from a JSON string.
    pub fn from_json(data: &str) -> Result<Self, ChainError> {
        let raw: Vec<SnapshotRecord> = serde_json::from_str(data)
            .map_err(|e| ChainError::InvalidRecord(format!("bad snapshot: {}", e)))?;

        let mut records = HashMap::with_capacity(raw.len());
        for entry in raw {
            let location = Location::new(entry.id)
                .map_err(|e| ChainError::InvalidRecord(e.to_string()))?;
            records.insert(
                location,
                TileRecord {
                    owner: entry.owner,
                    url: entry.url,
                    image: entry.image,
                    price: entry.price,
                },
            );
        }
        Ok(SnapshotChainReader { records })
    }

    /// Number of records in the snapshot.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ChainReader for SnapshotChainReader {
    async fn read_tile(&self, location: Location) -> Result<TileRecord, ChainError> {
        Ok(self.records.get(&location).cloned().unwrap_or_default())
    }
}
