//! Scripted chain reader for tests.

use super::{ChainError, ChainReader, TileRecord};
use crate::grid::Location;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Chain reader with scripted per-location records and optional leading
/// transient failures.
///
/// Locations without a scripted record read as the blank unowned tile
/// (all fields empty, price 0), matching a never-touched contract slot.
///
/// # Example
///
/// ```
/// use pixelmirror::chain::{ChainReader, MockChainReader, TileRecord};
/// use pixelmirror::grid::Location;
///
/// let mock = MockChainReader::new().with_transient_failures(2);
/// // The first two reads fail, the third succeeds.
/// ```
#[derive(Debug, Default)]
pub struct MockChainReader {
    records: Mutex<HashMap<Location, TileRecord>>,
    transient_failures: AtomicUsize,
    calls: AtomicUsize,
}

impl MockChainReader {
    /// Create a mock where every tile reads as blank and unowned.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the record returned for one location.
    pub fn with_record(self, location: Location, record: TileRecord) -> Self {
        self.records.lock().unwrap().insert(location, record);
        self
    }

    /// Fail the next `count` reads with a transient error before serving
    /// scripted records.
    pub fn with_transient_failures(self, count: usize) -> Self {
        self.transient_failures.store(count, Ordering::SeqCst);
        self
    }

    /// Number of `read_tile` calls made so far, failures included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ChainReader for MockChainReader {
    async fn read_tile(&self, location: Location) -> Result<TileRecord, ChainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let remaining = self.transient_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.transient_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(ChainError::Transient("scripted failure".to_string()));
        }

        Ok(self
            .records
            .lock()
            .unwrap()
            .get(&location)
            .cloned()
            .unwrap_or_default())
    }
}
