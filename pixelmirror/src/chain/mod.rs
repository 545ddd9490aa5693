//! Chain read boundary
//!
//! The blockchain transport itself is an external collaborator; this module
//! only defines its contract: read the record for one tile location, and
//! deliver tile-updated events as a stream of locations.
//!
//! Implementations provided here are the [`SnapshotChainReader`] (serves
//! records from a local tile-data JSON snapshot) and [`MockChainReader`]
//! (scripted responses for tests). A live RPC transport plugs in by
//! implementing [`ChainReader`].

mod layout;
mod mock;
mod snapshot;
mod types;

pub use layout::{TileField, TupleLayout};
pub use mock::MockChainReader;
pub use snapshot::SnapshotChainReader;
pub use types::{ChainError, TileRecord};

use crate::grid::Location;
use std::future::Future;
use tokio::sync::mpsc;

/// Stream of tile-updated events, one location per on-chain update.
///
/// How events arrive (log filter, websocket, polling) is the transport's
/// concern; the sync service only consumes the receiving end.
pub type TileUpdates = mpsc::Receiver<Location>;

/// Trait for reading tile records from the chain.
///
/// Implementors expose the deployed contract's per-tile state. Reads may
/// fail transiently (endpoint unreachable, node not yet synced); callers
/// own the retry policy.
pub trait ChainReader: Send + Sync {
    /// Reads the on-chain record for one tile.
    ///
    /// # Arguments
    ///
    /// * `location` - Flat tile index in `[0, 3969)`
    ///
    /// # Returns
    ///
    /// The tile's current on-chain state, or an error.
    fn read_tile(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<TileRecord, ChainError>> + Send;
}

/// Checks whether an address is the all-zero "null owner" sentinel.
///
/// Tolerates an optional `0x` prefix and mixed case; an empty address is
/// treated as unowned as well.
pub fn is_zero_address(address: &str) -> bool {
    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);
    digits.chars().all(|c| c == '0')
}
