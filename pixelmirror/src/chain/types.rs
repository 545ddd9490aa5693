//! Chain record and error types.

use serde::Deserialize;
use std::fmt;

/// One tile's on-chain state, read-only to this system.
///
/// `image` is either empty or a 768-character hex string (256 RGB triplets,
/// one per pixel of the 16×16 tile); any other length is treated as absent
/// by the renderer. A non-zero `price` means the tile is listed for sale.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct TileRecord {
    /// Owning address (all-zero sentinel for unowned tiles)
    #[serde(default)]
    pub owner: String,
    /// Encoded tile image, empty if never set
    #[serde(default)]
    pub image: String,
    /// Owner-supplied URL, empty if never set
    #[serde(default)]
    pub url: String,
    /// Listing price; interpreted only as a non-zero "for sale" flag
    #[serde(default)]
    pub price: u64,
}

/// Errors that can occur reading from the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// Endpoint unreachable or node not yet synced; worth retrying
    Transient(String),
    /// Response did not match the expected tuple layout
    InvalidRecord(String),
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainError::Transient(msg) => write!(f, "Transient chain error: {}", msg),
            ChainError::InvalidRecord(msg) => write!(f, "Invalid tile record: {}", msg),
        }
    }
}

impl std::error::Error for ChainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_blank() {
        let record = TileRecord::default();
        assert!(record.owner.is_empty());
        assert!(record.image.is_empty());
        assert!(record.url.is_empty());
        assert_eq!(record.price, 0);
    }

    #[test]
    fn test_transient_display() {
        let err = ChainError::Transient("connection refused".to_string());
        assert_eq!(err.to_string(), "Transient chain error: connection refused");
    }

    #[test]
    fn test_error_trait() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<ChainError>();
    }
}
