//! Error types for tile rendering.

use crate::codec::CodecError;
use crate::store::StoreError;
use std::fmt;

/// Errors that can occur rendering one tile.
///
/// Transient chain failures never surface here; the renderer retries them
/// internally. What remains is genuinely fatal for the render in progress.
#[derive(Debug)]
pub enum RenderError {
    /// Chain read gave up after the configured attempt bound
    RetriesExhausted {
        /// Tile being rendered
        location: u16,
        /// Attempts made before giving up
        attempts: u32,
        /// Last transient error seen
        last_error: String,
    },
    /// Resolved image data failed to decode
    Decode(CodecError),
    /// Cache write failed
    Store(StoreError),
    /// Artifact write failed
    Io {
        /// Path being written
        path: String,
        /// Underlying error
        error: std::io::Error,
    },
    /// PNG encoding failed
    Image(String),
    /// Metadata sidecar serialization failed
    Metadata(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::RetriesExhausted {
                location,
                attempts,
                last_error,
            } => {
                write!(
                    f,
                    "Chain read for tile {} failed after {} attempts: {}",
                    location, attempts, last_error
                )
            }
            RenderError::Decode(e) => write!(f, "Image decode failed: {}", e),
            RenderError::Store(e) => write!(f, "Cache write failed: {}", e),
            RenderError::Io { path, error } => {
                write!(f, "Failed to write '{}': {}", path, error)
            }
            RenderError::Image(msg) => write!(f, "PNG encoding failed: {}", msg),
            RenderError::Metadata(msg) => write!(f, "Metadata serialization failed: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<CodecError> for RenderError {
    fn from(err: CodecError) -> Self {
        RenderError::Decode(err)
    }
}

impl From<StoreError> for RenderError {
    fn from(err: StoreError) -> Self {
        RenderError::Store(err)
    }
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        RenderError::Image(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retries_exhausted_display() {
        let err = RenderError::RetriesExhausted {
            location: 42,
            attempts: 3,
            last_error: "connection refused".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("42"));
        assert!(msg.contains("3 attempts"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_store_error_converts() {
        let err: RenderError = StoreError::Unavailable("down".to_string()).into();
        assert!(matches!(err, RenderError::Store(_)));
    }

    #[test]
    fn test_error_trait() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<RenderError>();
    }
}
