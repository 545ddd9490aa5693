//! Per-tile rendering
//!
//! [`TileRenderer`] turns one tile's on-chain record into local artifacts:
//! the 16×16 PNG, the cache entry behind the HTML map, and (when enabled)
//! the large marketplace PNG with its JSON sidecar.
//!
//! The chain read is the only step allowed to fail transiently, and it is
//! retried with a fixed delay until it succeeds: a tile is never rendered
//! from guessed state. Every other substitution (default URL, placeholder
//! images) is deterministic, so re-rendering an unchanged record is
//! byte-identical.

mod error;
mod fallback;
mod metadata;

pub use error::RenderError;
pub use fallback::{
    default_tile_image, for_sale_tile_image, owned_tile_image, FallbackImages,
};
pub use metadata::TileMetadata;

use crate::chain::{is_zero_address, ChainReader, TileRecord};
use crate::codec::{self, IMAGE_HEX_LEN};
use crate::grid::Location;
use crate::store::{CacheEntry, TileStore};
use image::imageops::{self, FilterType};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Edge length of the large marketplace render in pixels.
pub const LARGE_TILE_SIZE: u32 = 350;

/// Retry policy for the chain read.
///
/// The reference behavior retries forever; a `max_attempts` bound is an
/// explicit opt-in for deployments that prefer failing over blocking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Fixed delay between attempts
    pub delay: Duration,
    /// Attempt bound; `None` retries indefinitely
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            delay: Duration::from_secs(5),
            max_attempts: None,
        }
    }
}

/// Settings for the optional marketplace artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketplaceConfig {
    /// Directory for the 350×350 upscaled PNGs
    pub large_dir: PathBuf,
    /// Directory for the JSON sidecars
    pub metadata_dir: PathBuf,
    /// Public base URL the large PNGs are served from
    pub image_url_base: String,
    /// Collection description written into every sidecar
    pub description: String,
}

/// Renderer configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Directory for the 16×16 per-tile PNGs
    pub tiles_dir: PathBuf,
    /// URL substituted when a tile's URL is empty
    pub default_url: String,
    /// Placeholder images for absent or malformed image data
    pub fallbacks: FallbackImages,
    /// Chain read retry policy
    pub retry: RetryPolicy,
    /// Marketplace artifacts; `None` disables them
    pub marketplace: Option<MarketplaceConfig>,
}

/// Renders single tiles: chain read with retry, fallback resolution,
/// decode, PNG write, cache update.
///
/// This is the sole write path to the cache; each successful render
/// replaces the tile's `{owner, url}` entry atomically.
pub struct TileRenderer<C: ChainReader> {
    chain: C,
    store: Arc<dyn TileStore>,
    config: RenderConfig,
}

impl<C: ChainReader> TileRenderer<C> {
    /// Create a renderer over the given chain reader and store.
    pub fn new(chain: C, store: Arc<dyn TileStore>, config: RenderConfig) -> Self {
        Self {
            chain,
            store,
            config,
        }
    }

    /// Render one tile to completion.
    ///
    /// Blocks (asynchronously) on the chain read until it succeeds or the
    /// configured attempt bound is hit. A crash mid-render leaves the
    /// previous PNG and cache entry intact; each write fully replaces its
    /// predecessor, so at worst the tile is stale, never corrupt.
    pub async fn render(&self, location: Location) -> Result<(), RenderError> {
        let record = self.read_with_retry(location).await?;
        debug!(
            location = location.index(),
            owner = %record.owner,
            price = record.price,
            "resolved tile record"
        );

        let url = resolve_url(&record.url, &self.config.default_url);
        let image_hex = resolve_image(&record, &self.config.fallbacks);
        let image = codec::decode(&image_hex)?;

        let tile_path = self.tile_path(location);
        write_png(&image, &tile_path)?;

        // Sole cache write path; the whole field-map is replaced per key.
        let entry = CacheEntry {
            owner: record.owner.clone(),
            url: url.clone(),
        };
        self.store
            .set_fields(&location.to_string(), entry.to_fields())?;

        if let Some(marketplace) = &self.config.marketplace {
            let large = imageops::resize(
                &image,
                LARGE_TILE_SIZE,
                LARGE_TILE_SIZE,
                FilterType::Nearest,
            );
            write_png(&large, &marketplace.large_dir.join(format!("{}.png", location)))?;

            let sidecar = TileMetadata::new(
                location,
                &url,
                &marketplace.image_url_base,
                &marketplace.description,
            );
            write_json(&sidecar, &marketplace.metadata_dir.join(format!("{}.json", location)))?;
        }

        info!(location = location.index(), "rendered tile");
        Ok(())
    }

    /// Path of the 16×16 PNG for a location.
    pub fn tile_path(&self, location: Location) -> PathBuf {
        self.config.tiles_dir.join(format!("{}.png", location))
    }

    async fn read_with_retry(&self, location: Location) -> Result<TileRecord, RenderError> {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let error = match self.chain.read_tile(location).await {
                Ok(record) => return Ok(record),
                Err(e) => e,
            };

            // Retry transient and invalid reads alike: the endpoint may be
            // mid-sync and serving garbage, and rendering from guessed
            // state is never acceptable.
            warn!(
                location = location.index(),
                attempts,
                error = %error,
                "chain read failed, retrying"
            );
            if let Some(max) = self.config.retry.max_attempts {
                if attempts >= max {
                    return Err(RenderError::RetriesExhausted {
                        location: location.index(),
                        attempts,
                        last_error: error.to_string(),
                    });
                }
            }
            tokio::time::sleep(self.config.retry.delay).await;
        }
    }
}

/// Substitute the configured default when the tile has no URL.
fn resolve_url(url: &str, default_url: &str) -> String {
    if url.is_empty() {
        default_url.to_string()
    } else {
        url.to_string()
    }
}

/// Pick the encoded image to render for a record.
///
/// Image data that is not exactly 768 characters after trimming is treated
/// as absent: the zero-address sentinel selects the generic default tile,
/// any other owner the owned-but-blank tile. A non-zero price overrides
/// the image (but never the URL) with the for-sale placeholder.
fn resolve_image(record: &TileRecord, fallbacks: &FallbackImages) -> String {
    if record.price != 0 {
        return fallbacks.for_sale_tile.clone();
    }
    let trimmed = record.image.trim();
    if trimmed.len() == IMAGE_HEX_LEN {
        trimmed.to_string()
    } else if is_zero_address(&record.owner) {
        fallbacks.default_tile.clone()
    } else {
        fallbacks.owned_tile.clone()
    }
}

fn write_png(image: &image::RgbImage, path: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| RenderError::Io {
            path: parent.display().to_string(),
            error: e,
        })?;
    }
    image.save(path)?;
    Ok(())
}

fn write_json(metadata: &TileMetadata, path: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| RenderError::Io {
            path: parent.display().to_string(),
            error: e,
        })?;
    }
    let body = serde_json::to_string_pretty(metadata)
        .map_err(|e| RenderError::Metadata(e.to_string()))?;
    std::fs::write(path, body).map_err(|e| RenderError::Io {
        path: path.display().to_string(),
        error: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::MockChainReader;
    use crate::store::MemoryTileStore;
    use tempfile::TempDir;

    const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";
    const OWNER: &str = "0x015A06a433353f8db634dF4eDdF0C109882A15AB";

    fn test_config(dir: &TempDir) -> RenderConfig {
        RenderConfig {
            tiles_dir: dir.path().join("tiles"),
            default_url: "pixelmirror.example".to_string(),
            fallbacks: FallbackImages::default(),
            retry: RetryPolicy {
                delay: Duration::from_millis(1),
                max_attempts: None,
            },
            marketplace: None,
        }
    }

    fn record(owner: &str, image: &str, url: &str, price: u64) -> TileRecord {
        TileRecord {
            owner: owner.to_string(),
            image: image.to_string(),
            url: url.to_string(),
            price,
        }
    }

    #[test]
    fn test_resolve_image_unowned_blank_selects_default_tile() {
        let fallbacks = FallbackImages::default();
        let resolved = resolve_image(&record(ZERO_ADDRESS, "", "", 0), &fallbacks);
        assert_eq!(resolved, fallbacks.default_tile);
    }

    #[test]
    fn test_resolve_image_owned_blank_selects_owned_tile() {
        let fallbacks = FallbackImages::default();
        let resolved = resolve_image(&record(OWNER, "", "", 0), &fallbacks);
        assert_eq!(resolved, fallbacks.owned_tile);
    }

    #[test]
    fn test_resolve_image_for_sale_overrides_everything() {
        let fallbacks = FallbackImages::default();
        let well_formed = "F".repeat(IMAGE_HEX_LEN);
        let resolved = resolve_image(&record(OWNER, &well_formed, "", 100), &fallbacks);
        assert_eq!(resolved, fallbacks.for_sale_tile);
    }

    #[test]
    fn test_resolve_image_malformed_length_treated_as_absent() {
        let fallbacks = FallbackImages::default();
        for len in [767, 769] {
            let resolved = resolve_image(&record(OWNER, &"F".repeat(len), "", 0), &fallbacks);
            assert_eq!(resolved, fallbacks.owned_tile, "length {}", len);
        }
    }

    #[test]
    fn test_resolve_image_trims_whitespace() {
        let fallbacks = FallbackImages::default();
        let padded = format!(" {} \n", "A".repeat(IMAGE_HEX_LEN));
        let resolved = resolve_image(&record(OWNER, &padded, "", 0), &fallbacks);
        assert_eq!(resolved, "A".repeat(IMAGE_HEX_LEN));
    }

    #[test]
    fn test_resolve_url_substitutes_default() {
        assert_eq!(resolve_url("", "default.example"), "default.example");
        assert_eq!(resolve_url("mine.example", "default.example"), "mine.example");
    }

    #[tokio::test]
    async fn test_render_writes_png_and_cache_entry() {
        let dir = TempDir::new().unwrap();
        let location = Location::new(0).unwrap();
        let store = Arc::new(MemoryTileStore::new());
        let chain = MockChainReader::new()
            .with_record(location, record(OWNER, &"A".repeat(IMAGE_HEX_LEN), "mine.example", 0));
        let renderer = TileRenderer::new(chain, store.clone(), test_config(&dir));

        renderer.render(location).await.unwrap();

        assert!(renderer.tile_path(location).exists());
        let fields = store.get_fields("0").unwrap();
        assert_eq!(fields["owner"], OWNER);
        assert_eq!(fields["url"], "mine.example");
    }

    #[tokio::test]
    async fn test_render_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let location = Location::new(17).unwrap();
        let store = Arc::new(MemoryTileStore::new());
        let chain = MockChainReader::new()
            .with_record(location, record(OWNER, &"5D2".repeat(256), "mine.example", 0));
        let renderer = TileRenderer::new(chain, store.clone(), test_config(&dir));

        renderer.render(location).await.unwrap();
        let first_png = std::fs::read(renderer.tile_path(location)).unwrap();
        let first_fields = store.get_fields("17").unwrap();

        renderer.render(location).await.unwrap();
        let second_png = std::fs::read(renderer.tile_path(location)).unwrap();
        let second_fields = store.get_fields("17").unwrap();

        assert_eq!(first_png, second_png);
        assert_eq!(first_fields, second_fields);
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_retries_transient_failures() {
        let dir = TempDir::new().unwrap();
        let location = Location::new(3).unwrap();
        let store = Arc::new(MemoryTileStore::new());
        let chain = MockChainReader::new()
            .with_record(location, record(ZERO_ADDRESS, "", "", 0))
            .with_transient_failures(2);
        let config = RenderConfig {
            retry: RetryPolicy::default(),
            ..test_config(&dir)
        };
        let renderer = TileRenderer::new(chain, store, config);

        renderer.render(location).await.unwrap();

        // Two failures, two waits, success on the third call.
        assert_eq!(renderer.chain.calls(), 3);
    }

    #[tokio::test]
    async fn test_render_gives_up_at_attempt_bound() {
        let dir = TempDir::new().unwrap();
        let location = Location::new(3).unwrap();
        let store = Arc::new(MemoryTileStore::new());
        let chain = MockChainReader::new().with_transient_failures(10);
        let config = RenderConfig {
            retry: RetryPolicy {
                delay: Duration::from_millis(1),
                max_attempts: Some(2),
            },
            ..test_config(&dir)
        };
        let renderer = TileRenderer::new(chain, store, config);

        let err = renderer.render(location).await.unwrap_err();
        assert!(matches!(err, RenderError::RetriesExhausted { attempts: 2, .. }));
    }

    #[tokio::test]
    async fn test_render_unowned_tile_uses_default_url_and_tile() {
        let dir = TempDir::new().unwrap();
        let location = Location::new(0).unwrap();
        let store = Arc::new(MemoryTileStore::new());
        let chain =
            MockChainReader::new().with_record(location, record(ZERO_ADDRESS, "", "", 0));
        let renderer = TileRenderer::new(chain, store.clone(), test_config(&dir));

        renderer.render(location).await.unwrap();

        let fields = store.get_fields("0").unwrap();
        assert_eq!(fields["owner"], ZERO_ADDRESS);
        assert_eq!(fields["url"], "pixelmirror.example");

        let png = image::open(renderer.tile_path(location)).unwrap().to_rgb8();
        let expected = codec::decode(&default_tile_image()).unwrap();
        assert_eq!(png.as_raw(), expected.as_raw());
    }

    #[tokio::test]
    async fn test_render_writes_marketplace_artifacts() {
        let dir = TempDir::new().unwrap();
        let location = Location::new(9).unwrap();
        let store = Arc::new(MemoryTileStore::new());
        let chain = MockChainReader::new()
            .with_record(location, record(OWNER, &"F".repeat(IMAGE_HEX_LEN), "mine.example", 0));
        let config = RenderConfig {
            marketplace: Some(MarketplaceConfig {
                large_dir: dir.path().join("large"),
                metadata_dir: dir.path().join("metadata"),
                image_url_base: "https://tiles.example".to_string(),
                description: "test collection".to_string(),
            }),
            ..test_config(&dir)
        };
        let renderer = TileRenderer::new(chain, store, config);

        renderer.render(location).await.unwrap();

        let large = image::open(dir.path().join("large/9.png")).unwrap().to_rgb8();
        assert_eq!(large.dimensions(), (LARGE_TILE_SIZE, LARGE_TILE_SIZE));

        let sidecar: TileMetadata =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("metadata/9.json")).unwrap())
                .unwrap();
        assert_eq!(sidecar.name, "Tile #9");
        assert_eq!(sidecar.external_url, "mine.example");
        assert_eq!(sidecar.image, "https://tiles.example/9.png");
    }
}
