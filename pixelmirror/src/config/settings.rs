//! Settings structs and their defaults.

use super::defaults::*;
use super::ConfigError;
use crate::chain::TupleLayout;
use crate::render::{FallbackImages, MarketplaceConfig, RenderConfig, RetryPolicy};
use ini::Ini;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Chain connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSettings {
    /// RPC endpoint of the chain node
    pub endpoint: String,
    /// Address of the deployed tile-grid contract
    pub contract_address: String,
    /// Return-tuple field order of the deployed contract's `getTile`
    pub tuple_layout: TupleLayout,
    /// Optional local tile-data snapshot to read instead of a live node
    pub snapshot: Option<PathBuf>,
}

impl Default for ChainSettings {
    fn default() -> Self {
        ChainSettings {
            endpoint: DEFAULT_CHAIN_ENDPOINT.to_string(),
            contract_address: String::new(),
            tuple_layout: TupleLayout::default(),
            snapshot: None,
        }
    }
}

/// Tile store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// Store endpoint address
    pub endpoint: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            endpoint: DEFAULT_STORE_ENDPOINT.to_string(),
        }
    }
}

/// Rendering policy settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    /// URL substituted when a tile's URL is empty
    pub default_url: String,
    /// Override for the unowned placeholder image (768 hex chars)
    pub default_tile: Option<String>,
    /// Override for the owned-but-blank placeholder image
    pub owned_tile: Option<String>,
    /// Override for the for-sale placeholder image
    pub for_sale_tile: Option<String>,
    /// Delay between chain-read retries, in seconds
    pub retry_delay_secs: u64,
    /// Attempt bound for chain reads; `None` retries indefinitely
    pub retry_max_attempts: Option<u32>,
    /// Whether to write the large PNG and metadata sidecar per tile
    pub marketplace_artifacts: bool,
    /// Public base URL for the large PNGs
    pub image_url_base: String,
    /// Collection description for metadata sidecars
    pub metadata_description: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            default_url: DEFAULT_TILE_URL.to_string(),
            default_tile: None,
            owned_tile: None,
            for_sale_tile: None,
            retry_delay_secs: DEFAULT_RETRY_DELAY_SECS,
            retry_max_attempts: None,
            marketplace_artifacts: false,
            image_url_base: DEFAULT_IMAGE_URL_BASE.to_string(),
            metadata_description: DEFAULT_METADATA_DESCRIPTION.to_string(),
        }
    }
}

/// Artifact output locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    /// Directory for the 16×16 per-tile PNGs
    pub tiles_dir: PathBuf,
    /// Directory for the large marketplace PNGs
    pub large_dir: PathBuf,
    /// Directory for the metadata JSON sidecars
    pub metadata_dir: PathBuf,
    /// Path of the stitched composite PNG
    pub composite_path: PathBuf,
    /// Path of the HTML map page
    pub page_path: PathBuf,
    /// `src` the map page uses to reference the composite
    pub composite_src: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            tiles_dir: PathBuf::from(DEFAULT_TILES_DIR),
            large_dir: PathBuf::from(DEFAULT_LARGE_DIR),
            metadata_dir: PathBuf::from(DEFAULT_METADATA_DIR),
            composite_path: PathBuf::from(DEFAULT_COMPOSITE_PATH),
            page_path: PathBuf::from(DEFAULT_PAGE_PATH),
            composite_src: DEFAULT_COMPOSITE_SRC.to_string(),
        }
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub chain: ChainSettings,
    pub store: StoreSettings,
    pub render: RenderSettings,
    pub output: OutputSettings,
}

impl Settings {
    /// Load settings from an INI file.
    ///
    /// A missing file yields defaults; a malformed or invalid file is an
    /// error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// The placeholder image set, with any configured overrides applied.
    pub fn fallback_images(&self) -> FallbackImages {
        let defaults = FallbackImages::default();
        FallbackImages {
            default_tile: self
                .render
                .default_tile
                .clone()
                .unwrap_or(defaults.default_tile),
            owned_tile: self.render.owned_tile.clone().unwrap_or(defaults.owned_tile),
            for_sale_tile: self
                .render
                .for_sale_tile
                .clone()
                .unwrap_or(defaults.for_sale_tile),
        }
    }

    /// The chain-read retry policy.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            delay: Duration::from_secs(self.render.retry_delay_secs),
            max_attempts: self.render.retry_max_attempts,
        }
    }

    /// Build the renderer configuration from these settings.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            tiles_dir: self.output.tiles_dir.clone(),
            default_url: self.render.default_url.clone(),
            fallbacks: self.fallback_images(),
            retry: self.retry_policy(),
            marketplace: self.render.marketplace_artifacts.then(|| MarketplaceConfig {
                large_dir: self.output.large_dir.clone(),
                metadata_dir: self.output.metadata_dir.clone(),
                image_url_base: self.render.image_url_base.clone(),
                description: self.render.metadata_description.clone(),
            }),
        }
    }
}
