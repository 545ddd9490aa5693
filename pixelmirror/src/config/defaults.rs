//! Default configuration values.

/// Default chain RPC endpoint.
pub const DEFAULT_CHAIN_ENDPOINT: &str = "http://localhost:8545";

/// Default tile store endpoint.
pub const DEFAULT_STORE_ENDPOINT: &str = "localhost:6379";

/// Default URL substituted for tiles that never set one.
pub const DEFAULT_TILE_URL: &str = "pixelmirror.io";

/// Default delay between chain-read retries, in seconds.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 5;

/// Default directory for the 16×16 per-tile PNGs.
pub const DEFAULT_TILES_DIR: &str = "tiles";

/// Default directory for the large marketplace PNGs.
pub const DEFAULT_LARGE_DIR: &str = "large";

/// Default directory for the metadata JSON sidecars.
pub const DEFAULT_METADATA_DIR: &str = "metadata";

/// Default path of the stitched composite PNG.
pub const DEFAULT_COMPOSITE_PATH: &str = "images/composite.png";

/// Default path of the HTML map page.
pub const DEFAULT_PAGE_PATH: &str = "index.html";

/// Default `src` the map page uses to reference the composite.
pub const DEFAULT_COMPOSITE_SRC: &str = "images/composite.png";

/// Default public base URL for the large PNGs named in metadata sidecars.
pub const DEFAULT_IMAGE_URL_BASE: &str = "https://pixelmirror.io/large";

/// Default collection description written into metadata sidecars.
pub const DEFAULT_METADATA_DESCRIPTION: &str =
    "On-chain tile with owner-supplied artwork and URL, mirrored from the \
     deployed tile-grid contract. Image and URL live entirely on chain.";
