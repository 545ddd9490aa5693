//! PixelMirror - On-chain tile grid mirroring
//!
//! This library mirrors the state of a fixed 81×49 grid of on-chain tiles
//! (each owned by an address, carrying a URL and a 16×16-pixel image encoded
//! as a 768-character hex string) into a local cache and rendered artifacts:
//! per-tile PNGs, a stitched composite PNG, and an HTML image map.
//!
//! # High-Level API
//!
//! The [`sync`] module provides the orchestrating service:
//!
//! ```ignore
//! use pixelmirror::config::Settings;
//! use pixelmirror::sync::SyncService;
//!
//! let settings = Settings::load_from(Path::new("config.ini"))?;
//! let service = SyncService::new(renderer, assembler, page_renderer);
//!
//! // Full refresh, then process tile-updated events until shutdown
//! service.run(updates, shutdown).await?;
//! ```

pub mod chain;
pub mod codec;
pub mod composite;
pub mod config;
pub mod grid;
pub mod logging;
pub mod page;
pub mod render;
pub mod store;
pub mod sync;

/// Version of the PixelMirror library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
