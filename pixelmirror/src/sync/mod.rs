//! Sync orchestration
//!
//! [`SyncService`] owns the pipeline's lifecycle: a full refresh of every
//! tile on startup (the only self-healing mechanism against missed or
//! reordered chain events), then a strictly sequential event loop where
//! each tile-updated notification re-renders that tile and rebuilds the
//! composite and map page in full.
//!
//! Events are processed one at a time in arrival order, with no
//! de-duplication of bursts. Rebuilding everything per event trades
//! efficiency for the impossibility of partial-redraw bugs; between
//! events the service idles on the channel.

use crate::chain::{ChainReader, TileUpdates};
use crate::composite::{CompositeAssembler, CompositeError};
use crate::grid::{Location, TILE_COUNT};
use crate::page::{MapPageRenderer, PageError};
use crate::render::{RenderError, TileRenderer};
use std::fmt;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Errors that can abort the sync pipeline.
///
/// Everything here is fatal for the pass in progress; transient chain
/// trouble is absorbed by the renderer's retry loop and never reaches
/// this level.
#[derive(Debug)]
pub enum SyncError {
    /// A tile render failed
    Render(RenderError),
    /// Composite assembly failed
    Composite(CompositeError),
    /// Map page rendering failed
    Page(PageError),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Render(e) => write!(f, "Render failed: {}", e),
            SyncError::Composite(e) => write!(f, "Composite assembly failed: {}", e),
            SyncError::Page(e) => write!(f, "Page rendering failed: {}", e),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<RenderError> for SyncError {
    fn from(err: RenderError) -> Self {
        SyncError::Render(err)
    }
}

impl From<CompositeError> for SyncError {
    fn from(err: CompositeError) -> Self {
        SyncError::Composite(err)
    }
}

impl From<PageError> for SyncError {
    fn from(err: PageError) -> Self {
        SyncError::Page(err)
    }
}

/// Orchestrates full refreshes and the tile-updated event loop.
pub struct SyncService<C: ChainReader> {
    renderer: TileRenderer<C>,
    assembler: CompositeAssembler,
    page: MapPageRenderer,
}

impl<C: ChainReader> SyncService<C> {
    /// Create a service over the three pipeline stages.
    pub fn new(
        renderer: TileRenderer<C>,
        assembler: CompositeAssembler,
        page: MapPageRenderer,
    ) -> Self {
        Self {
            renderer,
            assembler,
            page,
        }
    }

    /// Render every tile, then the composite, then the map page.
    ///
    /// Serial by design: renders are independent per location, but the
    /// composite and page must observe all of them, and a single worker
    /// keeps the pipeline's ordering trivial to reason about.
    pub async fn full_refresh(&self) -> Result<(), SyncError> {
        info!(tiles = TILE_COUNT, "starting full refresh");
        for location in Location::all() {
            self.renderer.render(location).await?;
        }
        self.assembler.assemble_all()?;
        self.page.render_page()?;
        info!("full refresh complete");
        Ok(())
    }

    /// Re-render one tile, then rebuild the composite and map page.
    pub async fn apply_update(&self, location: Location) -> Result<(), SyncError> {
        self.renderer.render(location).await?;
        self.assembler.assemble_all()?;
        self.page.render_page()?;
        Ok(())
    }

    /// Run the service: full refresh, then process updates until the
    /// stream closes or `shutdown` is cancelled.
    ///
    /// Cancellation is observed between events only; an in-flight update
    /// runs to completion first, so shutdown can leave the artifacts at
    /// most one event behind the chain, which the next full refresh heals.
    pub async fn run(
        &self,
        mut updates: TileUpdates,
        shutdown: CancellationToken,
    ) -> Result<(), SyncError> {
        self.full_refresh().await?;

        info!("watching for tile updates");
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("shutdown requested, stopping sync loop");
                    return Ok(());
                }
                maybe_location = updates.recv() => {
                    match maybe_location {
                        Some(location) => {
                            info!(location = location.index(), "tile updated on chain");
                            self.apply_update(location).await?;
                        }
                        None => {
                            warn!("tile update stream closed, stopping sync loop");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{MockChainReader, TileRecord};
    use crate::render::{FallbackImages, RenderConfig, RetryPolicy};
    use crate::store::{MemoryTileStore, TileStore};
    use std::path::Path;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    fn service(dir: &Path, chain: MockChainReader) -> (SyncService<MockChainReader>, Arc<MemoryTileStore>) {
        let store = Arc::new(MemoryTileStore::new());
        let config = RenderConfig {
            tiles_dir: dir.join("tiles"),
            default_url: "default.example".to_string(),
            fallbacks: FallbackImages::default(),
            retry: RetryPolicy {
                delay: Duration::from_millis(1),
                max_attempts: None,
            },
            marketplace: None,
        };
        let renderer = TileRenderer::new(chain, store.clone() as Arc<dyn TileStore>, config);
        let assembler =
            CompositeAssembler::new(dir.join("tiles"), dir.join("images/composite.png"));
        let page = MapPageRenderer::new(
            store.clone() as Arc<dyn TileStore>,
            dir.join("index.html"),
            "images/composite.png".to_string(),
        );
        (SyncService::new(renderer, assembler, page), store)
    }

    #[tokio::test]
    async fn test_apply_update_rebuilds_all_artifacts() {
        let dir = TempDir::new().unwrap();
        let location = Location::new(5).unwrap();
        let chain = MockChainReader::new().with_record(
            location,
            TileRecord {
                owner: "0xabc".to_string(),
                url: "mine.example".to_string(),
                ..Default::default()
            },
        );
        let (service, store) = service(dir.path(), chain);

        service.apply_update(location).await.unwrap();

        assert!(dir.path().join("tiles/5.png").exists());
        assert!(dir.path().join("images/composite.png").exists());
        assert!(dir.path().join("index.html").exists());
        assert_eq!(store.get_fields("5").unwrap()["url"], "mine.example");
    }

    #[tokio::test]
    async fn test_run_processes_updates_in_order_then_stops_on_close() {
        let dir = TempDir::new().unwrap();
        let (service, store) = service(dir.path(), MockChainReader::new());

        let (tx, rx) = mpsc::channel(8);
        tx.send(Location::new(1).unwrap()).await.unwrap();
        tx.send(Location::new(2).unwrap()).await.unwrap();
        drop(tx);

        // Full refresh plus two updates; returns when the stream closes.
        service
            .run(rx, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(store.len(), TILE_COUNT as usize);
        assert!(dir.path().join("tiles/1.png").exists());
        assert!(dir.path().join("tiles/2.png").exists());
    }

    #[tokio::test]
    async fn test_run_stops_on_cancellation() {
        let dir = TempDir::new().unwrap();
        let (service, _store) = service(dir.path(), MockChainReader::new());

        let (_tx, rx) = mpsc::channel(1);
        let shutdown = CancellationToken::new();
        shutdown.cancel();

        // Refresh completes, then the cancelled token ends the loop.
        service.run(rx, shutdown).await.unwrap();
    }
}
