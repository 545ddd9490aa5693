//! PixelMirror CLI - Command-line interface
//!
//! This binary drives the tile mirroring pipeline: a one-shot full
//! refresh, a single-tile render, or the long-running sync service.

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use pixelmirror::chain::SnapshotChainReader;
use pixelmirror::composite::CompositeAssembler;
use pixelmirror::config::Settings;
use pixelmirror::grid::Location;
use pixelmirror::logging;
use pixelmirror::page::MapPageRenderer;
use pixelmirror::render::TileRenderer;
use pixelmirror::store::{MemoryTileStore, TileStore};
use pixelmirror::sync::SyncService;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser)]
#[command(name = "pixelmirror")]
#[command(version = pixelmirror::VERSION)]
#[command(about = "Mirror an on-chain tile grid into rendered artifacts", long_about = None)]
struct Args {
    /// Path to the INI configuration file
    #[arg(long, default_value = "config.ini")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Full refresh, then process tile updates until interrupted
    Sync,
    /// Render every tile, the composite, and the map page once, then exit
    Refresh,
    /// Re-render one tile (plus composite and map page)
    Render {
        /// Flat tile index in [0, 3969)
        #[arg(long)]
        location: u16,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let _guard = match logging::init_logging(logging::default_log_dir(), logging::default_log_file())
    {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    let settings = match Settings::load_from(&args.config) {
        Ok(settings) => settings,
        Err(e) => CliError::Config(e.to_string()).exit(),
    };
    info!(config = %args.config.display(), "loaded configuration");

    let snapshot_path = settings
        .chain
        .snapshot
        .clone()
        .unwrap_or_else(|| PathBuf::from("tiledata.json"));
    let chain = match SnapshotChainReader::load(&snapshot_path) {
        Ok(chain) => chain,
        Err(e) => CliError::Chain(e).exit(),
    };
    info!(
        snapshot = %snapshot_path.display(),
        records = chain.len(),
        "loaded chain snapshot"
    );

    let store: Arc<dyn TileStore> = Arc::new(MemoryTileStore::new());
    let renderer = TileRenderer::new(chain, store.clone(), settings.render_config());
    let assembler = CompositeAssembler::new(
        settings.output.tiles_dir.clone(),
        settings.output.composite_path.clone(),
    );
    let page = MapPageRenderer::new(
        store,
        settings.output.page_path.clone(),
        settings.output.composite_src.clone(),
    );
    let service = SyncService::new(renderer, assembler, page);

    let result = match args.command {
        Command::Refresh => service.full_refresh().await,
        Command::Render { location } => match Location::new(location) {
            Ok(location) => service.apply_update(location).await,
            Err(e) => CliError::Location(e.to_string()).exit(),
        },
        Command::Sync => {
            // Live transports push update locations into this channel; the
            // snapshot reader emits none, so the service idles after the
            // refresh until Ctrl-C.
            let (tx, rx) = mpsc::channel::<Location>(64);
            let shutdown = CancellationToken::new();
            let signal_token = shutdown.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    signal_token.cancel();
                }
                drop(tx);
            });
            service.run(rx, shutdown).await
        }
    };

    if let Err(e) = result {
        CliError::Sync(e).exit();
    }
}
