//! Composite canvas assembly
//!
//! Stitches every per-tile PNG into one 1296×784 image, each tile at its
//! grid rectangle. The composite is rebuilt from scratch on every refresh,
//! never diffed, so identical tile PNGs always produce a byte-identical
//! output file.
//!
//! A missing or unreadable tile PNG leaves its region at the black canvas
//! background. That degraded mode is logged and deliberate: one bad tile
//! must never abort a whole refresh.

use crate::grid::{Location, MAP_HEIGHT, MAP_WIDTH};
use image::{imageops, Rgb, RgbImage};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Errors that can occur assembling the composite.
///
/// Per-tile problems are degraded modes, not errors; only failures around
/// the output file itself surface here.
#[derive(Debug)]
pub enum CompositeError {
    /// Could not create the output directory
    Io {
        /// Path being written
        path: String,
        /// Underlying error
        error: std::io::Error,
    },
    /// PNG encoding of the canvas failed
    Encode(String),
}

impl fmt::Display for CompositeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositeError::Io { path, error } => {
                write!(f, "Failed to write '{}': {}", path, error)
            }
            CompositeError::Encode(msg) => write!(f, "Composite encoding failed: {}", msg),
        }
    }
}

impl std::error::Error for CompositeError {}

/// Assembles the full-grid composite PNG from per-tile PNGs on disk.
pub struct CompositeAssembler {
    tiles_dir: PathBuf,
    output_path: PathBuf,
}

impl CompositeAssembler {
    /// Create an assembler reading tile PNGs from `tiles_dir` and writing
    /// the composite to `output_path`.
    pub fn new(tiles_dir: PathBuf, output_path: PathBuf) -> Self {
        Self {
            tiles_dir,
            output_path,
        }
    }

    /// Build and write the composite.
    ///
    /// Iterates all 3969 locations in ascending order, pasting each tile's
    /// PNG at its grid rectangle on a black canvas.
    pub fn assemble_all(&self) -> Result<(), CompositeError> {
        let mut canvas = RgbImage::from_pixel(MAP_WIDTH, MAP_HEIGHT, Rgb([0, 0, 0]));
        let mut missing = 0usize;

        for location in Location::all() {
            let path = self.tiles_dir.join(format!("{}.png", location));
            match image::open(&path) {
                Ok(tile) => {
                    let rect = location.pixel_rect();
                    imageops::replace(
                        &mut canvas,
                        &tile.to_rgb8(),
                        rect.left as i64,
                        rect.top as i64,
                    );
                }
                Err(e) => {
                    missing += 1;
                    warn!(
                        location = location.index(),
                        path = %path.display(),
                        error = %e,
                        "tile PNG unreadable, leaving region black"
                    );
                }
            }
        }

        if let Some(parent) = self.output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CompositeError::Io {
                path: parent.display().to_string(),
                error: e,
            })?;
        }
        canvas
            .save(&self.output_path)
            .map_err(|e| CompositeError::Encode(e.to_string()))?;

        if missing > 0 {
            warn!(missing, "composite assembled with missing tiles");
        } else {
            debug!("composite assembled from all tiles");
        }
        info!(path = %self.output_path.display(), "wrote composite image");
        Ok(())
    }

    /// Path the composite is written to.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}
