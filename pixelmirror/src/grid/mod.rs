//! Grid addressing module
//!
//! Provides conversions between the flat on-chain tile index ("location")
//! and the (x, y) cell coordinates of the 81×49 grid, plus the pixel
//! geometry of each cell on the composite canvas.

mod types;

pub use types::{GridError, Location, PixelRect};

/// Number of tile columns in the grid.
pub const GRID_WIDTH: u16 = 81;

/// Number of tile rows in the grid.
pub const GRID_HEIGHT: u16 = 49;

/// Total number of tiles (81 × 49).
pub const TILE_COUNT: u16 = GRID_WIDTH * GRID_HEIGHT;

/// Edge length of one tile in pixels.
pub const TILE_SIZE: u32 = 16;

/// Width of the composite canvas in pixels (81 × 16).
pub const MAP_WIDTH: u32 = GRID_WIDTH as u32 * TILE_SIZE;

/// Height of the composite canvas in pixels (49 × 16).
pub const MAP_HEIGHT: u32 = GRID_HEIGHT as u32 * TILE_SIZE;
