//! Location and geometry types for the tile grid.

use super::{GRID_HEIGHT, GRID_WIDTH, TILE_COUNT, TILE_SIZE};
use std::fmt;

/// Errors that can occur constructing grid addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Flat index outside `[0, 3969)`
    InvalidLocation(u16),
    /// Cell coordinates outside the 81×49 grid
    InvalidCell { x: u16, y: u16 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidLocation(index) => {
                write!(f, "Location {} out of range (0..{})", index, TILE_COUNT)
            }
            GridError::InvalidCell { x, y } => {
                write!(
                    f,
                    "Cell ({}, {}) outside the {}×{} grid",
                    x, y, GRID_WIDTH, GRID_HEIGHT
                )
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Flat index of one tile, row-major over the 81-wide, 49-tall grid.
///
/// Every valid location maps to exactly one `(x, y)` cell and back:
/// `x = location % 81`, `y = location / 81` (integer floor division).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location(u16);

impl Location {
    /// Create a location from a flat index.
    ///
    /// # Errors
    ///
    /// Returns `GridError::InvalidLocation` if `index >= 3969`.
    pub fn new(index: u16) -> Result<Self, GridError> {
        if index >= TILE_COUNT {
            return Err(GridError::InvalidLocation(index));
        }
        Ok(Location(index))
    }

    /// Create a location from cell coordinates.
    ///
    /// # Errors
    ///
    /// Returns `GridError::InvalidCell` if either coordinate is outside
    /// the grid.
    pub fn from_xy(x: u16, y: u16) -> Result<Self, GridError> {
        if x >= GRID_WIDTH || y >= GRID_HEIGHT {
            return Err(GridError::InvalidCell { x, y });
        }
        Ok(Location(y * GRID_WIDTH + x))
    }

    /// The flat index in `[0, 3969)`.
    pub fn index(&self) -> u16 {
        self.0
    }

    /// Column of this tile, in `[0, 81)`.
    pub fn x(&self) -> u16 {
        self.0 % GRID_WIDTH
    }

    /// Row of this tile, in `[0, 49)`.
    pub fn y(&self) -> u16 {
        self.0 / GRID_WIDTH
    }

    /// The pixel rectangle this tile occupies on the composite canvas.
    pub fn pixel_rect(&self) -> PixelRect {
        let left = self.x() as u32 * TILE_SIZE;
        let top = self.y() as u32 * TILE_SIZE;
        PixelRect {
            left,
            top,
            right: left + TILE_SIZE,
            bottom: top + TILE_SIZE,
        }
    }

    /// Iterate every location in ascending index order.
    pub fn all() -> impl Iterator<Item = Location> {
        (0..TILE_COUNT).map(Location)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open pixel rectangle `[left, top, right, bottom)` on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}
