//! Tile image codec
//!
//! Decodes the on-chain tile image format: a 768-character hex string
//! holding 256 RGB triplets, one per pixel of a 16×16 grid, with a single
//! hex digit per color channel (4-bit color depth).
//!
//! Each digit is expanded to 8 bits by duplication (`0xA` → `0xAA`), the
//! same way CSS shorthand colors expand. Triplet `i` lands at grid
//! coordinate `(i % 16, i / 16)` - row-major, x-fastest.
//!
//! This module only operates on well-formed input; substituting a fallback
//! image for absent or malformed data is the renderer's decision.

use crate::grid::TILE_SIZE;
use image::{Rgb, RgbImage};
use std::fmt;

/// Required length of an encoded tile image: 256 pixels × 3 hex digits.
pub const IMAGE_HEX_LEN: usize = 768;

/// Errors that can occur decoding a tile image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input was not exactly 768 characters
    InvalidLength(usize),
    /// Input contained a non-hex character
    InvalidHexDigit(char),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InvalidLength(len) => {
                write!(
                    f,
                    "Image data is {} characters, expected exactly {}",
                    len, IMAGE_HEX_LEN
                )
            }
            CodecError::InvalidHexDigit(c) => {
                write!(f, "Image data contains non-hex character '{}'", c)
            }
        }
    }
}

impl std::error::Error for CodecError {}

/// Decode a 768-character hex image string into a 16×16 RGB image.
///
/// # Errors
///
/// Returns `CodecError::InvalidLength` for any other length and
/// `CodecError::InvalidHexDigit` for non-hex characters. Callers that
/// want the documented fallback behavior must substitute a placeholder
/// image before calling.
pub fn decode(image: &str) -> Result<RgbImage, CodecError> {
    if image.len() != IMAGE_HEX_LEN {
        return Err(CodecError::InvalidLength(image.len()));
    }

    let mut out = RgbImage::new(TILE_SIZE, TILE_SIZE);
    for (i, triplet) in image.as_bytes().chunks_exact(3).enumerate() {
        let r = expand_channel(triplet[0])?;
        let g = expand_channel(triplet[1])?;
        let b = expand_channel(triplet[2])?;
        let x = (i % TILE_SIZE as usize) as u32;
        let y = (i / TILE_SIZE as usize) as u32;
        out.put_pixel(x, y, Rgb([r, g, b]));
    }
    Ok(out)
}

/// Expand a single hex digit to an 8-bit channel value by duplication.
fn expand_channel(digit: u8) -> Result<u8, CodecError> {
    let nibble = (digit as char)
        .to_digit(16)
        .ok_or(CodecError::InvalidHexDigit(digit as char))? as u8;
    Ok(nibble << 4 | nibble)
}
