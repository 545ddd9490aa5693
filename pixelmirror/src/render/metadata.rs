//! Marketplace metadata sidecar.
//!
//! External NFT marketplaces read a JSON document per tile describing it
//! and pointing at a public copy of the upscaled image.

use crate::grid::Location;
use serde::{Deserialize, Serialize};

/// JSON sidecar written next to the large per-tile PNG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMetadata {
    /// Collection description, identical for every tile
    pub description: String,
    /// The tile's own URL as cached
    pub external_url: String,
    /// Public URL of the large rendered PNG
    pub image: String,
    /// Display name, `Tile #<location>`
    pub name: String,
}

impl TileMetadata {
    /// Build the sidecar document for one tile.
    ///
    /// # Arguments
    ///
    /// * `location` - Tile being described
    /// * `url` - The tile's URL after default substitution
    /// * `image_url_base` - Public base URL the large PNGs are served from
    /// * `description` - Collection description text
    pub fn new(location: Location, url: &str, image_url_base: &str, description: &str) -> Self {
        TileMetadata {
            description: description.to_string(),
            external_url: url.to_string(),
            image: format!("{}/{}.png", image_url_base.trim_end_matches('/'), location),
            name: format!("Tile #{}", location),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_and_image_use_location() {
        let meta = TileMetadata::new(
            Location::new(1985).unwrap(),
            "http://example.com",
            "https://tiles.example/large/",
            "desc",
        );
        assert_eq!(meta.name, "Tile #1985");
        assert_eq!(meta.image, "https://tiles.example/large/1985.png");
        assert_eq!(meta.external_url, "http://example.com");
    }

    #[test]
    fn test_serializes_with_expected_fields() {
        let meta = TileMetadata::new(
            Location::new(0).unwrap(),
            "http://example.com",
            "https://tiles.example",
            "desc",
        );
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["name"], "Tile #0");
        assert_eq!(json["external_url"], "http://example.com");
        assert_eq!(json["image"], "https://tiles.example/0.png");
        assert_eq!(json["description"], "desc");
    }
}
