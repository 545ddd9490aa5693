//! Return-tuple layout binding.
//!
//! Deployed contract versions disagree on the order of the `getTile`
//! return tuple (some swap the `url` and `image` positions), so the
//! mapping from tuple position to record field is a binding concern read
//! from configuration, never hard-coded.

use super::{ChainError, TileRecord};
use std::fmt;
use std::str::FromStr;

/// One field of the tile record, as addressed by tuple position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileField {
    Owner,
    Url,
    Image,
    Price,
}

impl fmt::Display for TileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TileField::Owner => "owner",
            TileField::Url => "url",
            TileField::Image => "image",
            TileField::Price => "price",
        };
        write!(f, "{}", name)
    }
}

/// Mapping from return-tuple position to record field.
///
/// Parsed from a comma-separated field list, e.g. `owner,url,image,price`
/// (the deployed contract's order, and the default). All four fields must
/// appear exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleLayout {
    fields: [TileField; 4],
}

impl Default for TupleLayout {
    fn default() -> Self {
        TupleLayout {
            fields: [
                TileField::Owner,
                TileField::Url,
                TileField::Image,
                TileField::Price,
            ],
        }
    }
}

impl FromStr for TupleLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let names: Vec<&str> = s.split(',').map(str::trim).collect();
        if names.len() != 4 {
            return Err(format!("expected 4 fields, got {}", names.len()));
        }
        let mut fields = Vec::with_capacity(4);
        for name in &names {
            let field = match name.to_lowercase().as_str() {
                "owner" => TileField::Owner,
                "url" => TileField::Url,
                "image" => TileField::Image,
                "price" => TileField::Price,
                other => return Err(format!("unknown field '{}'", other)),
            };
            if fields.contains(&field) {
                return Err(format!("duplicate field '{}'", field));
            }
            fields.push(field);
        }
        Ok(TupleLayout {
            fields: [fields[0], fields[1], fields[2], fields[3]],
        })
    }
}

impl TupleLayout {
    /// Assemble a [`TileRecord`] from the raw tuple values in this layout's
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `ChainError::InvalidRecord` if the tuple has the wrong arity
    /// or the price position does not parse as an unsigned integer.
    pub fn record_from(&self, values: &[String]) -> Result<TileRecord, ChainError> {
        if values.len() != 4 {
            return Err(ChainError::InvalidRecord(format!(
                "expected 4 tuple values, got {}",
                values.len()
            )));
        }
        let mut record = TileRecord::default();
        for (field, value) in self.fields.iter().zip(values) {
            match field {
                TileField::Owner => record.owner = value.clone(),
                TileField::Url => record.url = value.clone(),
                TileField::Image => record.image = value.clone(),
                TileField::Price => {
                    record.price = value.parse().map_err(|_| {
                        ChainError::InvalidRecord(format!("price '{}' is not an integer", value))
                    })?;
                }
            }
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_layout_order() {
        let record = TupleLayout::default()
            .record_from(&values(&["0xabc", "example.com", "FFF", "10"]))
            .unwrap();
        assert_eq!(record.owner, "0xabc");
        assert_eq!(record.url, "example.com");
        assert_eq!(record.image, "FFF");
        assert_eq!(record.price, 10);
    }

    #[test]
    fn test_swapped_url_image_layout() {
        let layout: TupleLayout = "owner,image,url,price".parse().unwrap();
        let record = layout
            .record_from(&values(&["0xabc", "FFF", "example.com", "0"]))
            .unwrap();
        assert_eq!(record.image, "FFF");
        assert_eq!(record.url, "example.com");
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        assert!("owner,url,image".parse::<TupleLayout>().is_err());
    }

    #[test]
    fn test_parse_rejects_duplicate_field() {
        assert!("owner,url,url,price".parse::<TupleLayout>().is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_field() {
        assert!("owner,url,image,cost".parse::<TupleLayout>().is_err());
    }

    #[test]
    fn test_non_integer_price_is_invalid_record() {
        let err = TupleLayout::default()
            .record_from(&values(&["0xabc", "", "", "lots"]))
            .unwrap_err();
        assert!(matches!(err, ChainError::InvalidRecord(_)));
    }

    #[test]
    fn test_wrong_arity_is_invalid_record() {
        let err = TupleLayout::default()
            .record_from(&values(&["0xabc", "", ""]))
            .unwrap_err();
        assert!(matches!(err, ChainError::InvalidRecord(_)));
    }
}
