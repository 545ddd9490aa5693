//! INI parsing logic for converting `Ini` → `Settings`.
//!
//! The single place where INI key names are mapped to struct fields.
//! Starts from `Settings::default()` and overlays any values found.

use super::settings::Settings;
use super::ConfigError;
use crate::codec::IMAGE_HEX_LEN;
use ini::Ini;
use std::path::PathBuf;

pub(super) fn parse_ini(ini: &Ini) -> Result<Settings, ConfigError> {
    let mut settings = Settings::default();

    if let Some(section) = ini.section(Some("chain")) {
        if let Some(v) = section.get("endpoint") {
            settings.chain.endpoint = v.trim().to_string();
        }
        if let Some(v) = section.get("contract_address") {
            settings.chain.contract_address = v.trim().to_string();
        }
        if let Some(v) = section.get("tuple_layout") {
            settings.chain.tuple_layout =
                v.parse().map_err(|reason| ConfigError::InvalidValue {
                    section: "chain".to_string(),
                    key: "tuple_layout".to_string(),
                    value: v.to_string(),
                    reason,
                })?;
        }
        if let Some(v) = section.get("snapshot") {
            let v = v.trim();
            if !v.is_empty() {
                settings.chain.snapshot = Some(PathBuf::from(v));
            }
        }
    }

    if let Some(section) = ini.section(Some("store")) {
        if let Some(v) = section.get("endpoint") {
            settings.store.endpoint = v.trim().to_string();
        }
    }

    if let Some(section) = ini.section(Some("render")) {
        if let Some(v) = section.get("default_url") {
            settings.render.default_url = v.trim().to_string();
        }
        for (key, slot) in [
            ("default_tile", &mut settings.render.default_tile),
            ("owned_tile", &mut settings.render.owned_tile),
            ("for_sale_tile", &mut settings.render.for_sale_tile),
        ] {
            if let Some(v) = section.get(key) {
                *slot = Some(validate_tile_hex("render", key, v)?);
            }
        }
        if let Some(v) = section.get("retry_delay_secs") {
            settings.render.retry_delay_secs =
                v.parse().map_err(|_| ConfigError::InvalidValue {
                    section: "render".to_string(),
                    key: "retry_delay_secs".to_string(),
                    value: v.to_string(),
                    reason: "expected a non-negative integer".to_string(),
                })?;
        }
        if let Some(v) = section.get("retry_max_attempts") {
            settings.render.retry_max_attempts =
                Some(v.parse().map_err(|_| ConfigError::InvalidValue {
                    section: "render".to_string(),
                    key: "retry_max_attempts".to_string(),
                    value: v.to_string(),
                    reason: "expected a positive integer".to_string(),
                })?);
        }
        if let Some(v) = section.get("marketplace_artifacts") {
            settings.render.marketplace_artifacts =
                v.parse().map_err(|_| ConfigError::InvalidValue {
                    section: "render".to_string(),
                    key: "marketplace_artifacts".to_string(),
                    value: v.to_string(),
                    reason: "expected 'true' or 'false'".to_string(),
                })?;
        }
        if let Some(v) = section.get("image_url_base") {
            settings.render.image_url_base = v.trim().to_string();
        }
        if let Some(v) = section.get("metadata_description") {
            settings.render.metadata_description = v.trim().to_string();
        }
    }

    if let Some(section) = ini.section(Some("output")) {
        if let Some(v) = section.get("tiles_dir") {
            settings.output.tiles_dir = PathBuf::from(v.trim());
        }
        if let Some(v) = section.get("large_dir") {
            settings.output.large_dir = PathBuf::from(v.trim());
        }
        if let Some(v) = section.get("metadata_dir") {
            settings.output.metadata_dir = PathBuf::from(v.trim());
        }
        if let Some(v) = section.get("composite_path") {
            settings.output.composite_path = PathBuf::from(v.trim());
        }
        if let Some(v) = section.get("page_path") {
            settings.output.page_path = PathBuf::from(v.trim());
        }
        if let Some(v) = section.get("composite_src") {
            settings.output.composite_src = v.trim().to_string();
        }
    }

    Ok(settings)
}

/// A placeholder override must itself be a well-formed tile encoding.
fn validate_tile_hex(section: &str, key: &str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.len() != IMAGE_HEX_LEN || !value.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: format!("expected exactly {} hex characters", IMAGE_HEX_LEN),
        });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::TupleLayout;

    fn parse(content: &str) -> Result<Settings, ConfigError> {
        parse_ini(&Ini::load_from_str(content).unwrap())
    }

    #[test]
    fn test_empty_ini_yields_defaults() {
        assert_eq!(parse("").unwrap(), Settings::default());
    }

    #[test]
    fn test_full_parse() {
        let settings = parse(
            "[chain]\n\
             endpoint = http://geth.internal:8545\n\
             contract_address = 0x015A06a433353f8db634dF4eDdF0C109882A15AB\n\
             tuple_layout = owner,image,url,price\n\
             \n\
             [store]\n\
             endpoint = cache.internal:6379\n\
             \n\
             [render]\n\
             default_url = tiles.example\n\
             retry_delay_secs = 2\n\
             retry_max_attempts = 10\n\
             marketplace_artifacts = true\n\
             \n\
             [output]\n\
             tiles_dir = /var/lib/pixelmirror/tiles\n",
        )
        .unwrap();

        assert_eq!(settings.chain.endpoint, "http://geth.internal:8545");
        assert_eq!(
            settings.chain.tuple_layout,
            "owner,image,url,price".parse::<TupleLayout>().unwrap()
        );
        assert_eq!(settings.store.endpoint, "cache.internal:6379");
        assert_eq!(settings.render.default_url, "tiles.example");
        assert_eq!(settings.render.retry_delay_secs, 2);
        assert_eq!(settings.render.retry_max_attempts, Some(10));
        assert!(settings.render.marketplace_artifacts);
        assert_eq!(
            settings.output.tiles_dir,
            PathBuf::from("/var/lib/pixelmirror/tiles")
        );
    }

    #[test]
    fn test_bad_tuple_layout_rejected() {
        let err = parse("[chain]\ntuple_layout = owner,url\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "tuple_layout"));
    }

    #[test]
    fn test_short_tile_override_rejected() {
        let content = format!("[render]\ndefault_tile = {}\n", "F".repeat(767));
        let err = parse(&content).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "default_tile"));
    }

    #[test]
    fn test_valid_tile_override_accepted() {
        let content = format!("[render]\nowned_tile = {}\n", "A".repeat(768));
        let settings = parse(&content).unwrap();
        assert_eq!(settings.render.owned_tile, Some("A".repeat(768)));
    }

    #[test]
    fn test_bad_retry_delay_rejected() {
        let err = parse("[render]\nretry_delay_secs = soon\n").unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "retry_delay_secs")
        );
    }
}
