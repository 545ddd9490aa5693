//! Configuration for PixelMirror components.
//!
//! Settings are loaded once at startup from an INI file and passed by
//! value into each component's constructor; nothing reads configuration
//! ambiently. A missing file yields defaults, so the service can start
//! against a local snapshot with zero setup.
//!
//! Structure: [`settings`] holds the structs and defaults, [`parser`] maps
//! INI keys onto them and is the single place key names live.

mod defaults;
mod parser;
mod settings;

pub use defaults::*;
pub use settings::{
    ChainSettings, OutputSettings, RenderSettings, Settings, StoreSettings,
};

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or parse the INI file
    #[error("Failed to read config file: {0}")]
    Read(#[from] ini::Error),

    /// A key held a value this pipeline cannot use
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}
