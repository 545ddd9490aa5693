//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use pixelmirror::chain::ChainError;
use pixelmirror::sync::SyncError;
use std::fmt;
use std::process;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to open the chain data source
    Chain(ChainError),
    /// Invalid tile location argument
    Location(String),
    /// Pipeline failure
    Sync(SyncError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::Chain(_) = self {
            eprintln!();
            eprintln!("The bundled reader serves tile records from a local snapshot file.");
            eprintln!("Point [chain] snapshot in the config at a tile-data JSON export,");
            eprintln!("or plug a live transport into the ChainReader trait.");
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Chain(e) => write!(f, "Failed to open chain data source: {}", e),
            CliError::Location(msg) => write!(f, "Invalid location: {}", msg),
            CliError::Sync(e) => write!(f, "Pipeline failed: {}", e),
        }
    }
}
