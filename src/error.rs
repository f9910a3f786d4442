//! Errors of the fallible startup path.
//!
//! World operations never fail with an error value; conflicts and misses are
//! reported through `bool` and `Option`. Only loading configuration can fail.

use std::path::PathBuf;

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying read failure.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON for the config schema.
    #[error("Failed to parse config: {source}")]
    Parse {
        /// The deserializer's error.
        #[from]
        source: serde_json::Error,
    },

    /// A value parsed but is out of range.
    #[error("Invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}
