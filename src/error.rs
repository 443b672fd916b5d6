//! Errors from the fallible edges of the simulator (files, config, export).
//!
//! The numeric core never fails; degenerate inputs show up as non-finite
//! values in the output instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// Configuration file could not be read
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::config::SimConfig`]
    #[error("failed to parse config: {source}")]
    ConfigParse {
        #[from]
        source: toml::de::Error,
    },

    /// Tick period derived from `dt` is not a usable duration
    #[error("tick period must be a positive, finite number of seconds (dt = {dt})")]
    InvalidTickPeriod { dt: f64 },

    /// JSON serialization failed
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Any other I/O failure (export files, stdout)
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
