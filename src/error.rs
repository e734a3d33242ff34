//! Error handling for exam result lookups.
//!
//! Covers loading the score sheet (local file or HTTP) and configuration
//! problems. Malformed CSV rows are not errors: the parser drops them.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Score sheet not found at path: {path}")]
    DataSourceNotFound { path: PathBuf },

    #[error("Score sheet at {location} is not valid UTF-8")]
    InvalidEncoding { location: String },

    #[error("Score sheet at {location} has no header line")]
    MissingHeader { location: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl LookupError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the error came from fetching the score sheet
    pub fn is_load_failure(&self) -> bool {
        !matches!(self, Self::Configuration { .. })
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
