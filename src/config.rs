//! Configuration management and validation.
//!
//! Holds where the score sheet comes from and how reports are printed.
//! Built from defaults, then overridden by command-line arguments.

use crate::constants::{DEFAULT_DATA_PATH, HTTP_SCHEMES};
use crate::error::{LookupError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Where the score sheet is read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataLocation {
    /// Local file, relative paths resolve against the working directory
    File(PathBuf),
    /// HTTP(S) URL
    Url(String),
}

impl DataLocation {
    /// Interpret a user-supplied location; `http://` and `https://` select a URL
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if HTTP_SCHEMES
            .iter()
            .any(|scheme| value.to_ascii_lowercase().starts_with(scheme))
        {
            DataLocation::Url(value.to_string())
        } else {
            DataLocation::File(PathBuf::from(value))
        }
    }
}

impl Default for DataLocation {
    fn default() -> Self {
        DataLocation::File(PathBuf::from(DEFAULT_DATA_PATH))
    }
}

impl fmt::Display for DataLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataLocation::File(path) => write!(f, "{}", path.display()),
            DataLocation::Url(url) => f.write_str(url),
        }
    }
}

/// Report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReportFormat {
    /// Coloured terminal report with score bars
    #[default]
    Text,
    /// HTML fragment matching the web page markup
    Html,
}

/// Global configuration for exam result lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Score sheet location
    pub data: DataLocation,

    /// Report output format
    pub format: ReportFormat,

    /// Colourise terminal output
    pub color: bool,

    /// Load the score sheet at startup instead of on the first search
    pub preload: bool,

    /// Show a spinner while the score sheet loads
    pub show_progress: bool,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            data: DataLocation::default(),
            format: ReportFormat::Text,
            color: true,
            preload: true,
            show_progress: true,
        }
    }
}

impl LookupConfig {
    /// Create configuration with a custom score sheet location
    pub fn with_data(mut self, data: DataLocation) -> Self {
        self.data = data;
        self
    }

    /// Create configuration with a custom report format
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Disable colour output
    pub fn without_color(mut self) -> Self {
        self.color = false;
        self
    }

    /// Defer loading until the first search
    pub fn without_preload(mut self) -> Self {
        self.preload = false;
        self
    }

    /// Hide the loading spinner
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Check the configuration before any I/O happens
    pub fn validate(&self) -> Result<()> {
        match &self.data {
            DataLocation::File(path) if path.as_os_str().is_empty() => {
                return Err(LookupError::configuration("score sheet path is empty"));
            }
            DataLocation::File(path) if path.is_dir() => {
                return Err(LookupError::configuration(format!(
                    "score sheet path {} is a directory",
                    path.display()
                )));
            }
            DataLocation::Url(url) if HTTP_SCHEMES.iter().any(|scheme| url.as_str() == *scheme) => {
                return Err(LookupError::configuration(format!(
                    "score sheet URL '{}' has no host",
                    url
                )));
            }
            _ => {}
        }

        debug!("Configuration validated: data={}, format={:?}", self.data, self.format);
        Ok(())
    }
}
