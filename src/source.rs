//! Score sheet sources.
//!
//! Fetching the CSV text is the only asynchronous step of a lookup. The
//! [`DataSource`] trait lets the session load from disk, over HTTP, or from
//! an in-memory fake in tests.

use crate::config::DataLocation;
use crate::error::{LookupError, Result};
use std::future::Future;
use std::path::PathBuf;
use tracing::debug;

/// Something that can produce the raw text of a score sheet
pub trait DataSource {
    /// Human readable location, used in logs
    fn describe(&self) -> String;

    /// Fetch the full CSV text
    fn fetch(&self) -> impl Future<Output = Result<String>> + Send;
}

/// Decode fetched bytes as UTF-8, dropping a leading byte order mark
pub fn decode_utf8(bytes: Vec<u8>, location: &str) -> Result<String> {
    let text = String::from_utf8(bytes).map_err(|_| LookupError::InvalidEncoding {
        location: location.to_string(),
    })?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// Score sheet stored on the local filesystem
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String> {
        debug!("Reading score sheet from {}", self.path.display());
        let bytes = tokio::fs::read(&self.path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LookupError::DataSourceNotFound {
                    path: self.path.clone(),
                }
            } else {
                LookupError::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;
        decode_utf8(bytes, &self.describe())
    }
}

/// Score sheet served over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    fn http_error(&self, source: reqwest::Error) -> LookupError {
        LookupError::Http {
            url: self.url.clone(),
            source,
        }
    }
}

impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String> {
        debug!("Fetching score sheet from {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| self.http_error(e))?;
        let bytes = response.bytes().await.map_err(|e| self.http_error(e))?;
        decode_utf8(bytes.to_vec(), &self.url)
    }
}

/// Source chosen at runtime from a configured [`DataLocation`]
#[derive(Debug, Clone)]
pub enum Source {
    File(FileSource),
    Http(HttpSource),
}

impl Source {
    pub fn from_location(location: &DataLocation) -> Self {
        match location {
            DataLocation::File(path) => Source::File(FileSource::new(path.clone())),
            DataLocation::Url(url) => Source::Http(HttpSource::new(url.clone())),
        }
    }
}

impl DataSource for Source {
    fn describe(&self) -> String {
        match self {
            Source::File(source) => source.describe(),
            Source::Http(source) => source.describe(),
        }
    }

    async fn fetch(&self) -> Result<String> {
        match self {
            Source::File(source) => source.fetch().await,
            Source::Http(source) => source.fetch().await,
        }
    }
}
