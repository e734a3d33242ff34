//! Lookup session
//!
//! Owns the in-memory score table and the source it is loaded from. The
//! table is loaded at most once: [`Session::load`] is a no-op while records
//! are present, and [`Session::reload`] replaces the table wholesale.

#[cfg(test)]
pub mod tests;

use crate::constants::SBD_LABEL;
use crate::error::{LookupError, Result};
use crate::models::Record;
use crate::parser::{ParseStats, parse_with_stats};
use crate::source::DataSource;
use tracing::{debug, info};

/// Result of one search request
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    /// The identifier was empty after trimming; nothing was looked up
    EmptyQuery,
    /// No record carries this identifier
    NotFound(String),
    /// The matching record
    Found(&'a Record),
}

/// Find the first record whose trimmed `SBD` equals the trimmed identifier
pub fn find_record<'a>(records: &'a [Record], sbd: &str) -> Option<&'a Record> {
    let sbd = sbd.trim();
    records.iter().find(|record| {
        record
            .text(SBD_LABEL)
            .is_some_and(|value| value.trim() == sbd)
    })
}

/// Score table plus the source it comes from
#[derive(Debug)]
pub struct Session<S: DataSource> {
    source: S,
    records: Vec<Record>,
    last_stats: Option<ParseStats>,
}

impl<S: DataSource> Session<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            records: Vec::new(),
            last_stats: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Statistics of the most recent successful parse
    pub fn last_stats(&self) -> Option<&ParseStats> {
        self.last_stats.as_ref()
    }

    /// Whether the table holds any record
    pub fn is_loaded(&self) -> bool {
        !self.records.is_empty()
    }

    /// Load the score table unless it is already populated
    ///
    /// A sheet that parses to zero records leaves the table empty, so the
    /// next call fetches again.
    pub async fn load(&mut self) -> Result<usize> {
        if self.is_loaded() {
            debug!("Score table already loaded ({} records)", self.records.len());
            return Ok(self.records.len());
        }
        self.reload().await
    }

    /// Fetch and parse the score sheet, replacing the table on success
    ///
    /// On failure the previous table is kept untouched. A sheet without any
    /// non-blank line is a failure; a header with no data rows is not.
    pub async fn reload(&mut self) -> Result<usize> {
        let location = self.source.describe();
        info!("Loading score sheet from {}", location);
        let text = self.source.fetch().await?;

        let result = parse_with_stats(&text);
        if result.headers.is_empty() {
            return Err(LookupError::MissingHeader { location });
        }
        info!(
            "Loaded {} records ({} rows dropped)",
            result.stats.records_parsed, result.stats.rows_dropped
        );

        self.records = result.records;
        self.last_stats = Some(result.stats);
        Ok(self.records.len())
    }

    /// Look up a record in the loaded table
    pub fn find_by_sbd(&self, sbd: &str) -> Option<&Record> {
        find_record(&self.records, sbd)
    }

    /// Run one search: validate the identifier, load if needed, then look up
    ///
    /// Load failures are returned as errors; the table stays empty and a
    /// later search tries again.
    pub async fn search(&mut self, query: &str) -> Result<SearchOutcome<'_>> {
        let sbd = query.trim();
        if sbd.is_empty() {
            return Ok(SearchOutcome::EmptyQuery);
        }

        if !self.is_loaded() {
            self.load().await?;
        }

        debug!("Searching {} records for SBD {}", self.records.len(), sbd);
        Ok(match self.find_by_sbd(sbd) {
            Some(record) => SearchOutcome::Found(record),
            None => SearchOutcome::NotFound(sbd.to_string()),
        })
    }
}
