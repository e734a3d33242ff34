//! Parsing statistics and result structures

use crate::models::Record;

/// Counters collected while parsing one score sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseStats {
    /// Lines in the input, blank ones included
    pub total_lines: usize,
    /// Lines skipped because they were empty after trimming
    pub blank_lines: usize,
    /// Data lines turned into records
    pub records_parsed: usize,
    /// Data lines dropped for a cell count different from the header count
    pub rows_dropped: usize,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-blank lines after the header
    pub fn data_lines(&self) -> usize {
        self.records_parsed + self.rows_dropped
    }

    /// Percentage of data lines kept
    pub fn success_rate(&self) -> f64 {
        if self.data_lines() == 0 {
            100.0
        } else {
            (self.records_parsed as f64 / self.data_lines() as f64) * 100.0
        }
    }
}

/// Records of a parsed score sheet with their statistics
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
    pub stats: ParseStats,
}
