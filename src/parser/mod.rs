//! Score sheet parser
//!
//! Turns raw CSV text into [`Record`]s. The parser is lenient by design of
//! the data it reads: spreadsheet exports contain blank lines, quoted names
//! with commas and the odd row with a missing or extra cell.
//!
//! ## Pipeline
//!
//! - blank lines are skipped, the first remaining line holds the headers
//! - each data line is split by [`tokenizer::split_line`]
//! - rows whose cell count differs from the header count are dropped
//! - selected score columns are coerced (see [`crate::score`])
//! - the derived total is stored under [`TOTAL_LABEL`]
//!
//! ## Usage
//!
//! ```rust
//! use diem_thi::parser::parse;
//!
//! let records = parse("SBD,HỌ VÀ TÊN,TOÁN HỌC\n00123,\"Nguyễn Văn A, B\",250\n");
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].text("HỌ VÀ TÊN").as_deref(), Some("Nguyễn Văn A, B"));
//! ```

pub mod stats;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

pub use stats::{ParseResult, ParseStats};
pub use tokenizer::{split_header, split_line};

use crate::constants::{COERCED_LABELS, PROMOTED_LABELS, TOTAL_LABEL};
use crate::models::{CellValue, Record};
use crate::score::{coerce_score, total_score};
use tracing::debug;

/// Parse a score sheet into records, dropping malformed rows silently
pub fn parse(text: &str) -> Vec<Record> {
    parse_with_stats(text).records
}

/// Parse a score sheet and report what was kept and dropped
pub fn parse_with_stats(text: &str) -> ParseResult {
    let mut stats = ParseStats::new();
    let kept: Vec<&str> = text
        .split('\n')
        .inspect(|_| stats.total_lines += 1)
        .filter(|line| !line.trim().is_empty())
        .collect();
    stats.blank_lines = stats.total_lines - kept.len();

    let mut lines = kept.into_iter();
    let Some(header_line) = lines.next() else {
        return ParseResult {
            stats,
            ..Default::default()
        };
    };
    let headers = split_header(header_line);

    let mut records = Vec::new();
    for (index, line) in lines.enumerate() {
        let cells = split_line(line);
        if cells.len() != headers.len() {
            // Data line numbers count from 1, after the header
            debug!(
                "Dropping data line {}: {} cells, expected {}",
                index + 1,
                cells.len(),
                headers.len()
            );
            stats.rows_dropped += 1;
            continue;
        }

        records.push(build_record(&headers, cells));
        stats.records_parsed += 1;
    }

    debug!(
        "Parsed {} records, dropped {} rows, skipped {} blank lines",
        stats.records_parsed, stats.rows_dropped, stats.blank_lines
    );

    ParseResult {
        headers,
        records,
        stats,
    }
}

/// Build one record from a header row and a matching cell row
pub fn build_record(headers: &[String], cells: Vec<String>) -> Record {
    let mut record = Record::new();
    for (header, cell) in headers.iter().zip(cells) {
        record.insert(header.trim_end(), CellValue::Text(cell));
    }

    promote_trimmed_labels(&mut record);
    coerce_score_columns(&mut record);

    let total = total_score(&record);
    record.insert(TOTAL_LABEL, CellValue::Number(total));
    record
}

/// Copy the coerced value of trailing-space labels under their trimmed label
fn promote_trimmed_labels(record: &mut Record) {
    for label in PROMOTED_LABELS {
        let coerced = record.get(label).and_then(coerce_score);
        if let Some(value) = coerced {
            record.insert(label.trim_end(), value);
        }
    }
}

/// Replace raw values of the coerced score columns with their scores
fn coerce_score_columns(record: &mut Record) {
    for label in COERCED_LABELS {
        let coerced = record.get(label).and_then(coerce_score);
        if let Some(value) = coerced {
            record.insert(*label, value);
        }
    }
}
