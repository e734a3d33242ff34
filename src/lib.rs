//! Exam result lookup library
//!
//! Reads a CSV score sheet, turns every row into a [`Record`], and finds a
//! student's results by examination identifier (SBD).
//!
//! This library provides tools for:
//! - Parsing score sheets with quoted fields and malformed-row tolerance
//! - Coercing score cells (decimal commas, absence markers) and totalling them
//! - Loading the sheet once per session from a file or an HTTP URL
//! - Rendering a score report as terminal text or an HTML fragment

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;
pub mod report;
pub mod score;
pub mod session;
pub mod source;

// Re-export commonly used types
pub use config::{DataLocation, LookupConfig, ReportFormat};
pub use error::{LookupError, Result};
pub use models::{CellValue, Record, Subject};
pub use parser::{parse, parse_with_stats};
pub use report::ScoreReport;
pub use score::{coerce_score, is_valid_score, total_score};
pub use session::{SearchOutcome, Session};
pub use source::{DataSource, FileSource, HttpSource, Source};
