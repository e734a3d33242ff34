//! Core data structures for exam result records.
//!
//! Defines the subject enumeration, the per-cell value variant and the
//! ordered record mapping produced by the parser.

use crate::constants::ABSENT_DISPLAY;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Subjects
// =============================================================================

/// Scored exam subjects, in the fixed order used for totals and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    Vietnamese,
    English,
    Mathematics,
    Logic,
    Chemistry,
    Physics,
    Biology,
    Geography,
    History,
    Civics,
}

impl Subject {
    /// All subjects in summation and display order
    pub const ALL: [Subject; 10] = [
        Subject::Vietnamese,
        Subject::English,
        Subject::Mathematics,
        Subject::Logic,
        Subject::Chemistry,
        Subject::Physics,
        Subject::Biology,
        Subject::Geography,
        Subject::History,
        Subject::Civics,
    ];

    /// Column label of this subject in the score sheet
    pub fn label(&self) -> &'static str {
        match self {
            Subject::Vietnamese => "TIẾNG VIỆT",
            Subject::English => "TIẾNG ANH",
            Subject::Mathematics => "TOÁN HỌC",
            Subject::Logic => "LOGIC-PTSL",
            Subject::Chemistry => "HÓA HỌC",
            Subject::Physics => "VẬT LÝ",
            Subject::Biology => "SINH HỌC",
            Subject::Geography => "ĐỊA LÝ",
            Subject::History => "LỊCH SỬ",
            Subject::Civics => "KTPL",
        }
    }

    /// Maximum attainable score, used to scale report bars
    pub fn max_score(&self) -> f64 {
        match self {
            Subject::Vietnamese | Subject::English | Subject::Mathematics => 300.0,
            Subject::Logic => 120.0,
            _ => 30.0,
        }
    }

    /// Map a column label to a subject; unknown labels are not subjects
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|subject| subject.label() == label)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Cell Values
// =============================================================================

/// Value of one record field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Raw trimmed cell text, or a score that failed coercion
    Text(String),
    /// Coerced score or derived total
    Number(f64),
    /// Student was absent or excused
    Absent,
}

impl CellValue {
    /// Build a text cell
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// True for an empty text cell
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.is_empty())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Absent => f.write_str(ABSENT_DISPLAY),
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// One parsed score sheet row: header label to cell value, in column order
///
/// Inserting an existing label replaces its value in place, so duplicate
/// headers resolve to the last value while keeping the first position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, CellValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field
    pub fn insert(&mut self, label: impl Into<String>, value: CellValue) {
        let label = label.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// Value of a subject column, if the sheet has it
    pub fn subject(&self, subject: Subject) -> Option<&CellValue> {
        self.get(subject.label())
    }

    /// Display text of a field
    pub fn text(&self, label: &str) -> Option<String> {
        self.get(label).map(|value| value.to_string())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(label, value)| (label.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
