//! Score validation, coercion and totals.
//!
//! Every score cell goes through the same ordered checks:
//! 1. empty input is no score at all,
//! 2. an absence marker (`VẮNG`, `N/V`, any case) is the absence sentinel,
//! 3. otherwise the first comma becomes a decimal point and the longest
//!    leading numeric prefix is parsed.
//!
//! A value failing all three is kept as text and contributes nothing to totals.

use crate::constants::ABSENCE_MARKERS;
use crate::models::{CellValue, Record, Subject};
use regex::Regex;
use std::sync::LazyLock;

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("leading number pattern is valid")
});

/// True when the text contains an absence marker, ignoring case
pub fn has_absence_marker(value: &str) -> bool {
    let upper = value.to_uppercase();
    ABSENCE_MARKERS.iter().any(|marker| upper.contains(marker))
}

/// Parse the longest finite numeric prefix of `value`, after leading whitespace
///
/// `"12abc"` parses as 12, `"7,5"` as 7 (no comma handling here).
pub fn parse_leading_number(value: &str) -> Option<f64> {
    let candidate = value.trim_start();
    let matched = LEADING_NUMBER.find(candidate)?;
    matched
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Parse a score string accepting a decimal comma (`"7,5"` is 7.5)
///
/// Only the first comma is rewritten.
pub fn parse_score_number(value: &str) -> Option<f64> {
    parse_leading_number(&value.replacen(',', ".", 1))
}

/// Whether a cell holds a usable numeric score
pub fn is_valid_score(value: &CellValue) -> bool {
    match value {
        CellValue::Absent => false,
        CellValue::Number(n) => n.is_finite(),
        CellValue::Text(s) => {
            !s.is_empty() && !has_absence_marker(s) && parse_score_number(s).is_some()
        }
    }
}

/// Coerce a cell into a score
///
/// Returns `None` for empty input, `Absent` for absence markers, `Number`
/// when the value parses, and the original value unchanged otherwise.
pub fn coerce_score(value: &CellValue) -> Option<CellValue> {
    match value {
        CellValue::Text(s) if s.is_empty() => None,
        CellValue::Text(s) if has_absence_marker(s) => Some(CellValue::Absent),
        CellValue::Text(s) => Some(
            parse_score_number(s)
                .map(CellValue::Number)
                .unwrap_or_else(|| value.clone()),
        ),
        CellValue::Number(_) | CellValue::Absent => Some(value.clone()),
    }
}

/// Numeric contribution of one cell to a total; zero when not a valid score
pub fn score_contribution(value: &CellValue) -> f64 {
    if !is_valid_score(value) {
        return 0.0;
    }
    coerce_score(value)
        .and_then(|coerced| coerced.as_number())
        .unwrap_or(0.0)
}

/// Sum of all valid subject scores of a record, in fixed subject order
pub fn total_score(record: &Record) -> f64 {
    Subject::ALL
        .iter()
        .filter_map(|subject| record.subject(*subject))
        .map(score_contribution)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> CellValue {
        CellValue::text(value)
    }

    #[test]
    fn test_absence_markers_any_case() {
        assert!(has_absence_marker("VẮNG"));
        assert!(has_absence_marker("vắng"));
        assert!(has_absence_marker("Vắng thi"));
        assert!(has_absence_marker("n/v"));
        assert!(has_absence_marker("N/V"));
        assert!(!has_absence_marker("8.5"));
    }

    #[test]
    fn test_decimal_comma() {
        assert_eq!(parse_score_number("7,5"), Some(7.5));
        assert_eq!(coerce_score(&text("7,5")), Some(CellValue::Number(7.5)));
        // Only the first comma is a decimal point
        assert_eq!(parse_score_number("1,2,3"), Some(1.2));
    }

    #[test]
    fn test_leading_prefix_parsing() {
        assert_eq!(parse_leading_number("12abc"), Some(12.0));
        assert_eq!(parse_leading_number("  8.25 "), Some(8.25));
        assert_eq!(parse_leading_number("-3"), Some(-3.0));
        assert_eq!(parse_leading_number(".5"), Some(0.5));
        assert_eq!(parse_leading_number("1e2"), Some(100.0));
        assert_eq!(parse_leading_number("1e"), Some(1.0));
        assert_eq!(parse_leading_number("7,5"), Some(7.0));
        assert_eq!(parse_leading_number("abc"), None);
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("Infinity"), None);
        assert_eq!(parse_leading_number("1e999"), None);
    }

    #[test]
    fn test_prefix_stops_at_non_ascii_digits() {
        assert_eq!(parse_leading_number("12\u{FF15}"), Some(12.0));
        assert_eq!(parse_leading_number("1e\u{0663}"), Some(1.0));
        assert_eq!(parse_leading_number("\u{0663}"), None);
        assert_eq!(parse_score_number("8,5\u{FF15}"), Some(8.5));

        let mut record = Record::new();
        record.insert("KTPL", text("8\u{FF15}"));
        assert_eq!(total_score(&record), 8.0);
        assert_eq!(
            coerce_score(&text("9\u{FF15}")),
            Some(CellValue::Number(9.0))
        );
    }

    #[test]
    fn test_is_valid_score() {
        assert!(is_valid_score(&text("250")));
        assert!(is_valid_score(&text("7,5")));
        assert!(is_valid_score(&CellValue::Number(0.0)));
        assert!(!is_valid_score(&text("")));
        assert!(!is_valid_score(&text("N/V")));
        assert!(!is_valid_score(&text("vắng")));
        assert!(!is_valid_score(&text("abc")));
        assert!(!is_valid_score(&CellValue::Absent));
        assert!(!is_valid_score(&CellValue::Number(f64::NAN)));
    }

    #[test]
    fn test_coerce_score_order_of_checks() {
        assert_eq!(coerce_score(&text("")), None);
        // Absence wins over a numeric prefix
        assert_eq!(coerce_score(&text("0 vắng")), Some(CellValue::Absent));
        assert_eq!(coerce_score(&text("280")), Some(CellValue::Number(280.0)));
        assert_eq!(coerce_score(&text("miễn thi")), Some(text("miễn thi")));
        assert_eq!(coerce_score(&CellValue::Absent), Some(CellValue::Absent));
        assert_eq!(
            coerce_score(&CellValue::Number(5.0)),
            Some(CellValue::Number(5.0))
        );
    }

    #[test]
    fn test_total_score_example() {
        let mut record = Record::new();
        for (label, value) in [
            ("TIẾNG VIỆT", "250"),
            ("TIẾNG ANH", "N/V"),
            ("TOÁN HỌC", "280"),
            ("LOGIC-PTSL", "100"),
            ("HÓA HỌC", "25"),
            ("VẬT LÝ", "20"),
            ("SINH HỌC", ""),
            ("ĐỊA LÝ", "15"),
            ("LỊCH SỬ", "10"),
            ("KTPL", "8"),
        ] {
            record.insert(label, text(value));
        }

        assert_eq!(total_score(&record), 708.0);
    }

    #[test]
    fn test_total_score_ignores_non_subjects_and_mixed_values() {
        let mut record = Record::new();
        record.insert("SBD", text("00123"));
        record.insert("TIẾNG VIỆT", CellValue::Number(7.5));
        record.insert("TOÁN HỌC", CellValue::Absent);
        record.insert("KTPL", text("miễn"));
        record.insert("HÓA HỌC", text("2,5"));

        assert_eq!(total_score(&record), 10.0);
        assert_eq!(total_score(&Record::new()), 0.0);
    }
}
