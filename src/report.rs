//! Score report rendering.
//!
//! A report is built from one record with its own lenient number reading:
//! numbers are used as-is, text contributes its leading numeric prefix
//! (no decimal-comma handling) and everything else counts as zero. The
//! report total is recomputed from those values and can differ from the
//! total stored by the parser; [`ScoreReport::total_divergence`] exposes
//! the gap.

use crate::constants::{IDENTITY_LABELS, TOTAL_LABEL, messages};
use crate::models::{CellValue, Record, Subject};
use crate::score::parse_leading_number;
use colored::*;
use serde::Serialize;
use std::fmt::Write;

/// Width of the terminal score bar in characters
const TEXT_BAR_WIDTH: usize = 30;

/// One subject line of a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectBar {
    pub subject: Subject,
    pub score: f64,
    pub max: f64,
    /// Bar fill in percent of `max`, capped at 100
    pub width_percent: f64,
}

impl SubjectBar {
    pub fn new(subject: Subject, score: f64) -> Self {
        let max = subject.max_score();
        Self {
            subject,
            score,
            max,
            width_percent: (score / max * 100.0).min(100.0),
        }
    }
}

/// Everything shown for one student
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    /// Identity fields present on the record, as (label, value)
    pub identity: Vec<(String, String)>,
    pub bars: Vec<SubjectBar>,
    /// Sum of the bar scores
    pub total: f64,
    /// Total computed by the parser, when the record carries one
    pub stored_total: Option<f64>,
}

/// Best-effort number for display; zero when nothing usable is there
pub fn display_score(value: Option<&CellValue>) -> f64 {
    let score = match value {
        Some(CellValue::Number(n)) => *n,
        Some(CellValue::Text(s)) => parse_leading_number(s).unwrap_or(0.0),
        Some(CellValue::Absent) | None => 0.0,
    };
    if score.is_finite() { score } else { 0.0 }
}

impl ScoreReport {
    pub fn from_record(record: &Record) -> Self {
        let identity = IDENTITY_LABELS
            .iter()
            .filter_map(|label| {
                record
                    .get(label)
                    .filter(|value| !value.is_empty())
                    .map(|value| (label.to_string(), value.to_string()))
            })
            .collect();

        let bars: Vec<SubjectBar> = Subject::ALL
            .iter()
            .map(|subject| SubjectBar::new(*subject, display_score(record.subject(*subject))))
            .collect();
        let total: f64 = bars.iter().map(|bar| bar.score).sum();

        Self {
            identity,
            bars,
            total,
            stored_total: record.get(TOTAL_LABEL).and_then(CellValue::as_number),
        }
    }

    /// Recomputed total minus stored total, when they differ
    pub fn total_divergence(&self) -> Option<f64> {
        self.stored_total
            .map(|stored| self.total - stored)
            .filter(|diff| *diff != 0.0)
    }

    /// HTML fragment with the page's `score-report` markup
    ///
    /// Values are inserted verbatim.
    pub fn render_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<div class=\"score-report\">\n");
        let _ = writeln!(
            html,
            "  <div class=\"score-report-header\"><h2>{}</h2></div>",
            messages::REPORT_TITLE
        );

        html.push_str("  <div class=\"student-info-box\">\n");
        for (label, value) in &self.identity {
            let _ = writeln!(html, "    <p><strong>{}:</strong> {}</p>", label, value);
        }
        html.push_str("  </div>\n");

        html.push_str("  <div class=\"score-bars\">\n");
        for bar in &self.bars {
            let _ = writeln!(
                html,
                "    <div class=\"score-item\"><span>{}</span>\
                 <div class=\"score-bar\"><div class=\"score-bar-fill\" style=\"width:{}%\">{}</div></div>\
                 <span>{}</span></div>",
                bar.subject, bar.width_percent, bar.score, bar.max
            );
        }
        html.push_str("  </div>\n");

        let _ = writeln!(
            html,
            "  <div class=\"total-score\">{} <br><span>{}</span></div>",
            messages::TOTAL_HEADING,
            self.total
        );
        html.push_str("</div>\n");
        html
    }

    /// Terminal report with one bar per subject
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", messages::REPORT_TITLE.bright_green().bold());

        for (label, value) in &self.identity {
            let _ = writeln!(out, "  {} {}", format!("{}:", label).bright_cyan(), value);
        }
        out.push('\n');

        let label_width = Subject::ALL
            .iter()
            .map(|subject| subject.label().chars().count())
            .max()
            .unwrap_or(0);

        for bar in &self.bars {
            let filled = ((bar.width_percent.max(0.0) / 100.0) * TEXT_BAR_WIDTH as f64).round()
                as usize;
            let filled = filled.min(TEXT_BAR_WIDTH);
            let padding = label_width - bar.subject.label().chars().count();
            let _ = writeln!(
                out,
                "  {}{} [{}{}] {} / {}",
                bar.subject.label(),
                " ".repeat(padding),
                "█".repeat(filled).bright_green(),
                "·".repeat(TEXT_BAR_WIDTH - filled).bright_black(),
                bar.score.to_string().bright_white().bold(),
                bar.max
            );
        }

        let _ = writeln!(
            out,
            "\n  {} {}",
            messages::TOTAL_HEADING.bright_yellow().bold(),
            self.total.to_string().bright_white().bold()
        );
        out
    }
}

/// Non-report answers to a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EmptyQuery,
    NotFound(String),
    LoadFailed,
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::EmptyQuery => messages::EMPTY_QUERY.to_string(),
            Notice::NotFound(sbd) => format!("{} {}", messages::NOT_FOUND_PREFIX, sbd),
            Notice::LoadFailed => messages::LOAD_FAILED.to_string(),
        }
    }

    pub fn render_html(&self) -> String {
        match self {
            Notice::NotFound(sbd) => format!(
                "<p style=\"color:orange;\">{} <strong>{}</strong></p>\n",
                messages::NOT_FOUND_PREFIX,
                sbd
            ),
            _ => format!("<p style=\"color:red;\">{}</p>\n", self.message()),
        }
    }

    pub fn render_text(&self) -> String {
        let message = self.message();
        let styled = match self {
            Notice::NotFound(_) => message.bright_yellow(),
            _ => message.bright_red(),
        };
        format!("{}\n", styled)
    }
}
