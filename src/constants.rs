//! Application constants for the exam result lookup
//!
//! Column labels of the score sheet, absence markers and the fixed
//! Vietnamese user-facing messages.

// =============================================================================
// Column Labels
// =============================================================================

/// Student identifier column (SBD), the lookup key
pub const SBD_LABEL: &str = "SBD";

/// Student full name column
pub const NAME_LABEL: &str = "HỌ VÀ TÊN";

/// Derived total score written by the parser
pub const TOTAL_LABEL: &str = "Tổng điểm";

/// Identity fields shown at the top of a report, in display order
pub const IDENTITY_LABELS: &[&str] = &[SBD_LABEL, NAME_LABEL];

/// Labels exported with a single trailing space by some spreadsheet tools.
/// When present, their coerced value is copied under the trimmed label.
pub const PROMOTED_LABELS: &[&str] = &["TIẾNG VIỆT ", "TIẾNG ANH ", "TOÁN "];

/// Subject columns whose raw value is replaced by its coerced score at parse time
pub const COERCED_LABELS: &[&str] = &["LOGIC-PTSL", "HÓA HỌC", "VẬT LÝ"];

// =============================================================================
// Score Markers
// =============================================================================

/// Upper-cased substrings marking a student as absent or excused
pub const ABSENCE_MARKERS: &[&str] = &["VẮNG", "N/V"];

/// Display form of the absence sentinel
pub const ABSENT_DISPLAY: &str = "N/V";

// =============================================================================
// Data Source Defaults
// =============================================================================

/// Relative path of the score sheet when none is configured
pub const DEFAULT_DATA_PATH: &str = "diem_thi.csv";

/// Prefixes that select the HTTP data source
pub const HTTP_SCHEMES: &[&str] = &["http://", "https://"];

// =============================================================================
// User-facing Messages
// =============================================================================

pub mod messages {
    /// Shown when the search is triggered with an empty identifier
    pub const EMPTY_QUERY: &str = "Vui lòng nhập SBD.";

    /// Prefix of the not-found message; the identifier follows
    pub const NOT_FOUND_PREFIX: &str = "Không tìm thấy SBD";

    /// Shown when the score sheet cannot be fetched or decoded
    pub const LOAD_FAILED: &str = "Không thể tải dữ liệu.";

    /// Report heading
    pub const REPORT_TITLE: &str = "KẾT QUẢ THI";

    /// Label of the recomputed total in a report
    pub const TOTAL_HEADING: &str = "TỔNG ĐIỂM";

    /// Interactive prompt
    pub const PROMPT: &str = "Nhập SBD";
}
