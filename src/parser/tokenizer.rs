//! Line tokenizing for the score sheet
//!
//! Splits one CSV line on commas that are outside double-quoted spans.

/// Split a data line into trimmed cells
///
/// A `"` toggles quoted mode and is never emitted. Escaped quotes (`""`)
/// are not recognised: they toggle twice and vanish. The final cell is
/// always emitted, so a line with `n` unquoted commas yields `n + 1` cells.
pub fn split_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                cells.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    cells.push(current.trim().to_string());

    cells
}

/// Split the header line on every comma, trimming each label
///
/// Quotes are not interpreted in the header line.
pub fn split_header(line: &str) -> Vec<String> {
    line.split(',').map(|label| label.trim().to_string()).collect()
}
