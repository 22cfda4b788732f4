// src/process/utils.rs

/// Trailing decorative marker used on the source page for provisional figures.
pub const DECORATIVE_MARKER: char = '*';

/// Collapse runs of whitespace (including `&nbsp;`) to a single space and trim.
pub fn clean_str(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop exactly one trailing decorative marker, if present.
pub fn strip_marker(cell: &str) -> &str {
    cell.strip_suffix(DECORATIVE_MARKER).unwrap_or(cell)
}
