//! Escaping utilities for Markdown and CSV output.
//!
//! URLs, rationale text and pattern metadata may come from a remote
//! source and must be escaped before they are embedded in a table.

/// Escape a string for safe inclusion in a Markdown table cell.
///
/// # Examples
///
/// ```
/// use archscale::reports::escape::escape_markdown_table;
///
/// assert_eq!(escape_markdown_table("a|b"), "a\\|b");
/// assert_eq!(escape_markdown_table("line1\nline2"), "line1 line2");
/// ```
pub fn escape_markdown_table(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '|' => result.push_str("\\|"),
            '\n' => result.push(' '),
            '\r' => {}
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            _ => result.push(c),
        }
    }
    result
}

/// Quote a CSV field, doubling embedded quotes and flattening newlines.
///
/// # Examples
///
/// ```
/// use archscale::reports::escape::csv_field;
///
/// assert_eq!(csv_field("SOA"), "\"SOA\"");
/// assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
/// ```
pub fn csv_field(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\"").replace(['\n', '\r'], " "))
}
