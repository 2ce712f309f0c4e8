use once_cell::sync::Lazy;
use regex::Regex;

// Very restrictive: almost any Unicode sequence is a legal DOI suffix,
// but anything outside this shape is rejected.
static VALID_DOI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9.]+(/[0-9a-zA-Z.\-]+)+$").expect("DOI pattern compiles"));

/// Checks that a string has the shape of a DOI: digits and periods, then one
/// or more `/`-separated groups of alphanumerics, periods or hyphens running
/// to the end of the string
pub fn is_valid_identifier(s: &str) -> bool {
    VALID_DOI.is_match(s)
}

/// Strips the single leading path separator from a request path
pub fn identifier_from_path(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Escapes the characters that are significant in HTML text and attributes
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&#39;"),
            '"' => escaped.push_str("&#34;"),
            c => escaped.push(c),
        }
    }
    escaped
}
