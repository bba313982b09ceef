//! MarkdownV2 escaping

/// Characters that must be backslash-escaped in MarkdownV2 text
const SPECIAL: &[char] = &[
    '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Placeholder for absent or empty fields
pub const NOT_AVAILABLE: &str = "N/A";

/// Escape free text for MarkdownV2
pub fn escape_markdown_v2(text: &str) -> String {
    escape_chars(text, SPECIAL)
}

/// Escape a vendor field, rendering absent or empty values as `N/A`
pub fn escape_or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => escape_markdown_v2(v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Escape text placed inside an inline code span
pub fn escape_code(text: &str) -> String {
    escape_chars(text, &['\\', '`'])
}

/// Escape a URL placed inside the `(...)` part of an inline link
pub fn escape_link_url(url: &str) -> String {
    escape_chars(url, &['\\', ')'])
}

fn escape_chars(text: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
