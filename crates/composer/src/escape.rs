//! HTML escaping for user-editable fields.
//!
//! Every draft field is attacker-controlled in a hosted-form deployment, so
//! text content and attribute values are escaped before interpolation. URLs
//! placed in `href`/`src` only need attribute escaping; they are never
//! rendered as text.

/// Escape a value for HTML text content: `&`, `<`, `>`, `"`.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a value for a double-quoted attribute: `"` only.
pub fn escape_attr(s: &str) -> String {
    s.replace('"', "&quot;")
}
