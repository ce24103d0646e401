//! Small helpers for emitting SVG markup by hand.

/// Escapes text for use in SVG/HTML text content and attribute values.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Formats a value for display: integers without a decimal point, everything
/// else with up to two decimals. Non-finite values render as `"--"`.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return "--".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
