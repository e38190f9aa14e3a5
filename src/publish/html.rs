//! Small HTML helpers shared by the page renderers.

/// Escape text content.
pub fn escape_text(s: &str) -> String {
    html_escape::encode_text(s).to_string()
}

/// Escape a value placed inside a double-quoted attribute.
pub fn escape_attr(s: &str) -> String {
    html_escape::encode_double_quoted_attribute(s).to_string()
}

/// Shorten `text` to at most `max_chars` characters, ending with an ellipsis
/// when anything was cut. Returns the text and whether it was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> (String, bool) {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return (text.to_string(), false);
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    (format!("{}\u{2026}", cut.trim_end()), true)
}

/// Formula sheet heading: `fluid-mechanics` -> `FLUID MECHANICS`.
pub fn shout_subject(slug: &str) -> String {
    slug.replace('-', " ").to_uppercase()
}

/// Formula sheet year label: only the first hyphen becomes a space,
/// `2024-dec` -> `2024 DEC`.
pub fn shout_year(slug: &str) -> String {
    slug.replacen('-', " ", 1).to_uppercase()
}

/// `<a href="..">text</a>` with both parts escaped.
pub fn link(href: &str, text: &str, class: Option<&str>) -> String {
    match class {
        Some(c) => format!(
            "<a href=\"{}\" class=\"{}\">{}</a>",
            escape_attr(href),
            escape_attr(c),
            escape_text(text)
        ),
        None => format!("<a href=\"{}\">{}</a>", escape_attr(href), escape_text(text)),
    }
}
