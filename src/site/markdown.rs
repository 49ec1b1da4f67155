//! HTML escaping and the answer markdown subset.
//!
//! Answers support exactly three constructs: fenced code blocks, inline
//! code spans and `**bold**`. Everything else is shown as escaped text.

use once_cell::sync::Lazy;
use regex::Regex;

static CODE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(\w*)\n(.*?)\n```").expect("valid code block pattern"));
static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`]+)`").expect("valid inline code pattern"));
static BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid bold pattern"));

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
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

/// Escape an answer, then apply the markdown subset.
///
/// The fence language tag is dropped. Escaping runs first, so markup
/// inside the answer never becomes a live tag.
pub fn format_answer(text: &str) -> String {
    let escaped = escape_html(text);
    let blocks = CODE_BLOCK.replace_all(&escaped, "<pre>${2}</pre>");
    let inline = INLINE_CODE.replace_all(&blocks, "<code>${1}</code>");
    BOLD.replace_all(&inline, "<strong>${1}</strong>")
        .into_owned()
}
