//! Character-level text helpers.

/// Return at most the first `max_chars` characters of `text`.
///
/// Counts Unicode scalar values, so CJK text is never split mid-character.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Like [`truncate_chars`], also reporting whether anything was cut.
pub fn truncate_with_flag(text: &str, max_chars: usize) -> (&str, bool) {
    let truncated = truncate_chars(text, max_chars);
    (truncated, truncated.len() < text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
        assert_eq!(truncate_chars("hi", 5), "hi");
        assert_eq!(truncate_chars("", 5), "");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate_chars("部署问题很多", 2), "部署");
        assert_eq!(truncate_chars("🚀🚀🚀", 1), "🚀");
    }

    #[test]
    fn test_truncate_with_flag() {
        assert_eq!(truncate_with_flag("abcdef", 3), ("abc", true));
        assert_eq!(truncate_with_flag("abc", 3), ("abc", false));
    }
}
