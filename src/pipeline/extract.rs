//! Best-effort extraction of structured data from noisy model output.
//!
//! Models wrap their JSON in prose or code fences and CLIs prepend log
//! lines. These helpers recover what they can and report `None` when
//! nothing usable is present, leaving the fallback to the caller.

use serde_json::{Deserializer, Value};

/// Find the first JSON array embedded anywhere in `text`.
///
/// Every `[` is tried in order as the start of a JSON value; the first one
/// that decodes to an array wins. Text after the array is ignored.
pub fn extract_json_array(text: &str) -> Option<Vec<Value>> {
    for (idx, _) in text.match_indices('[') {
        let mut stream = Deserializer::from_str(&text[idx..]).into_iter::<Value>();
        if let Some(Ok(Value::Array(items))) = stream.next() {
            return Some(items);
        }
    }
    None
}

/// Drop every line starting with one of `prefixes`, then rejoin and trim.
pub fn strip_noise_lines(text: &str, prefixes: &[String]) -> String {
    text.lines()
        .filter(|line| !prefixes.iter().any(|p| line.starts_with(p.as_str())))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_bare_array() {
        let items = extract_json_array(r#"[{"id": 1, "is_tech": true}]"#).unwrap();
        assert_eq!(items, vec![json!({"id": 1, "is_tech": true})]);
    }

    #[test]
    fn test_extract_from_code_fence_and_prose() {
        let raw = "Sure! Here is the result:\n```json\n[\n  {\"id\": 2, \"category\": \"部署\"}\n]\n```\nLet me know [if] you need more.";
        let items = extract_json_array(raw).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["category"], "部署");
    }

    #[test]
    fn test_extract_skips_non_json_brackets() {
        let raw = "[INFO] loading model\n[1/1] done\n[{\"id\": 3}]";
        let items = extract_json_array(raw).unwrap();
        assert_eq!(items, vec![json!({"id": 3})]);
    }

    #[test]
    fn test_extract_nested_arrays_take_outermost() {
        let items = extract_json_array(r#"x [[1, 2], [3]] y"#).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_extract_garbage_is_none() {
        assert!(extract_json_array("I could not classify these replies.").is_none());
        assert!(extract_json_array("").is_none());
        assert!(extract_json_array(r#"{"id": 1}"#).is_none());
        assert!(extract_json_array("[unterminated").is_none());
    }

    #[test]
    fn test_strip_noise_lines() {
        let prefixes = vec!["Hook registry".to_string()];
        let raw = "Hook registry initialized with 0 hooks\n\n用 `docker run` 即可。\n第二行";
        assert_eq!(
            strip_noise_lines(raw, &prefixes),
            "用 `docker run` 即可。\n第二行"
        );
    }

    #[test]
    fn test_strip_noise_only_output_is_empty() {
        let prefixes = vec!["Hook registry".to_string()];
        assert_eq!(strip_noise_lines("Hook registry loaded", &prefixes), "");
        assert_eq!(strip_noise_lines("  plain  ", &[]), "plain");
    }
}
