//! Batch classification of candidate replies.
//!
//! All candidates of one tweet go to the classifier in a single prompt.
//! The verdicts are mapped back by 1-based `id`. Anything that prevents
//! reading a verdict array degrades to keeping every candidate as a
//! `general` question instead of losing the tweet.

use super::extract::extract_json_array;
use super::prompts::classification_prompt;
use crate::collaborator::TextModel;
use crate::models::{Question, Reply, DEFAULT_CATEGORY, SUMMARY_CHARS};
use crate::text::truncate_chars;
use serde_json::Value;
use tracing::{debug, warn};

/// Replies worth sending to the classifier: flagged upstream and non-empty.
pub fn select_candidates(replies: &[Reply]) -> Vec<&Reply> {
    replies
        .iter()
        .filter(|r| r.is_question && !r.text.trim().is_empty())
        .collect()
}

/// Classify `candidates` with one call to `model`.
pub async fn classify(model: &dyn TextModel, candidates: &[&Reply]) -> Vec<Question> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let prompt = classification_prompt(candidates);
    debug!("Classification prompt:\n{}", prompt);

    let raw = match model.complete(&prompt).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Classifier {} unavailable ({}), keeping all candidates", model.name(), e);
            return fallback_questions(candidates);
        }
    };

    match parse_classifications(&raw, candidates) {
        Some(questions) => {
            if questions.is_empty() {
                warn!(
                    "Classifier output parsed but matched none of {} candidates",
                    candidates.len()
                );
            }
            questions
        }
        None => {
            warn!("Classifier output had no JSON array, keeping all candidates");
            debug!("Unparseable classifier output: {}", raw);
            fallback_questions(candidates)
        }
    }
}

/// Read the verdict array out of `raw`. `None` when there is no array.
///
/// Entries that are not objects, are not marked technical, or point
/// outside the candidate list are dropped. Output follows array order.
pub fn parse_classifications(raw: &str, candidates: &[&Reply]) -> Option<Vec<Question>> {
    let verdicts = extract_json_array(raw)?;

    let questions = verdicts
        .iter()
        .filter_map(|verdict| {
            let verdict = verdict.as_object()?;

            if verdict.get("is_tech").and_then(Value::as_bool) != Some(true) {
                return None;
            }

            let reply = verdict
                .get("id")
                .and_then(verdict_index)
                .and_then(|id| id.checked_sub(1))
                .and_then(|idx| candidates.get(idx))?;

            let category = verdict
                .get("category")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_CATEGORY)
                .to_string();
            let summary = verdict
                .get("summary")
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| default_summary(reply));

            Some(Question::from_reply(reply, category, summary))
        })
        .collect();

    Some(questions)
}

/// Every candidate as a `general` question summarised by its own text.
pub fn fallback_questions(candidates: &[&Reply]) -> Vec<Question> {
    candidates
        .iter()
        .map(|reply| {
            Question::from_reply(reply, DEFAULT_CATEGORY.to_string(), default_summary(reply))
        })
        .collect()
}

fn default_summary(reply: &Reply) -> String {
    truncate_chars(&reply.text, SUMMARY_CHARS).to_string()
}

/// Ids arrive as numbers or numeric strings.
fn verdict_index(id: &Value) -> Option<usize> {
    match id {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborator::scripted::ScriptedModel;

    fn reply(author: &str, text: &str, is_question: bool) -> Reply {
        Reply {
            author: author.to_string(),
            text: text.to_string(),
            is_question,
            ..Reply::default()
        }
    }

    fn sample() -> Vec<Reply> {
        vec![
            reply("alice", "how do I deploy this on a VPS?", true),
            reply("bob", "great thread!", false),
            reply("carol", "which API key scope is needed?", true),
            reply("dave", "   ", true),
        ]
    }

    #[test]
    fn test_select_candidates() {
        let replies = sample();
        let candidates = select_candidates(&replies);
        let authors: Vec<_> = candidates.iter().map(|r| r.author.as_str()).collect();
        assert_eq!(authors, vec!["alice", "carol"]);
    }

    #[test]
    fn test_parse_maps_ids_back() {
        let replies = sample();
        let candidates = select_candidates(&replies);
        let raw = r#"```json
[
  {"id": 2, "is_tech": true, "category": "API使用", "summary": "API key scope"},
  {"id": 1, "is_tech": false, "category": "其他"}
]
```"#;

        let questions = parse_classifications(raw, &candidates).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].author, "carol");
        assert_eq!(questions[0].category, "API使用");
        assert_eq!(questions[0].summary, "API key scope");
    }

    #[test]
    fn test_parse_defaults_category_and_summary() {
        let replies = vec![reply("alice", &"长".repeat(80), true)];
        let candidates = select_candidates(&replies);

        let questions =
            parse_classifications(r#"[{"id": "1", "is_tech": true}]"#, &candidates).unwrap();
        assert_eq!(questions[0].category, DEFAULT_CATEGORY);
        assert_eq!(questions[0].summary.chars().count(), SUMMARY_CHARS);
    }

    #[test]
    fn test_parse_discards_out_of_range_ids() {
        let replies = sample();
        let candidates = select_candidates(&replies);
        let raw = r#"[{"id": 0, "is_tech": true}, {"id": 3, "is_tech": true}, {"id": -1, "is_tech": true}, "noise"]"#;

        let questions = parse_classifications(raw, &candidates).unwrap();
        assert!(questions.is_empty());
    }

    #[test]
    fn test_parse_without_array_is_none() {
        let replies = sample();
        let candidates = select_candidates(&replies);
        assert!(parse_classifications("sorry, rate limited", &candidates).is_none());
    }

    #[tokio::test]
    async fn test_classify_garbage_falls_back_to_all_candidates() {
        let replies = sample();
        let candidates = select_candidates(&replies);
        let model = ScriptedModel::new("classifier", vec![Some("<<<garbage>>>")]);

        let questions = classify(&model, &candidates).await;
        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| q.category == DEFAULT_CATEGORY));
        assert_eq!(questions[0].summary, "how do I deploy this on a VPS?");
    }

    #[tokio::test]
    async fn test_classify_failure_falls_back_to_all_candidates() {
        let replies = sample();
        let candidates = select_candidates(&replies);
        let model = ScriptedModel::new("classifier", vec![None]);

        let questions = classify(&model, &candidates).await;
        assert_eq!(questions.len(), 2);
        assert_eq!(model.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_classify_skips_call_without_candidates() {
        let model = ScriptedModel::new("classifier", vec![]);
        assert!(classify(&model, &[]).await.is_empty());
        assert!(model.prompts().is_empty());
    }
}
