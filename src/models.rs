//! Data models for the Q&A pipeline.
//!
//! This module contains the persisted document shape (questions, answers,
//! per-tweet records) and the wire shapes the fetch collaborators emit.
//! Every persisted field carries a serde default so the site renderer can
//! read documents with missing optional fields.

use crate::text::truncate_chars;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Category assigned when the classifier gives none.
pub const DEFAULT_CATEGORY: &str = "general";

/// Tweet text kept in the data file.
pub const RECORD_TEXT_CHARS: usize = 200;

/// Characters of a reply used as summary when the classifier gives none.
pub const SUMMARY_CHARS: usize = 50;

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Deserialize an explicit `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_category<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_category))
}

/// Current UTC time in the format stored in `generated_at` fields.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// A reply that was classified as a technical question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Handle of the reply author.
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    /// Display name; empty means "use the handle".
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_name: String,
    /// Raw reply text.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Classifier-assigned category.
    #[serde(default = "default_category", deserialize_with = "null_as_category")]
    pub category: String,
    /// One-line summary from the classifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub views: u64,
}

impl Question {
    /// Build a question from a reply plus the classifier's verdict.
    pub fn from_reply(reply: &Reply, category: String, summary: String) -> Self {
        Self {
            author: reply.author.clone(),
            author_name: reply
                .author_name
                .clone()
                .unwrap_or_else(|| reply.author.clone()),
            text: reply.text.clone(),
            category,
            summary,
            likes: reply.likes,
            views: reply.views,
        }
    }

    /// Name shown on the page: the display name, or the handle if unset.
    pub fn display_name(&self) -> &str {
        if self.author_name.is_empty() {
            &self.author
        } else {
            &self.author_name
        }
    }
}

/// One question with its generated answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QAPair {
    pub question: Question,
    pub answer: String,
}

/// All Q&A pairs mined from the replies of one tweet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tweet_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tweet_text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tweet_author: String,
    /// Replies fetched, before any filtering.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_replies: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub qa_count: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub qa_pairs: Vec<QAPair>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub generated_at: String,
}

impl TweetRecord {
    /// Assemble a record; `qa_count` always mirrors `qa_pairs`.
    pub fn new(
        tweet_url: impl Into<String>,
        tweet_text: &str,
        tweet_author: impl Into<String>,
        total_replies: usize,
        qa_pairs: Vec<QAPair>,
    ) -> Self {
        Self {
            tweet_url: tweet_url.into(),
            tweet_text: truncate_chars(tweet_text, RECORD_TEXT_CHARS).to_string(),
            tweet_author: tweet_author.into(),
            total_replies,
            qa_count: qa_pairs.len(),
            qa_pairs,
            generated_at: timestamp_now(),
        }
    }
}

/// The data file shared by the pipeline and the site generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub generated_at: String,
    /// Number of requested tweet URLs, including dropped ones.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_tweets: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_qa: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tweets: Vec<TweetRecord>,
}

impl OutputDocument {
    /// Build the document for a run over `total_tweets` URLs.
    pub fn from_records(total_tweets: usize, tweets: Vec<TweetRecord>) -> Self {
        Self {
            generated_at: timestamp_now(),
            total_tweets,
            total_qa: tweets.iter().map(|t| t.qa_count).sum(),
            tweets,
        }
    }
}

/// Output of the tweet fetch collaborator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostEnvelope {
    #[serde(default)]
    pub tweet: Option<PostInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub screen_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_article: bool,
    #[serde(default)]
    pub article: Option<ArticleInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleInfo {
    #[serde(default)]
    pub full_text: Option<String>,
}

impl PostEnvelope {
    /// Text used as answer context: the article body (first `article_chars`
    /// characters) for long-form posts, the tweet text otherwise.
    pub fn post_text(&self, article_chars: usize) -> String {
        let Some(tweet) = &self.tweet else {
            return String::new();
        };

        let article = tweet
            .article
            .as_ref()
            .and_then(|a| a.full_text.as_deref())
            .filter(|t| !t.is_empty());

        match article {
            Some(full_text) if tweet.is_article => {
                truncate_chars(full_text, article_chars).to_string()
            }
            _ => tweet.text.clone(),
        }
    }

    /// Screen name of the tweet author, empty if unknown.
    pub fn author(&self) -> String {
        self.tweet
            .as_ref()
            .map(|t| t.screen_name.clone())
            .unwrap_or_default()
    }
}

/// Output of the reply monitor collaborator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepliesEnvelope {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub replies: Vec<Reply>,
}

impl RepliesEnvelope {
    /// The monitor's error message, if it reported one.
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// A single reply to a tweet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Reply {
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Cheap upstream heuristic; only flagged replies reach the classifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_question: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub views: u64,
}
