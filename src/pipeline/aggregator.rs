//! Per-tweet orchestration.
//!
//! Each URL runs through fetch, filter, classify and answer strictly in
//! sequence. Collaborator failures never escape a URL: they either drop
//! the URL or substitute a fallback value.

use super::classify::{classify, select_candidates};
use super::extract::strip_noise_lines;
use super::prompts::{answer_prompt, FALLBACK_ANSWER};
use crate::collaborator::{PostSource, TextModel};
use crate::config::PipelineConfig;
use crate::models::{OutputDocument, QAPair, TweetRecord};
use crate::text::truncate_chars;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Knobs of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Pause between consecutive answer calls for the same tweet.
    pub answer_delay: Duration,
    /// Leading characters of the tweet passed as answer context.
    pub context_chars: usize,
    /// Leading characters of an article body used as the tweet text.
    pub article_chars: usize,
    /// Answer lines starting with these are dropped.
    pub noise_prefixes: Vec<String>,
    /// Draw a progress bar while answering.
    pub show_progress: bool,
}

impl From<&PipelineConfig> for PipelineSettings {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            answer_delay: Duration::from_millis(config.answer_delay_ms),
            context_chars: config.context_chars,
            article_chars: config.article_chars,
            noise_prefixes: config.noise_prefixes.clone(),
            show_progress: true,
        }
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&PipelineConfig::default())
    }
}

/// Turns tweet URLs into an [`OutputDocument`].
pub struct Aggregator {
    source: Box<dyn PostSource>,
    classifier: Box<dyn TextModel>,
    answerer: Box<dyn TextModel>,
    settings: PipelineSettings,
}

impl Aggregator {
    pub fn new(
        source: Box<dyn PostSource>,
        classifier: Box<dyn TextModel>,
        answerer: Box<dyn TextModel>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            source,
            classifier,
            answerer,
            settings,
        }
    }

    /// Process every URL in order. Dropped URLs still count in `total_tweets`.
    pub async fn run(&self, urls: &[String]) -> OutputDocument {
        let mut records = Vec::new();

        for url in urls {
            if let Some(record) = self.process_tweet(url).await {
                records.push(record);
            }
        }

        let document = OutputDocument::from_records(urls.len(), records);
        info!(
            "Generated {} Q&A pairs from {} of {} tweets",
            document.total_qa,
            document.tweets.len(),
            urls.len()
        );
        document
    }

    /// Full pipeline for one tweet. `None` means the tweet yielded no questions.
    pub async fn process_tweet(&self, url: &str) -> Option<TweetRecord> {
        info!("Processing: {}", url);

        info!("  [1/4] Fetching tweet...");
        let (tweet_text, tweet_author) = match self.source.fetch_post(url).await {
            Ok(post) => (post.post_text(self.settings.article_chars), post.author()),
            Err(e) => {
                warn!("  Tweet fetch failed, continuing without text: {}", e);
                (String::new(), String::new())
            }
        };

        info!("  [2/4] Fetching replies...");
        let replies = match self.source.fetch_replies(url).await {
            Ok(envelope) => {
                if let Some(error) = envelope.error_message() {
                    warn!("  Reply fetch reported an error, skipping: {}", error);
                    return None;
                }
                envelope.replies
            }
            Err(e) => {
                warn!("  Reply fetch failed, skipping: {}", e);
                return None;
            }
        };

        if replies.is_empty() {
            warn!("  No replies found, skipping");
            return None;
        }

        let candidates = select_candidates(&replies);
        if candidates.is_empty() {
            warn!("  None of {} replies look like questions, skipping", replies.len());
            return None;
        }

        info!(
            "  [3/4] Classifying {} candidates from {} replies with {}...",
            candidates.len(),
            replies.len(),
            self.classifier.name()
        );
        let questions = classify(self.classifier.as_ref(), &candidates).await;
        if questions.is_empty() {
            warn!("  No technical questions found, skipping");
            return None;
        }
        info!("  Found {} technical questions", questions.len());

        info!("  [4/4] Generating answers with {}...", self.answerer.name());
        let context = truncate_chars(&tweet_text, self.settings.context_chars);
        let progress = self.progress_bar(questions.len());
        let mut qa_pairs = Vec::with_capacity(questions.len());

        for (i, question) in questions.into_iter().enumerate() {
            if i > 0 && !self.settings.answer_delay.is_zero() {
                tokio::time::sleep(self.settings.answer_delay).await;
            }

            progress.set_message(truncate_chars(&question.text, 40).to_string());
            debug!("Answering: {}", truncate_chars(&question.text, 40));

            let answer = self.answer(&question.text, context).await;
            qa_pairs.push(QAPair { question, answer });
            progress.inc(1);
        }
        progress.finish_and_clear();

        Some(TweetRecord::new(url, &tweet_text, tweet_author, replies.len(), qa_pairs))
    }

    /// One answer; never empty.
    async fn answer(&self, question: &str, context: &str) -> String {
        let prompt = answer_prompt(question, context);

        match self.answerer.complete(&prompt).await {
            Ok(raw) => {
                let cleaned = strip_noise_lines(&raw, &self.settings.noise_prefixes);
                if cleaned.is_empty() {
                    warn!("  Answer was empty after cleanup, using fallback");
                    FALLBACK_ANSWER.to_string()
                } else {
                    cleaned
                }
            }
            Err(e) => {
                warn!("  Answer generation failed, using fallback: {}", e);
                FALLBACK_ANSWER.to_string()
            }
        }
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.settings.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("    {spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}
