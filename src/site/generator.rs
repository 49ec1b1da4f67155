//! Static HTML page generation.
//!
//! Renders an [`OutputDocument`] into one self-contained page: a section
//! per tweet, an item per Q&A pair. Every field that came from a tweet or
//! reply is escaped; answers additionally get the markdown subset.

use super::markdown::{escape_html, format_answer};
use super::template::{page, HeaderStats, EMPTY_PLACEHOLDER};
use crate::config::SiteConfig;
use crate::models::{OutputDocument, QAPair, Question, TweetRecord};
use crate::text::truncate_with_flag;
use chrono::{DateTime, Utc};

/// Tweet text shown in a section header.
pub const HEADER_TEXT_CHARS: usize = 150;

/// Render the page stamped with the current UTC date.
pub fn generate_html(document: &OutputDocument, site: &SiteConfig) -> String {
    generate_html_at(document, site, Utc::now())
}

/// Render the page stamped with `now`. Same inputs, same bytes.
pub fn generate_html_at(document: &OutputDocument, site: &SiteConfig, now: DateTime<Utc>) -> String {
    let sections: Vec<String> = document.tweets.iter().map(generate_tweet_section).collect();

    let content = if sections.is_empty() {
        EMPTY_PLACEHOLDER.to_string()
    } else {
        sections.join("\n")
    };

    let updated = now.format("%m/%d").to_string();
    let stats = HeaderStats {
        total_qa: document.total_qa,
        total_tweets: document.total_tweets,
        updated: &updated,
    };

    page(&site.title, &site.subtitle, stats, &content)
}

/// One tweet: link, truncated text, then its Q&A items.
fn generate_tweet_section(tweet: &TweetRecord) -> String {
    let (text, truncated) = truncate_with_flag(&tweet.tweet_text, HEADER_TEXT_CHARS);
    let ellipsis = if truncated { "..." } else { "" };
    let items: String = tweet.qa_pairs.iter().map(generate_qa_item).collect();

    let mut section = String::new();
    section.push_str("<div class=\"tweet-section\">\n");
    section.push_str("    <div class=\"tweet-header\">\n");
    section.push_str(&format!(
        "        <a href=\"{}\" target=\"_blank\">View original tweet</a>\n",
        escape_html(&tweet.tweet_url)
    ));
    section.push_str(&format!(
        "        <div class=\"tweet-text\">{}{}</div>\n",
        escape_html(text),
        ellipsis
    ));
    section.push_str("    </div>\n");
    section.push_str("    <div class=\"qa-list\">\n        ");
    section.push_str(&items);
    section.push_str("\n    </div>\n</div>");

    section
}

/// One Q&A item: author line, question, answer block.
fn generate_qa_item(pair: &QAPair) -> String {
    let q = &pair.question;

    format!(
        r#"<div class="qa-item">
    <div class="question">
        <div class="q-header">
            <span class="q-author">{author}</span>
            <span class="q-category">{category}</span>
            <span class="q-stats">{stats}</span>
        </div>
        <div class="q-text">{text}</div>
    </div>
    <div class="answer">
        <div class="answer-label">AI Answer</div>
        <div class="answer-text">{answer}</div>
    </div>
</div>"#,
        author = escape_html(q.display_name()),
        category = escape_html(&q.category),
        stats = stats_line(q),
        text = escape_html(&q.text),
        answer = format_answer(&pair.answer),
    )
}

/// `N likes &middot; N views`, leaving out zero counts.
fn stats_line(q: &Question) -> String {
    let mut parts = Vec::new();
    if q.likes > 0 {
        parts.push(format!("{} likes", q.likes));
    }
    if q.views > 0 {
        parts.push(format!("{} views", q.views));
    }
    parts.join(" &middot; ")
}
