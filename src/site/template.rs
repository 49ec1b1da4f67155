//! Fixed page chrome: embedded stylesheet, header and footer.

use super::markdown::escape_html;

const STYLE: &str = r#"* { margin: 0; padding: 0; box-sizing: border-box; }
body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    background: #0d1117;
    color: #c9d1d9;
    line-height: 1.6;
}
.container { max-width: 800px; margin: 0 auto; padding: 20px; }
header {
    text-align: center;
    padding: 40px 0 30px;
    border-bottom: 1px solid #21262d;
    margin-bottom: 30px;
}
header h1 { font-size: 28px; color: #58a6ff; margin-bottom: 8px; }
header p { color: #8b949e; font-size: 14px; }
.stats { display: flex; justify-content: center; gap: 24px; margin-top: 16px; }
.stat { text-align: center; }
.stat-num { font-size: 24px; font-weight: 700; color: #f0f6fc; }
.stat-label { font-size: 12px; color: #8b949e; text-transform: uppercase; }
.tweet-section { margin-bottom: 40px; }
.tweet-header {
    background: #161b22;
    border: 1px solid #21262d;
    border-radius: 8px 8px 0 0;
    padding: 16px;
}
.tweet-header a { color: #58a6ff; text-decoration: none; font-size: 13px; }
.tweet-header a:hover { text-decoration: underline; }
.tweet-text { color: #c9d1d9; margin-top: 8px; font-size: 14px; }
.qa-list {
    border-left: 1px solid #21262d;
    border-right: 1px solid #21262d;
    border-bottom: 1px solid #21262d;
    border-radius: 0 0 8px 8px;
}
.qa-item { padding: 20px; border-bottom: 1px solid #21262d; }
.qa-item:last-child { border-bottom: none; }
.question { margin-bottom: 12px; }
.q-header { display: flex; align-items: center; gap: 8px; margin-bottom: 6px; }
.q-author { font-weight: 600; color: #58a6ff; font-size: 13px; }
.q-category {
    background: #1f6feb33;
    color: #58a6ff;
    padding: 2px 8px;
    border-radius: 12px;
    font-size: 11px;
}
.q-stats { color: #484f58; font-size: 11px; margin-left: auto; }
.q-text { color: #f0f6fc; font-size: 15px; font-weight: 500; }
.answer { background: #161b22; border-radius: 8px; padding: 14px 16px; margin-top: 8px; }
.answer-label {
    color: #3fb950;
    font-size: 12px;
    font-weight: 600;
    margin-bottom: 6px;
    display: flex;
    align-items: center;
    gap: 4px;
}
.answer-text { color: #c9d1d9; font-size: 14px; white-space: pre-wrap; }
.answer-text code {
    background: #0d1117;
    padding: 2px 6px;
    border-radius: 4px;
    font-family: "SF Mono", "Fira Code", monospace;
    font-size: 13px;
    color: #79c0ff;
}
.answer-text pre {
    background: #0d1117;
    padding: 12px;
    border-radius: 6px;
    overflow-x: auto;
    margin: 8px 0;
    font-family: "SF Mono", "Fira Code", monospace;
    font-size: 13px;
    line-height: 1.5;
}
footer {
    text-align: center;
    padding: 30px 0;
    border-top: 1px solid #21262d;
    margin-top: 40px;
    color: #484f58;
    font-size: 12px;
}
footer a { color: #58a6ff; text-decoration: none; }
.empty { text-align: center; padding: 60px 20px; color: #484f58; }
@media (max-width: 600px) {
    .container { padding: 12px; }
    header h1 { font-size: 22px; }
    .q-stats { display: none; }
}"#;

const FOOTER: &str = r#"<footer>
    Powered by <a href="https://github.com/ythx-101/x-tweet-fetcher">x-tweet-fetcher</a>
    + <a href="https://github.com/ythx-101/x-monitor">x-monitor</a>
    &middot; MiniMax M2.5 + Gemini
    &middot; <a href="https://github.com/ythx-101/openclaw-qa">Source</a>
</footer>"#;

/// Placeholder shown when the document has no tweets.
pub const EMPTY_PLACEHOLDER: &str = r#"<div class="empty">暂无问答内容</div>"#;

/// Counters shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderStats<'a> {
    pub total_qa: usize,
    pub total_tweets: usize,
    /// Pre-formatted date stamp.
    pub updated: &'a str,
}

/// Wrap rendered sections in the full page.
pub fn page(title: &str, subtitle: &str, stats: HeaderStats<'_>, content: &str) -> String {
    let title = escape_html(title);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"zh-CN\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html.push_str(&format!("<title>{} - 评论区技术问答</title>\n", title));
    html.push_str("<style>\n");
    html.push_str(STYLE);
    html.push_str("\n</style>\n</head>\n<body>\n<div class=\"container\">\n");

    html.push_str(&header(&title, &escape_html(subtitle), stats));
    html.push('\n');
    html.push_str(content);
    html.push('\n');
    html.push_str(FOOTER);
    html.push_str("\n</div>\n</body>\n</html>");

    html
}

fn header(title: &str, subtitle: &str, stats: HeaderStats<'_>) -> String {
    let mut header = String::new();

    header.push_str("<header>\n");
    header.push_str(&format!("    <h1>{}</h1>\n", title));
    header.push_str(&format!("    <p>{}</p>\n", subtitle));
    header.push_str("    <div class=\"stats\">\n");
    header.push_str(&stat(&stats.total_qa.to_string(), "问答对"));
    header.push_str(&stat(&stats.total_tweets.to_string(), "推文"));
    header.push_str(&stat(&escape_html(stats.updated), "更新"));
    header.push_str("    </div>\n</header>");

    header
}

fn stat(value: &str, label: &str) -> String {
    format!(
        "        <div class=\"stat\">\n            <div class=\"stat-num\">{}</div>\n            <div class=\"stat-label\">{}</div>\n        </div>\n",
        value, label
    )
}
