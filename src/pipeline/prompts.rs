//! Prompt templates for the classifier and answerer.

use crate::models::Reply;

/// Answer recorded when the answerer fails or says nothing.
pub const FALLBACK_ANSWER: &str = "抱歉，暂时无法生成回答。请稍后再试。";

const CLASSIFY_INTRO: &str = "你是一个技术问题分类助手。以下是社交媒体评论中的回复，请判断哪些是真正的技术问题（关于编程、AI、工具使用、部署、配置等），哪些不是（闲聊、求私信、赞美等）。";

const CLASSIFY_FORMAT: &str = r#"请用JSON数组格式回复，每个元素包含：
- "id": 序号（对应上面的编号）
- "is_tech": true/false（是否为技术问题）
- "category": 分类（如 "开发工具", "AI配置", "部署", "API使用", "安全", "其他"）
- "summary": 一句话概括问题（如果是技术问题）

只返回JSON数组，不要其他文字。"#;

const ANSWER_RULES: &str = "请用中文给出简洁、实用的技术回答。要求：
1. 直接回答问题，不要废话
2. 如果涉及代码，给出关键示例
3. 如果涉及安全问题，说明防护措施
4. 保持在200字以内";

/// One batch prompt listing every candidate as `N. @author: text`, 1-based.
pub fn classification_prompt(candidates: &[&Reply]) -> String {
    let listing = candidates
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. @{}: {}", i + 1, r.author, r.text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n\n回复列表：\n{}\n\n{}",
        CLASSIFY_INTRO, listing, CLASSIFY_FORMAT
    )
}

/// Prompt for a single answer, with the tweet as optional context.
pub fn answer_prompt(question: &str, context: &str) -> String {
    let mut prompt = String::new();
    if !context.is_empty() {
        prompt.push_str(&format!("原始推文内容：{}\n\n", context));
    }
    prompt.push_str(&format!(
        "用户在评论区提出了这个技术问题：\n\n{}\n\n{}",
        question, ANSWER_RULES
    ));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_prompt_numbers_candidates() {
        let a = Reply {
            author: "alice".into(),
            text: "怎么部署？".into(),
            ..Reply::default()
        };
        let b = Reply {
            author: "bob".into(),
            text: "API key 放哪里？".into(),
            ..Reply::default()
        };

        let prompt = classification_prompt(&[&a, &b]);
        assert!(prompt.contains("1. @alice: 怎么部署？\n2. @bob: API key 放哪里？"));
        assert!(prompt.contains("\"is_tech\""));
        assert!(prompt.ends_with("只返回JSON数组，不要其他文字。"));
    }

    #[test]
    fn test_answer_prompt_context_is_optional() {
        let with_context = answer_prompt("how?", "original tweet");
        assert!(with_context.starts_with("原始推文内容：original tweet\n\n"));
        assert!(with_context.contains("how?"));

        let without = answer_prompt("how?", "");
        assert!(!without.contains("原始推文内容"));
        assert!(without.contains("200字以内"));
    }
}
