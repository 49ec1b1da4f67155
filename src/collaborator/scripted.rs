//! In-memory collaborators replaying canned responses.

use super::{CollaboratorError, PostSource, TextModel};
use crate::models::{PostEnvelope, RepliesEnvelope};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

fn failure(program: &str) -> CollaboratorError {
    CollaboratorError::Failed {
        program: program.to_string(),
        status: "exit status: 1".to_string(),
        stderr: String::new(),
    }
}

/// Serves raw JSON per URL; unknown URLs fail.
#[derive(Default)]
pub struct ScriptedSource {
    posts: HashMap<String, String>,
    replies: HashMap<String, String>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_post(mut self, url: &str, json: &str) -> Self {
        self.posts.insert(url.to_string(), json.to_string());
        self
    }

    pub fn with_replies(mut self, url: &str, json: &str) -> Self {
        self.replies.insert(url.to_string(), json.to_string());
        self
    }

    fn decode<T: serde::de::DeserializeOwned>(
        table: &HashMap<String, String>,
        url: &str,
        program: &str,
    ) -> Result<T, CollaboratorError> {
        let raw = table.get(url).ok_or_else(|| failure(program))?;
        serde_json::from_str(raw).map_err(|e| CollaboratorError::Malformed {
            program: program.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl PostSource for ScriptedSource {
    async fn fetch_post(&self, url: &str) -> Result<PostEnvelope, CollaboratorError> {
        Self::decode(&self.posts, url, "fetch-tweet")
    }

    async fn fetch_replies(&self, url: &str) -> Result<RepliesEnvelope, CollaboratorError> {
        Self::decode(&self.replies, url, "fetch-replies")
    }
}

/// Replays queued responses in order and records every prompt.
/// `None` entries and an exhausted queue both fail the call.
pub struct ScriptedModel {
    name: String,
    responses: Mutex<VecDeque<Option<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new(name: &str, responses: Vec<Option<&str>>) -> Self {
        Self {
            name: name.to_string(),
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|r| r.map(String::from))
                    .collect(),
            ),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextModel for ScriptedModel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, prompt: &str) -> Result<String, CollaboratorError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.responses.lock().unwrap().pop_front() {
            Some(Some(response)) => Ok(response),
            _ => Err(failure(&self.name)),
        }
    }
}

/// Lets tests keep a handle on a model after boxing it for the pipeline.
#[async_trait]
impl<T: TextModel> TextModel for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn complete(&self, prompt: &str) -> Result<String, CollaboratorError> {
        (**self).complete(prompt).await
    }
}
