//! Boundary to the external tools the pipeline delegates to.
//!
//! The pipeline only sees two traits: [`PostSource`] for the tweet and
//! reply fetchers, and [`TextModel`] for the classifier and answerer.
//! Production runs use the command-backed implementations in [`process`].

pub mod process;

#[cfg(test)]
pub mod scripted;

use crate::models::{PostEnvelope, RepliesEnvelope};
use async_trait::async_trait;
use thiserror::Error;

pub use process::{CommandCollaborator, CommandPostSource};

/// Why a collaborator call produced nothing usable.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` timed out after {seconds}s")]
    Timeout { program: String, seconds: u64 },

    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("`{program}` produced no output")]
    EmptyOutput { program: String },

    #[error("`{program}` returned malformed output: {message}")]
    Malformed { program: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetches a tweet and its replies.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch the tweet behind `url`.
    async fn fetch_post(&self, url: &str) -> Result<PostEnvelope, CollaboratorError>;

    /// Fetch the replies to the tweet behind `url`.
    async fn fetch_replies(&self, url: &str) -> Result<RepliesEnvelope, CollaboratorError>;
}

/// Turns a prompt into free-form text.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Short label used in log lines.
    fn name(&self) -> &str;

    async fn complete(&self, prompt: &str) -> Result<String, CollaboratorError>;
}
