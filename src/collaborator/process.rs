//! Command-backed collaborators.
//!
//! Each call spawns the configured program, waits for it under a hard
//! timeout and returns its trimmed stdout. A timeout kills the child and
//! is reported like any other failure.

use super::{CollaboratorError, PostSource, TextModel};
use crate::config::{CollaboratorsConfig, CommandSpec};
use crate::models::{PostEnvelope, RepliesEnvelope};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::io::Write;
use std::process::Stdio;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::debug;

/// Placeholder for the tweet URL.
pub const URL_PLACEHOLDER: &str = "{url}";
/// Placeholder for the prompt passed inline as one argument.
pub const PROMPT_PLACEHOLDER: &str = "{prompt}";
/// Placeholder for a temporary file holding the prompt.
pub const PROMPT_FILE_PLACEHOLDER: &str = "{prompt_file}";

/// Runs one configured command per call.
#[derive(Debug, Clone)]
pub struct CommandCollaborator {
    spec: CommandSpec,
}

impl CommandCollaborator {
    pub fn new(spec: CommandSpec) -> Self {
        Self { spec }
    }

    /// Expand `placeholder` to `value` in the arguments, run the command and
    /// return its trimmed stdout.
    pub async fn invoke(&self, placeholder: &str, value: &str) -> Result<String, CollaboratorError> {
        let program = &self.spec.program;

        // Kept alive until the child has exited.
        let prompt_file = if self
            .spec
            .args
            .iter()
            .any(|a| a.contains(PROMPT_FILE_PLACEHOLDER))
        {
            let mut file = NamedTempFile::new()?;
            file.write_all(value.as_bytes())?;
            file.flush()?;
            Some(file)
        } else {
            None
        };

        let args: Vec<String> = self
            .spec
            .args
            .iter()
            .map(|arg| {
                let arg = match &prompt_file {
                    Some(file) => {
                        arg.replace(PROMPT_FILE_PLACEHOLDER, &file.path().to_string_lossy())
                    }
                    None => arg.clone(),
                };
                arg.replace(placeholder, value)
            })
            .collect();

        debug!("Running `{}` with {} args", program, args.len());

        let mut command = Command::new(program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.spec.timeout(), command.output()).await {
            Err(_) => {
                return Err(CollaboratorError::Timeout {
                    program: program.clone(),
                    seconds: self.spec.timeout_seconds,
                })
            }
            Ok(Err(source)) => {
                return Err(CollaboratorError::Spawn {
                    program: program.clone(),
                    source,
                })
            }
            Ok(Ok(output)) => output,
        };

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !stderr.is_empty() {
            debug!("`{}` stderr: {}", program, stderr);
        }

        if !output.status.success() {
            return Err(CollaboratorError::Failed {
                program: program.clone(),
                status: output.status.to_string(),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            return Err(CollaboratorError::EmptyOutput {
                program: program.clone(),
            });
        }

        Ok(stdout)
    }

    async fn invoke_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, CollaboratorError> {
        let out = self.invoke(URL_PLACEHOLDER, url).await?;
        serde_json::from_str(&out).map_err(|e| CollaboratorError::Malformed {
            program: self.spec.program.clone(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl TextModel for CommandCollaborator {
    fn name(&self) -> &str {
        &self.spec.program
    }

    async fn complete(&self, prompt: &str) -> Result<String, CollaboratorError> {
        self.invoke(PROMPT_PLACEHOLDER, prompt).await
    }
}

/// Tweet and reply fetchers backed by two commands emitting JSON.
#[derive(Debug, Clone)]
pub struct CommandPostSource {
    tweet: CommandCollaborator,
    replies: CommandCollaborator,
}

impl CommandPostSource {
    pub fn new(tweet: CommandSpec, replies: CommandSpec) -> Self {
        Self {
            tweet: CommandCollaborator::new(tweet),
            replies: CommandCollaborator::new(replies),
        }
    }

    pub fn from_config(config: &CollaboratorsConfig) -> Self {
        Self::new(config.tweet.clone(), config.replies.clone())
    }
}

#[async_trait]
impl PostSource for CommandPostSource {
    async fn fetch_post(&self, url: &str) -> Result<PostEnvelope, CollaboratorError> {
        self.tweet.invoke_json(url).await
    }

    async fn fetch_replies(&self, url: &str) -> Result<RepliesEnvelope, CollaboratorError> {
        self.replies.invoke_json(url).await
    }
}
