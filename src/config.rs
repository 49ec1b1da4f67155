//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.openclaw-qa.toml` files. The resolved [`Config`] is built once in
//! `main` and handed to the pipeline and site generator by value.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".openclaw-qa.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// External commands the pipeline delegates to.
    #[serde(default)]
    pub collaborators: CollaboratorsConfig,

    /// Pipeline tuning.
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Static site settings.
    #[serde(default)]
    pub site: SiteConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default data file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "qa_data.json".to_string()
}

/// How to invoke one external collaborator.
///
/// `args` may contain `{url}`, `{prompt}` and `{prompt_file}` placeholders,
/// expanded per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Executable to run.
    pub program: String,

    /// Arguments, with placeholders.
    #[serde(default)]
    pub args: Vec<String>,

    /// Hard limit for one call; the child is killed when it expires.
    pub timeout_seconds: u64,
}

impl CommandSpec {
    pub fn new(program: &str, args: &[&str], timeout_seconds: u64) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            timeout_seconds,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// The four collaborators of a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorsConfig {
    /// Fetches the tweet itself.
    #[serde(default = "default_tweet_command")]
    pub tweet: CommandSpec,

    /// Fetches the tweet's replies.
    #[serde(default = "default_replies_command")]
    pub replies: CommandSpec,

    /// Batch-classifies candidate questions.
    #[serde(default = "default_classifier_command")]
    pub classifier: CommandSpec,

    /// Answers one question.
    #[serde(default = "default_answerer_command")]
    pub answerer: CommandSpec,
}

impl Default for CollaboratorsConfig {
    fn default() -> Self {
        Self {
            tweet: default_tweet_command(),
            replies: default_replies_command(),
            classifier: default_classifier_command(),
            answerer: default_answerer_command(),
        }
    }
}

fn default_tweet_command() -> CommandSpec {
    CommandSpec::new("python3", &["fetch_tweet.py", "--url", "{url}"], 60)
}

fn default_replies_command() -> CommandSpec {
    CommandSpec::new("python3", &["monitor.py", "--url", "{url}"], 30)
}

fn default_classifier_command() -> CommandSpec {
    CommandSpec::new(
        "opencode",
        &["run", "-m", "minimax-coding-plan/MiniMax-M2.5", "{prompt}"],
        60,
    )
}

fn default_answerer_command() -> CommandSpec {
    CommandSpec::new("gemini", &["-p", "{prompt}"], 45)
}

/// Pipeline tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pause between consecutive answer calls for the same tweet.
    #[serde(default = "default_answer_delay_ms")]
    pub answer_delay_ms: u64,

    /// Leading characters of the tweet passed to the answerer as context.
    #[serde(default = "default_context_chars")]
    pub context_chars: usize,

    /// Leading characters of an article body used as the tweet text.
    #[serde(default = "default_article_chars")]
    pub article_chars: usize,

    /// Answer lines starting with any of these are collaborator log noise.
    #[serde(default = "default_noise_prefixes")]
    pub noise_prefixes: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            answer_delay_ms: default_answer_delay_ms(),
            context_chars: default_context_chars(),
            article_chars: default_article_chars(),
            noise_prefixes: default_noise_prefixes(),
        }
    }
}

fn default_answer_delay_ms() -> u64 {
    1000
}

fn default_context_chars() -> usize {
    500
}

fn default_article_chars() -> usize {
    500
}

fn default_noise_prefixes() -> Vec<String> {
    vec!["Hook registry".to_string()]
}

/// Static site settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Page title and main heading.
    #[serde(default = "default_title")]
    pub title: String,

    /// Line under the heading.
    #[serde(default = "default_subtitle")]
    pub subtitle: String,

    /// Directory receiving `index.html`.
    #[serde(default = "default_site_dir")]
    pub output_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            subtitle: default_subtitle(),
            output_dir: default_site_dir(),
        }
    }
}

fn default_title() -> String {
    "OpenClaw Q&A".to_string()
}

fn default_subtitle() -> String {
    "@YuLin807 评论区技术问答 · AI 驱动自动回答".to_string()
}

fn default_site_dir() -> String {
    ".".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when the user actually passed them.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if args.verbose {
            self.general.verbose = true;
        }

        match &args.command {
            crate::cli::Command::Pipeline(pipeline) => {
                if let Some(ref output) = pipeline.output {
                    self.general.output = output.display().to_string();
                }
                if let Some(delay) = pipeline.answer_delay_ms {
                    self.pipeline.answer_delay_ms = delay;
                }
            }
            crate::cli::Command::Site(site) => {
                if let Some(ref dir) = site.output_dir {
                    self.site.output_dir = dir.display().to_string();
                }
            }
            crate::cli::Command::InitConfig => {}
        }
    }

    /// Log level after merging: `--quiet` wins over `verbose` from either source.
    pub fn log_level(&self, args: &crate::cli::Args) -> tracing::Level {
        if args.quiet {
            tracing::Level::ERROR
        } else if self.general.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Data file path after merging.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.general.output)
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
