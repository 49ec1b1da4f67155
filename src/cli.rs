//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::{ArgGroup, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// OpenClaw QA - answer the technical questions hiding in tweet replies
///
/// Fetches a tweet and its replies, keeps the genuine technical questions,
/// answers them with an AI collaborator and publishes a static page.
///
/// Examples:
///   openclaw-qa pipeline --url "https://x.com/YuLin807/status/123"
///   openclaw-qa pipeline --urls tweets.txt -o data/qa_data.json
///   openclaw-qa site data/qa_data.json public
///   openclaw-qa init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to configuration file
    ///
    /// If not specified, looks for .openclaw-qa.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (errors only, no progress bar)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Pipeline stages.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch replies, classify questions, generate answers, write the data file
    Pipeline(PipelineArgs),

    /// Render the data file into a static index.html
    Site(SiteArgs),

    /// Generate a default .openclaw-qa.toml configuration file
    InitConfig,
}

/// Arguments of the `pipeline` stage.
#[derive(clap::Args, Debug, Clone)]
#[command(group(ArgGroup::new("source").required(true).args(["url", "urls"])))]
pub struct PipelineArgs {
    /// Single tweet URL to process
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// File with tweet URLs, one per line (blank lines and # comments ignored)
    #[arg(long, value_name = "FILE")]
    pub urls: Option<PathBuf>,

    /// Output JSON file [default: qa_data.json]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Pause between answer calls in milliseconds (default: from config or 1000)
    #[arg(long, value_name = "MS")]
    pub answer_delay_ms: Option<u64>,
}

/// Arguments of the `site` stage.
#[derive(clap::Args, Debug, Clone)]
pub struct SiteArgs {
    /// Data file written by the pipeline stage
    #[arg(value_name = "DATA_JSON")]
    pub data: PathBuf,

    /// Directory receiving index.html (default: from config or ".")
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        match &self.command {
            Command::Pipeline(pipeline) => pipeline.validate(),
            Command::Site(site) => site.validate(),
            Command::InitConfig => Ok(()),
        }
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

impl PipelineArgs {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref url) = self.url {
            if !url.starts_with("https://") && !url.starts_with("http://") {
                return Err("Tweet URL must start with 'https://' or 'http://'".to_string());
            }
        }

        if let Some(ref path) = self.urls {
            require_file(path, "URL list")?;
        }

        Ok(())
    }
}

impl SiteArgs {
    fn validate(&self) -> Result<(), String> {
        require_file(&self.data, "Data file")
    }
}

fn require_file(path: &Path, what: &str) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("{} does not exist: {}", what, path.display()));
    }
    if !path.is_file() {
        return Err(format!("{} is not a file: {}", what, path.display()));
    }
    Ok(())
}
