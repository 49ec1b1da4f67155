//! OpenClaw QA - technical Q&A mined from tweet replies
//!
//! A CLI with two stages run one after the other:
//!   pipeline - fetch replies, classify questions, generate answers, write JSON
//!   site     - render that JSON into a static index.html
//!
//! Exit codes:
//!   0 - Success
//!   1 - Input, configuration or output error
//!   2 - Invalid command line (usage printed by clap)

mod cli;
mod collaborator;
mod config;
mod models;
mod output;
mod pipeline;
mod site;
mod text;

use anyhow::{bail, Context, Result};
use cli::{Args, Command, PipelineArgs, SiteArgs};
use collaborator::{CommandCollaborator, CommandPostSource};
use config::{Config, CONFIG_FILE_NAME};
use pipeline::{Aggregator, PipelineSettings};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if let Command::InitConfig = args.command {
        return handle_init_config();
    }

    // Resolve configuration first so `[general] verbose` can set the level
    let loaded = load_config(&args);
    let level = match &loaded {
        Ok((config, _)) => config.log_level(&args),
        Err(_) => args.log_level(),
    };

    // Initialize logging
    init_logging(level);

    info!("OpenClaw QA v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    let result = match loaded {
        Ok((config, source)) => {
            log_config_source(&source);
            match &args.command {
                Command::Pipeline(pipeline_args) => run_pipeline(&args, pipeline_args, config).await,
                Command::Site(site_args) => run_site(site_args, config),
                Command::InitConfig => Ok(()),
            }
        }
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        error!("Run failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle init-config: generate a default .openclaw-qa.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to point the collaborators at your fetcher, monitor and model CLIs.");
    Ok(())
}

/// Initialize logging at `level`.
///
/// Logs go to stderr; the stages' real output is the file they write.
fn init_logging(level: Level) {

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the aggregation stage and write the data file.
async fn run_pipeline(args: &Args, pipeline_args: &PipelineArgs, config: Config) -> Result<()> {

    let urls = resolve_urls(pipeline_args)?;
    if urls.is_empty() {
        warn!("URL list is empty, writing an empty data file");
    }
    info!("Processing {} tweet URL(s)", urls.len());

    let mut settings = PipelineSettings::from(&config.pipeline);
    settings.show_progress = !args.quiet;

    let collaborators = &config.collaborators;
    let aggregator = Aggregator::new(
        Box::new(CommandPostSource::from_config(collaborators)),
        Box::new(CommandCollaborator::new(collaborators.classifier.clone())),
        Box::new(CommandCollaborator::new(collaborators.answerer.clone())),
        settings,
    );

    let document = aggregator.run(&urls).await;

    let output_path = config.output_path();
    pipeline::save_document(&document, &output_path)?;

    eprintln!(
        "\n[OK] Generated {} Q&A pairs from {} tweets",
        document.total_qa,
        document.tweets.len()
    );
    eprintln!("[OK] Output: {}", output_path.display());

    Ok(())
}

/// Run the rendering stage and write index.html.
fn run_site(site_args: &SiteArgs, config: Config) -> Result<()> {

    let document = site::load_document(&site_args.data)?;
    info!(
        "Rendering {} Q&A pairs from {} tweets",
        document.total_qa,
        document.tweets.len()
    );

    let output_dir = PathBuf::from(&config.site.output_dir);
    let index_path = site::write_site(&document, &output_dir, &config.site)?;

    eprintln!("[OK] Generated: {}", index_path.display());
    eprintln!("[OK] {} Q&A pairs", document.total_qa);

    Ok(())
}

/// URLs to process: the single `--url`, or the contents of `--urls`.
fn resolve_urls(pipeline_args: &PipelineArgs) -> Result<Vec<String>> {
    if let Some(ref url) = pipeline_args.url {
        return Ok(vec![url.clone()]);
    }

    if let Some(ref path) = pipeline_args.urls {
        return pipeline::load_url_list(path);
    }

    bail!("Provide --url or --urls")
}

/// Where the configuration came from, logged once logging is up.
#[derive(Debug)]
enum ConfigSource {
    Explicit(PathBuf),
    Default,
    Builtin,
    Fallback(String),
}

/// Load configuration from file or use defaults, merged with CLI arguments.
fn load_config(args: &Args) -> Result<(Config, ConfigSource)> {
    // Try explicit config path
    let (mut config, source) = if let Some(ref config_path) = args.config {
        (Config::load(config_path)?, ConfigSource::Explicit(config_path.clone()))
    } else {
        // Try default location
        match Config::load_default() {
            Ok(Some(config)) => (config, ConfigSource::Default),
            Ok(None) => (Config::default(), ConfigSource::Builtin),
            Err(e) => (Config::default(), ConfigSource::Fallback(format!("{:#}", e))),
        }
    };

    config.merge_with_args(args);
    Ok((config, source))
}

fn log_config_source(source: &ConfigSource) {
    match source {
        ConfigSource::Explicit(path) => info!("Loaded config from: {}", path.display()),
        ConfigSource::Default => info!("Loaded default config from {}", CONFIG_FILE_NAME),
        ConfigSource::Builtin => debug!("No config file found, using defaults"),
        ConfigSource::Fallback(e) => warn!("Failed to load config: {}", e),
    }
}
