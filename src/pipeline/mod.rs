//! The aggregation stage: tweet URLs in, Q&A data file out.

pub mod aggregator;
pub mod classify;
pub mod extract;
pub mod prompts;

use crate::models::OutputDocument;
use crate::output::write_atomic;
use anyhow::{Context, Result};
use std::path::Path;

pub use aggregator::{Aggregator, PipelineSettings};

/// Parse a URL list: one URL per line, blank lines and `#` comments ignored.
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Read a URL list file.
pub fn load_url_list(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read URL list: {}", path.display()))?;
    Ok(parse_url_list(&content))
}

/// Serialize the document as indented UTF-8 JSON (non-ASCII kept as is).
pub fn generate_json(document: &OutputDocument) -> Result<String> {
    serde_json::to_string_pretty(document).map_err(Into::into)
}

/// Write the data file atomically.
pub fn save_document(document: &OutputDocument, path: &Path) -> Result<()> {
    let json = generate_json(document)?;
    write_atomic(path, &json)
}
