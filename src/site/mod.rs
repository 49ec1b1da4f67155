//! The rendering stage: Q&A data file in, static `index.html` out.

pub mod generator;
pub mod markdown;
pub mod template;

use crate::config::SiteConfig;
use crate::models::OutputDocument;
use crate::output::write_atomic;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub use generator::generate_html;

/// Read a data file written by the pipeline stage.
pub fn load_document(path: &Path) -> Result<OutputDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse data file: {}", path.display()))
}

/// Render `document` into `<output_dir>/index.html` and return that path.
pub fn write_site(document: &OutputDocument, output_dir: &Path, site: &SiteConfig) -> Result<PathBuf> {
    let html = generate_html(document, site);
    let index_path = output_dir.join("index.html");
    write_atomic(&index_path, &html)?;
    Ok(index_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_site_creates_index() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("qa_data.json");
        std::fs::write(
            &data,
            r#"{"total_qa":0,"total_tweets":2,"tweets":[],"generated_at":"2026-10-19T08:00:00"}"#,
        )
        .unwrap();

        let doc = load_document(&data).unwrap();
        assert_eq!(doc.total_tweets, 2);

        let out_dir = dir.path().join("public/site");
        let index = write_site(&doc, &out_dir, &SiteConfig::default()).unwrap();

        assert_eq!(index, out_dir.join("index.html"));
        let html = std::fs::read_to_string(&index).unwrap();
        assert!(html.contains("暂无问答内容"));
    }

    #[test]
    fn test_load_document_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_document(&dir.path().join("missing.json")).is_err());

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "not json").unwrap();
        assert!(load_document(&bad).is_err());
    }
}
