//! Output module for presenting crawl results
//!
//! This module handles:
//! - Computing batch statistics and printing them
//! - Exporting results as JSON
//! - Exporting results as a Markdown document suited for LLM prompts
//! - Exporting a structured JSON document with cleaned content

mod clean;
mod json;
mod markdown;
pub mod stats;
mod structured;

pub use clean::{clean_content, MAX_CONTENT_CHARS};
pub use json::to_json;
pub use markdown::{format_markdown, MAX_LINKS_PER_KIND};
pub use stats::{write_statistics, BatchStatistics};
pub use structured::{to_structured_json, StructuredExport, MAX_LINKS_PER_PAGE};

use crate::crawler::CrawlResult;
use serde::Deserialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Pretty-printed JSON array of results
    #[default]
    Json,
    /// Markdown document with one section per successful page
    Markdown,
    /// Session summary plus cleaned content and capped links per page
    Structured,
}

/// Renders results in the given format
pub fn render(results: &[CrawlResult], format: ExportFormat) -> OutputResult<String> {
    match format {
        ExportFormat::Json => to_json(results),
        ExportFormat::Markdown => Ok(format_markdown(results, chrono::Utc::now())),
        ExportFormat::Structured => to_structured_json(results),
    }
}

/// Renders results and writes them to a file, or to stdout when no path is given
///
/// # Arguments
///
/// * `results` - The crawl results to export
/// * `format` - Export format
/// * `output_path` - Destination file; stdout when `None`
pub fn write_export(
    results: &[CrawlResult],
    format: ExportFormat,
    output_path: Option<&Path>,
) -> crate::Result<()> {
    let rendered = render(results, format)?;
    write_rendered(&rendered, output_path)?;
    if let Some(path) = output_path {
        tracing::info!("Exported {} results to {}", results.len(), path.display());
    }
    Ok(())
}

fn write_rendered(rendered: &str, output_path: Option<&Path>) -> OutputResult<()> {
    match output_path {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(rendered.as_bytes())?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(rendered.as_bytes())?;
            handle.write_all(b"\n")?;
        }
    }

    Ok(())
}
