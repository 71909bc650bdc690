//! Structured JSON export
//!
//! A session summary followed by one entry per successful page, carrying
//! cleaned content, page metadata and a capped selection of links. Meant
//! to be handed to programmatic consumers as-is.

use crate::crawler::{CrawlResult, CrawledPage, Mode};
use crate::output::{clean_content, BatchStatistics, OutputResult};
use serde::Serialize;

/// Internal and external links kept per page (each)
pub const MAX_LINKS_PER_PAGE: usize = 10;

/// Structured export document
#[derive(Debug, Serialize)]
pub struct StructuredExport<'a> {
    pub session_info: SessionInfo,
    pub pages: Vec<StructuredPage<'a>>,
}

/// Batch counts
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SessionInfo {
    pub total_pages: usize,
    pub successful_crawls: usize,
    pub failed_crawls: usize,
}

#[derive(Debug, Serialize)]
pub struct StructuredPage<'a> {
    pub url: &'a str,
    pub content: String,
    pub metadata: PageMetadata<'a>,
    pub links: PageLinks<'a>,
}

#[derive(Debug, Serialize)]
pub struct PageMetadata<'a> {
    pub status_code: u16,
    /// Length of the cleaned content, in characters
    pub content_length: usize,
    pub mode: Mode,
    pub content_type: &'a str,
    pub encoding: &'a str,
}

#[derive(Debug, Serialize)]
pub struct PageLinks<'a> {
    pub internal: &'a [String],
    pub external: &'a [String],
    pub total_internal: usize,
    pub total_external: usize,
}

impl<'a> StructuredExport<'a> {
    /// Builds the export from results; failed pages only count toward the
    /// session summary
    pub fn from_results(results: &'a [CrawlResult]) -> Self {
        let stats = BatchStatistics::from_results(results);

        Self {
            session_info: SessionInfo {
                total_pages: stats.total,
                successful_crawls: stats.successful,
                failed_crawls: stats.failed,
            },
            pages: results
                .iter()
                .filter_map(CrawlResult::as_success)
                .map(StructuredPage::from_page)
                .collect(),
        }
    }
}

impl<'a> StructuredPage<'a> {
    fn from_page(page: &'a CrawledPage) -> Self {
        let content = clean_content(page.content(), page.mode());
        let links = page.links();

        Self {
            url: page.url(),
            metadata: PageMetadata {
                status_code: page.status_code(),
                content_length: content.chars().count(),
                mode: page.mode(),
                content_type: page.content_type(),
                encoding: page.encoding(),
            },
            content,
            links: PageLinks {
                internal: capped(&links.internal),
                external: capped(&links.external),
                total_internal: links.internal.len(),
                total_external: links.external.len(),
            },
        }
    }
}

fn capped(links: &[String]) -> &[String] {
    &links[..links.len().min(MAX_LINKS_PER_PAGE)]
}

/// Serializes results as a pretty-printed structured export
pub fn to_structured_json(results: &[CrawlResult]) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(&StructuredExport::from_results(results))?)
}
