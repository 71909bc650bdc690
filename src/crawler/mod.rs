//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with error classification
//! - Content extraction (body-only and full-page modes)
//! - Link extraction and internal/external classification
//! - Sequential batch orchestration with a politeness delay

mod batch;
mod extractor;
mod fetcher;
mod links;
mod result;

pub use batch::Crawler;
pub use extractor::{document_text, extract, normalize_whitespace, Extraction};
pub use fetcher::{build_http_client, fetch_url, FetchOutcome, HttpFetcher, PageFetcher};
pub use links::{extract_links, LinkSet};
pub use result::{CrawlResult, CrawledPage, FailedPage, Mode};
