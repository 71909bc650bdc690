//! Result records produced by a crawl
//!
//! A [`CrawlResult`] is created once per URL and never mutated afterwards.
//! Successful pages carry derived counts that are computed at construction,
//! so `content_length` and the link counts always agree with the data.

use crate::crawler::links::LinkSet;
use serde::{Deserialize, Serialize, Serializer};

/// Content extraction mode
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Isolate the main content subtree and return cleaned text
    #[default]
    BodyOnly,
    /// Return the raw document; links are still extracted
    FullPage,
}

impl Mode {
    /// Human readable label, e.g. "Body Only"
    pub fn label(&self) -> &'static str {
        match self {
            Self::BodyOnly => "Body Only",
            Self::FullPage => "Full Page",
        }
    }
}

/// A successfully fetched and processed page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawledPage {
    url: String,
    status_code: u16,
    content: String,
    content_type: String,
    encoding: String,
    content_length: usize,
    links: LinkSet,
    internal_links_count: usize,
    external_links_count: usize,
    total_links_count: usize,
    mode: Mode,
}

impl CrawledPage {
    /// Builds a page record, deriving the length and link counts
    pub fn new(
        url: String,
        status_code: u16,
        content: String,
        content_type: String,
        encoding: String,
        links: LinkSet,
        mode: Mode,
    ) -> Self {
        Self {
            content_length: content.chars().count(),
            internal_links_count: links.internal.len(),
            external_links_count: links.external.len(),
            total_links_count: links.all.len(),
            url,
            status_code,
            content,
            content_type,
            encoding,
            links,
            mode,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Number of characters (not bytes) in the content
    pub fn content_length(&self) -> usize {
        self.content_length
    }

    pub fn links(&self) -> &LinkSet {
        &self.links
    }

    pub fn internal_links_count(&self) -> usize {
        self.internal_links_count
    }

    pub fn external_links_count(&self) -> usize {
        self.external_links_count
    }

    pub fn total_links_count(&self) -> usize {
        self.total_links_count
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

/// A page that could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedPage {
    url: String,
    error: String,
}

impl FailedPage {
    pub fn new(url: String, error: String) -> Self {
        Self { url, error }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn error(&self) -> &str {
        &self.error
    }
}

/// Outcome of crawling a single URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlResult {
    Success(CrawledPage),
    Failure(FailedPage),
}

impl CrawlResult {
    /// The normalized URL this result belongs to
    pub fn url(&self) -> &str {
        match self {
            Self::Success(page) => page.url(),
            Self::Failure(page) => page.url(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn as_success(&self) -> Option<&CrawledPage> {
        match self {
            Self::Success(page) => Some(page),
            Self::Failure(_) => None,
        }
    }

    /// Error text for failed results
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(page) => Some(page.error()),
        }
    }
}

/// Adds the `success` flag next to the variant's own fields
#[derive(Serialize)]
struct Flagged<'a, T> {
    success: bool,
    #[serde(flatten)]
    page: &'a T,
}

impl Serialize for CrawlResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(page) => Flagged {
                success: true,
                page,
            }
            .serialize(serializer),
            Self::Failure(page) => Flagged {
                success: false,
                page,
            }
            .serialize(serializer),
        }
    }
}
