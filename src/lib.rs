//! Sumi-Sift: a polite page fetcher and content sifter
//!
//! This crate fetches web pages for a list of URLs, isolates their readable
//! content, categorizes their links as internal or external, and returns one
//! structured result per URL for display or export.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Sift operations
///
/// Per-URL problems never show up here; they are carried inside
/// [`crawler::CrawlResult::Failure`]. This type covers client setup and
/// export only.
#[derive(Debug, Error)]
pub enum SiftError {
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Reasons a single page fetch can fail
///
/// The `Display` output is the error text reported for the URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("HTTP {status_code} {reason} for url: {url}")]
    Status {
        url: String,
        status_code: u16,
        reason: String,
    },

    #[error("Request failed for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl FetchError {
    /// Returns true for transport-level failures (network, TLS, timeout, HTTP status)
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::Unexpected(_))
    }
}

/// Result type alias for Sumi-Sift operations
pub type Result<T> = std::result::Result<T, SiftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlResult, Crawler, HttpFetcher, LinkSet, Mode};
pub use url::{network_location, normalize_url};
