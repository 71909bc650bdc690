//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the configured timeout and user agent
//! - GET requests to fetch page content
//! - Error classification (transport, HTTP status, unexpected)
//!
//! One request is issued per URL. Nothing is retried.

use crate::config::Config;
use crate::FetchError;
use encoding_rs::{Encoding, UTF_8};
use reqwest::{header::CONTENT_TYPE, Client, Response};
use std::time::Duration;

/// Charset assumed when the response does not declare one
const DEFAULT_ENCODING: &str = "utf-8";

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The server answered with a non-error status
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Decoded page body
        body: String,
        /// Content-Type header value (empty if absent)
        content_type: String,
        /// Charset used to decode the body
        encoding: String,
    },

    /// The page could not be fetched
    Failure {
        /// What went wrong
        error: FetchError,
    },
}

/// Source of page bodies for the batch orchestrator
///
/// [`HttpFetcher`] is the production implementation; tests may supply
/// their own to script outcomes without a network.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Fetches a single, already normalized URL
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

/// Builds an HTTP client with the configured identity and timeout
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sumi_sift::config::Config;
/// use sumi_sift::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.value.as_str())
        .timeout(Duration::from_secs(config.crawler.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages over HTTP with a shared, preconfigured client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from configuration
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        fetch_url(&self.client, url).await
    }
}

/// Fetches a URL and classifies the outcome
///
/// # Outcome Rules
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | 1xx-3xx status | Success |
/// | 4xx / 5xx status | Failure (Status) |
/// | Timeout | Failure (Timeout) |
/// | Connection refused, DNS, TLS | Failure (Connect) |
/// | Malformed URL, body decoding | Failure (Unexpected) |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// A FetchOutcome indicating success or the type of failure
pub async fn fetch_url(client: &Client, url: &str) -> FetchOutcome {
    match try_fetch(client, url).await {
        Ok(outcome) => outcome,
        Err(error) => {
            tracing::debug!("Fetch failed for {}: {}", url, error);
            FetchOutcome::Failure { error }
        }
    }
}

async fn try_fetch(client: &Client, url: &str) -> Result<FetchOutcome, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, &e))?;

    let status = response.status();
    let response = response.error_for_status().map_err(|_| FetchError::Status {
        url: url.to_string(),
        status_code: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
    })?;

    let final_url = response.url().to_string();
    let content_type = header_content_type(&response);
    let (decoder, encoding) = select_encoding(&content_type);

    let bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Unexpected(format!("failed to read body of {}: {}", url, e)))?;
    let (body, _, had_errors) = decoder.decode(&bytes);
    if had_errors {
        tracing::debug!("Replaced malformed {} sequences in {}", encoding, url);
    }
    let body = body.into_owned();

    Ok(FetchOutcome::Success {
        final_url,
        status_code: status.as_u16(),
        body,
        content_type,
        encoding,
    })
}

/// Maps a reqwest error to the failure it represents
fn classify_error(url: &str, error: &reqwest::Error) -> FetchError {
    if error.is_builder() {
        FetchError::Unexpected(format!("invalid request for {}: {}", url, error))
    } else if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
            message: error_chain(error),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            message: error_chain(error),
        }
    }
}

/// Joins an error and its sources; reqwest hides DNS/TLS details in the chain
fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

fn header_content_type(response: &Response) -> String {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// Picks the decoder for a body and the charset name to report for it
///
/// A declared charset the decoder does not recognise falls back to UTF-8,
/// and UTF-8 is what gets reported.
fn select_encoding(content_type: &str) -> (&'static Encoding, String) {
    charset_from_content_type(content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()).map(|decoder| (decoder, label)))
        .unwrap_or_else(|| (UTF_8, DEFAULT_ENCODING.to_string()))
}

/// Extracts the lowercased `charset` parameter from a Content-Type value
pub(crate) fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .map(|(_, value)| value.trim().trim_matches('"').to_ascii_lowercase())
        .filter(|value| !value.is_empty())
}
