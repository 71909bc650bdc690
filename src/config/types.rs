use crate::crawler::Mode;
use crate::output::ExportFormat;
use serde::Deserialize;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default pause between successive requests in milliseconds
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Default client identity header, a browser-like user agent
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Main configuration structure for Sumi-Sift
///
/// Every section and key is optional; missing values fall back to the
/// fixed defaults above.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Timeout applied to each request (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Politeness delay between requests (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Content extraction mode
    pub mode: Mode,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            delay_ms: DEFAULT_DELAY_MS,
            mode: Mode::default(),
        }
    }
}

/// Client identity configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Value sent in the User-Agent header
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Export format
    pub format: ExportFormat,

    /// Export destination; stdout when absent
    pub path: Option<String>,
}
