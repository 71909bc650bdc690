//! Batch orchestration
//!
//! Drives fetch → extract → link extraction for each URL in order, one
//! request at a time, pausing for the politeness delay between requests.
//! Every failure is local to its URL; a batch always completes.

use crate::config::Config;
use crate::crawler::extractor::extract;
use crate::crawler::fetcher::{FetchOutcome, HttpFetcher, PageFetcher};
use crate::crawler::links::{extract_links, LinkSet};
use crate::crawler::result::{CrawlResult, CrawledPage, FailedPage, Mode};
use crate::url::normalize_url;
use std::time::Duration;

/// Sequential crawler over a page fetcher
pub struct Crawler<F> {
    fetcher: F,
    delay: Duration,
}

impl Crawler<HttpFetcher> {
    /// Creates an HTTP crawler from configuration
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sumi_sift::config::Config;
    /// use sumi_sift::crawler::{Crawler, Mode};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let crawler = Crawler::from_config(&Config::default())?;
    /// let results = crawler.crawl_many(&["example.com"], Mode::BodyOnly).await;
    /// assert_eq!(results.len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        Ok(Self::new(
            HttpFetcher::new(config)?,
            Duration::from_millis(config.crawler.delay_ms),
        ))
    }
}

impl<F: PageFetcher> Crawler<F> {
    /// Creates a crawler with an explicit politeness delay
    pub fn new(fetcher: F, delay: Duration) -> Self {
        Self { fetcher, delay }
    }

    /// Pause applied between successive requests
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Crawls a list of URLs in order
    ///
    /// Each input is trimmed; blank inputs are skipped. The result list
    /// holds one entry per non-blank input, in input order. The delay is
    /// applied between requests but not after the last one.
    pub async fn crawl_many<S: AsRef<str>>(&self, urls: &[S], mode: Mode) -> Vec<CrawlResult> {
        let targets: Vec<&str> = urls
            .iter()
            .map(|url| url.as_ref().trim())
            .filter(|url| !url.is_empty())
            .collect();

        tracing::info!("Crawling {} URLs ({})", targets.len(), mode.label());

        let mut results = Vec::with_capacity(targets.len());
        for (index, url) in targets.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let result = self.crawl_url(url, mode).await;
            match &result {
                CrawlResult::Success(page) => tracing::info!(
                    "[{}/{}] {} -> {} ({} chars, {} links)",
                    index + 1,
                    targets.len(),
                    page.url(),
                    page.status_code(),
                    page.content_length(),
                    page.total_links_count()
                ),
                CrawlResult::Failure(page) => tracing::warn!(
                    "[{}/{}] {} failed: {}",
                    index + 1,
                    targets.len(),
                    page.url(),
                    page.error()
                ),
            }
            results.push(result);
        }

        let successful = results.iter().filter(|r| r.is_success()).count();
        tracing::info!(
            "Batch complete: {} succeeded, {} failed",
            successful,
            results.len() - successful
        );

        results
    }

    /// Crawls a single URL
    ///
    /// The input must be trimmed and non-empty; a missing scheme is filled
    /// in before fetching.
    pub async fn crawl_url(&self, url: &str, mode: Mode) -> CrawlResult {
        let url = normalize_url(url);
        tracing::debug!("Fetching {}", url);

        match self.fetcher.fetch(&url).await {
            FetchOutcome::Failure { error } => {
                CrawlResult::Failure(FailedPage::new(url, error.to_string()))
            }
            FetchOutcome::Success {
                final_url,
                status_code,
                body,
                content_type,
                encoding,
            } => {
                let (content, links) = process_body(&body, &final_url, mode);
                CrawlResult::Success(CrawledPage::new(
                    url,
                    status_code,
                    content,
                    content_type,
                    encoding,
                    links,
                    mode,
                ))
            }
        }
    }
}

/// Runs content and link extraction over a fetched body
///
/// Links resolve against the final URL so redirects do not misclassify
/// relative links.
fn process_body(body: &str, base_url: &str, mode: Mode) -> (String, LinkSet) {
    let extraction = extract(body, mode);
    let links = extract_links(&extraction.document, base_url);
    (extraction.content, links)
}
