//! Statistics over a batch of crawl results
//!
//! This module provides functionality for summarizing and displaying
//! the outcome of a batch.

use crate::crawler::CrawlResult;
use std::io::{self, Write};

/// Batch statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchStatistics {
    /// Number of URLs crawled
    pub total: usize,

    /// Number of URLs fetched successfully
    pub successful: usize,

    /// Number of URLs that failed
    pub failed: usize,

    /// Mean content length (characters) over successful results
    pub average_content_length: f64,

    /// Internal links summed over successful results
    pub total_internal_links: usize,

    /// External links summed over successful results
    pub total_external_links: usize,
}

impl BatchStatistics {
    /// Computes statistics from a result list
    pub fn from_results(results: &[CrawlResult]) -> Self {
        let pages: Vec<_> = results.iter().filter_map(CrawlResult::as_success).collect();
        let successful = pages.len();

        let average_content_length = if successful > 0 {
            pages.iter().map(|p| p.content_length()).sum::<usize>() as f64 / successful as f64
        } else {
            0.0
        };

        Self {
            total: results.len(),
            successful,
            failed: results.len() - successful,
            average_content_length,
            total_internal_links: pages.iter().map(|p| p.internal_links_count()).sum(),
            total_external_links: pages.iter().map(|p| p.external_links_count()).sum(),
        }
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.successful as f64 / self.total as f64) * 100.0
    }
}

/// Writes statistics in a formatted manner
///
/// # Arguments
///
/// * `out` - Destination; stderr when stdout carries the export
/// * `stats` - The statistics to display
/// * `results` - The results the statistics came from, for listing failures
pub fn write_statistics<W: Write>(
    out: &mut W,
    stats: &BatchStatistics,
    results: &[CrawlResult],
) -> io::Result<()> {
    writeln!(out, "=== Crawl Statistics ===\n")?;

    writeln!(out, "Overview:")?;
    writeln!(out, "  Total URLs: {}", stats.total)?;
    writeln!(out, "  Successful: {}", stats.successful)?;
    writeln!(out, "  Failed: {}", stats.failed)?;
    writeln!(
        out,
        "  Avg content length: {:.0} chars",
        stats.average_content_length
    )?;
    writeln!(out, "  Internal links: {}", stats.total_internal_links)?;
    writeln!(out, "  External links: {}", stats.total_external_links)?;
    writeln!(out)?;

    let failures: Vec<_> = results.iter().filter(|r| !r.is_success()).collect();
    if !failures.is_empty() {
        writeln!(out, "Failures:")?;
        for result in failures {
            writeln!(out, "  - {}: {}", result.url(), result.error().unwrap_or("unknown"))?;
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "Success Rate: {:.1}% ({} / {} URLs)",
        stats.success_rate(),
        stats.successful,
        stats.total
    )
}
