//! Markdown export
//!
//! Produces a prompt-ready document: one section per successful page with
//! its metadata, cleaned content and a handful of key links. Failed pages
//! are left out.

use crate::crawler::{CrawlResult, CrawledPage};
use crate::output::clean_content;
use chrono::{DateTime, Utc};

/// Internal and external links listed per page (each)
pub const MAX_LINKS_PER_KIND: usize = 5;

/// Formats crawl results as a Markdown document
///
/// Pages are numbered by their position in the batch, so gaps mark
/// failed URLs.
///
/// # Arguments
///
/// * `results` - The crawl results, in batch order
/// * `generated_at` - Timestamp written in the document header
pub fn format_markdown(results: &[CrawlResult], generated_at: DateTime<Utc>) -> String {
    let mut md = String::new();

    md.push_str("## Web Crawl Results\n\n");
    md.push_str(&format!(
        "_Generated {}_\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    for (index, result) in results.iter().enumerate() {
        if let CrawlResult::Success(page) = result {
            push_page(&mut md, index + 1, page);
        }
    }

    md
}

fn push_page(md: &mut String, number: usize, page: &CrawledPage) {
    md.push_str(&format!("### Page {}: {}\n\n", number, page.url()));

    md.push_str("**Metadata:**\n");
    md.push_str(&format!("- Status: {}\n", page.status_code()));
    md.push_str(&format!(
        "- Content Length: {} characters\n",
        group_thousands(page.content_length())
    ));
    md.push_str(&format!("- Mode: {}\n\n", page.mode().label()));

    md.push_str(&format!(
        "**Content:**\n{}\n\n",
        clean_content(page.content(), page.mode())
    ));

    let links = page.links();
    if !links.internal.is_empty() || !links.external.is_empty() {
        md.push_str("**Key Links:**\n");
        for link in links.internal.iter().take(MAX_LINKS_PER_KIND) {
            md.push_str(&format!("- Internal: {}\n", link));
        }
        for link in links.external.iter().take(MAX_LINKS_PER_KIND) {
            md.push_str(&format!("- External: {}\n", link));
        }
        md.push('\n');
    }

    md.push_str("---\n\n");
}

/// Formats an integer with comma thousands separators
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
