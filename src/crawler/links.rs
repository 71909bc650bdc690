//! Link discovery and classification
//!
//! Links are read from `<a href>` elements, resolved against the page URL
//! and split into internal and external by network location. Discovery is
//! best-effort: it never fails the crawl of a page.

use crate::url::is_same_location;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use url::Url;

/// Href prefixes that do not reference a navigable page
const SKIPPED_PREFIXES: &[&str] = &["javascript:", "mailto:", "tel:", "#", "data:"];

/// Links found on a page, in first-seen order
///
/// Every entry of `internal` and `external` also appears in `all`, a link
/// is never in both `internal` and `external`, and no sequence holds
/// duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSet {
    /// Links sharing the page's network location
    pub internal: Vec<String>,
    /// Links pointing anywhere else
    pub external: Vec<String>,
    /// Union of both, de-duplicated
    pub all: Vec<String>,
}

impl LinkSet {
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Extracts and classifies all page links from a parsed document
///
/// # Extraction Rules
///
/// **Skip:**
/// - empty hrefs
/// - `javascript:`, `mailto:`, `tel:`, `data:` hrefs (any letter case)
/// - fragment-only hrefs (`#section`)
/// - hrefs that cannot be resolved against `base_url`
///
/// A link is internal when its host and port equal those of `base_url`.
/// If `base_url` itself does not parse, an empty set is returned.
///
/// # Example
///
/// ```
/// use scraper::Html;
/// use sumi_sift::crawler::extract_links;
///
/// let html = Html::parse_document(r#"<a href="/about">About</a><a href="https://other.com/">x</a>"#);
/// let links = extract_links(&html, "https://example.com/blog/post");
/// assert_eq!(links.internal, vec!["https://example.com/about"]);
/// assert_eq!(links.external, vec!["https://other.com/"]);
/// ```
pub fn extract_links(document: &Html, base_url: &str) -> LinkSet {
    let base = match Url::parse(base_url) {
        Ok(base) => base,
        Err(e) => {
            tracing::warn!("Skipping link extraction, bad base URL {}: {}", base_url, e);
            return LinkSet::default();
        }
    };
    let anchor_selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return LinkSet::default(),
    };

    let mut internal = Vec::new();
    let mut external = Vec::new();
    let mut all = Vec::new();

    // Walk the attached tree so elements removed during extraction stay gone
    for element in document.root_element().select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(resolved) = resolve_link(href, &base) else {
            continue;
        };

        if is_same_location(&resolved, &base) {
            internal.push(resolved.to_string());
        } else {
            external.push(resolved.to_string());
        }
        all.push(resolved.into());
    }

    LinkSet {
        internal: dedup_preserving_order(internal),
        external: dedup_preserving_order(external),
        all: dedup_preserving_order(all),
    }
}

/// Resolves an href to an absolute URL, or None if it should be skipped
fn resolve_link(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || is_non_navigable(href) {
        return None;
    }

    match base.join(href) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!("Could not resolve href {:?} against {}: {}", href, base, e);
            None
        }
    }
}

fn is_non_navigable(href: &str) -> bool {
    SKIPPED_PREFIXES.iter().any(|prefix| {
        href.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Removes repeated entries, keeping the first occurrence of each
fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
