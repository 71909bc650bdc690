//! HTML content extraction
//!
//! This module turns a fetched body into the content reported for a page:
//! - Body-only mode strips non-content elements, picks a content root and
//!   returns whitespace-normalized text
//! - Full-page mode returns the body unchanged
//!
//! Every body is parsed, whatever its declared content type. The HTML
//! parser recovers from any input, so plain text comes back as a document
//! holding a single text node. Both modes hand back the parsed document so
//! links can be extracted.

use crate::crawler::Mode;
use scraper::{ElementRef, Html, Selector};

/// Elements that never contribute to page content
const NON_CONTENT_ELEMENTS: &str = "script, style, nav, header, footer, aside, meta, link, noscript";

/// Elements that never hold readable text
const NON_TEXT_ELEMENTS: &str = "script, style";

/// Content root candidates, in priority order. First match wins.
const CONTENT_ROOT_SELECTORS: &[&str] = &[
    "main",
    "article",
    ".content",
    ".main-content",
    "#content",
    "#main",
    ".post-content",
    ".entry-content",
    ".article-content",
];

/// Content extracted from a page body
#[derive(Debug)]
pub struct Extraction {
    /// Cleaned text (body-only) or the raw body (full-page)
    pub content: String,

    /// Parsed document for link extraction
    pub document: Html,
}

/// Extracts content from a page body according to the mode
///
/// # Body-only steps
///
/// 1. Parse the body as HTML
/// 2. Remove script, style, nav, header, footer, aside, meta, link and
///    noscript elements
/// 3. Select the content root: `main`, `article`, `.content`,
///    `.main-content`, `#content`, `#main`, `.post-content`,
///    `.entry-content`, `.article-content`, then `body`, then the whole
///    document
/// 4. Join the root's text nodes with single spaces
/// 5. Normalize whitespace into a single line
///
/// # Example
///
/// ```
/// use sumi_sift::crawler::{extract, Mode};
///
/// let html = "<html><body><nav>Menu</nav><main><p>Hello</p>  <p>world</p></main></body></html>";
/// let extraction = extract(html, Mode::BodyOnly);
/// assert_eq!(extraction.content, "Hello world");
/// assert_eq!(extraction.document.root_element().value().name(), "html");
/// ```
pub fn extract(raw_body: &str, mode: Mode) -> Extraction {
    let mut document = Html::parse_document(raw_body);

    match mode {
        Mode::FullPage => Extraction {
            content: raw_body.to_string(),
            document,
        },
        Mode::BodyOnly => {
            remove_elements(&mut document, NON_CONTENT_ELEMENTS);
            let text = content_root(&document)
                .text()
                .collect::<Vec<_>>()
                .join(" ");

            Extraction {
                content: normalize_whitespace(&text),
                document,
            }
        }
    }
}

/// Returns the readable text of a whole document
///
/// Only scripts and styles are dropped; navigation and other chrome stay.
/// Used to turn full-page content into text for exports.
pub fn document_text(raw_body: &str) -> String {
    let mut document = Html::parse_document(raw_body);
    remove_elements(&mut document, NON_TEXT_ELEMENTS);
    let text = document.root_element().text().collect::<Vec<_>>().join(" ");
    normalize_whitespace(&text)
}

/// Detaches every element matching `selectors` from the tree
fn remove_elements(document: &mut Html, selectors: &str) {
    let Ok(selector) = Selector::parse(selectors) else {
        return;
    };

    let ids: Vec<_> = document.select(&selector).map(|element| element.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Picks the subtree representing the main content
///
/// Only the attached tree is searched; `Html::select` would also visit
/// nodes detached by [`remove_elements`].
fn content_root(document: &Html) -> ElementRef<'_> {
    let root = document.root_element();
    CONTENT_ROOT_SELECTORS
        .iter()
        .chain(std::iter::once(&"body"))
        .filter_map(|css| Selector::parse(css).ok())
        .find_map(|selector| root.select(&selector).next())
        .unwrap_or(root)
}

/// Collapses text into a single line
///
/// Splits into lines, trims each, splits on double spaces, trims the
/// fragments, drops empty ones and joins the rest with one space.
pub fn normalize_whitespace(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .flat_map(|line| line.split("  "))
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
