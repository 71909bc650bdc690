use crate::crawler::CrawlResult;
use crate::output::OutputResult;

/// Serializes results as a pretty-printed JSON array
///
/// Each element has the shape
/// `{ url, success, status_code, content, ..., mode }` for successes and
/// `{ url, success, error }` for failures.
pub fn to_json(results: &[CrawlResult]) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(results)?)
}
