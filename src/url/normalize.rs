/// Schemes accepted as-is; anything else gets `https://` prepended
const KNOWN_SCHEMES: &[&str] = &["http://", "https://"];

/// Scheme prepended to input that does not carry one
const DEFAULT_SCHEME: &str = "https://";

/// Normalizes user-supplied URL input before it is fetched
///
/// The input must already be trimmed and non-empty. If it does not start
/// with `http://` or `https://`, `https://` is prepended. Nothing else is
/// checked here: a malformed host is reported later as a fetch failure.
///
/// # Examples
///
/// ```
/// use sumi_sift::url::normalize_url;
///
/// assert_eq!(normalize_url("example.com"), "https://example.com");
/// assert_eq!(normalize_url("http://example.com"), "http://example.com");
/// ```
pub fn normalize_url(input: &str) -> String {
    if KNOWN_SCHEMES.iter().any(|scheme| input.starts_with(scheme)) {
        input.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME, input)
    }
}
