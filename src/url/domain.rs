use url::Url;

/// Returns the network location (host and port) of a URL
///
/// The port is included only when the URL carries a non-default one, so
/// `https://example.com:443/` and `https://example.com/` share a location.
/// Hosts are already lowercased by the URL parser. URLs without a host
/// (e.g. `mailto:` URLs) yield an empty string.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_sift::url::network_location;
///
/// let url = Url::parse("https://EXAMPLE.com:8080/path").unwrap();
/// assert_eq!(network_location(&url), "example.com:8080");
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(network_location(&url), "example.com");
/// ```
pub fn network_location(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}

/// Returns true if both URLs share the same network location
pub fn is_same_location(a: &Url, b: &Url) -> bool {
    network_location(a) == network_location(b)
}
