//! Hostname and endpoint validation.
//!
//! Virtual-host rewriting builds a hostname out of a bucket name, so both the
//! bucket label and the assembled host are checked here before a request is
//! rewritten. The same host rules back [`is_valid_endpoint_host`], which
//! vets the host template a bucket is prefixed onto, and
//! [`is_valid_endpoint_url`] for full endpoint URLs.

use http::Uri;

/// Maximum length of a full hostname.
const MAX_HOSTNAME_LEN: usize = 255;

/// Maximum length of a single DNS label.
const MAX_LABEL_LEN: usize = 63;

/// Minimum bucket name length usable in a virtual host.
const MIN_BUCKET_LABEL_LEN: usize = 3;

/// Whether `host` is a valid RFC 952/1123 hostname.
///
/// Rules:
/// - at most 255 characters, one trailing dot allowed
/// - dot-separated labels of 1-63 ASCII letters, digits, or hyphens
/// - labels neither start nor end with a hyphen
///
/// IPv4 literals pass because their labels are all digits.
///
/// # Examples
///
/// ```
/// use s3prep_addressing::endpoint::is_valid_hostname;
///
/// assert!(is_valid_hostname("s3.amazonaws.com"));
/// assert!(is_valid_hostname("foo.bar.com."));
/// assert!(!is_valid_hostname("-bad.example.com"));
/// ```
#[must_use]
pub fn is_valid_hostname(host: &str) -> bool {
    if host.is_empty() || host.len() > MAX_HOSTNAME_LEN {
        return false;
    }
    let host = host.strip_suffix('.').unwrap_or(host);
    !host.is_empty() && host.split('.').all(is_valid_label)
}

/// Whether `label` is a single valid DNS label.
fn is_valid_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(&first), Some(&last)) => {
            bytes.len() <= MAX_LABEL_LEN
                && first != b'-'
                && last != b'-'
                && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
        }
        _ => false,
    }
}

/// Whether `url` is usable as an endpoint URL.
///
/// The URL must carry a scheme and a host; the host (port stripped) must
/// pass [`is_valid_hostname`]. Any path component is ignored.
///
/// # Examples
///
/// ```
/// use s3prep_addressing::endpoint::is_valid_endpoint_url;
///
/// assert!(is_valid_endpoint_url("https://s3.amazonaws.com/"));
/// assert!(is_valid_endpoint_url("https://10.10.10.10:12345/"));
/// assert!(!is_valid_endpoint_url("foo.bar.com"));
/// ```
#[must_use]
pub fn is_valid_endpoint_url(url: &str) -> bool {
    let Ok(uri) = url.parse::<Uri>() else {
        return false;
    };
    if uri.scheme().is_none() {
        return false;
    }
    uri.host().is_some_and(is_valid_hostname)
}

/// Whether `endpoint` can serve as a virtual-host template.
///
/// The endpoint is a bare host with an optional `:port`. The host must pass
/// [`is_valid_hostname`] and must not end in a dot, since the bucket is
/// prefixed onto it.
///
/// # Examples
///
/// ```
/// use s3prep_addressing::endpoint::is_valid_endpoint_host;
///
/// assert!(is_valid_endpoint_host("s3.amazonaws.com"));
/// assert!(is_valid_endpoint_host("minio.local:9000"));
/// assert!(!is_valid_endpoint_host(""));
/// assert!(!is_valid_endpoint_host("https://s3.amazonaws.com"));
/// ```
#[must_use]
pub fn is_valid_endpoint_host(endpoint: &str) -> bool {
    let host = host_without_port(endpoint);
    !host.ends_with('.') && is_valid_hostname(host)
}

/// Whether `bucket` can be used verbatim as the leftmost label of a virtual
/// host.
///
/// Rules:
/// - 3-63 characters long
/// - only ASCII letters, digits, and hyphens (uppercase is accepted since DNS
///   is case-insensitive)
/// - starts and ends with a letter or digit
/// - no dots: a dotted bucket becomes several labels, which wildcard TLS
///   certificates do not cover
///
/// # Examples
///
/// ```
/// use s3prep_addressing::endpoint::is_dns_compatible_bucket;
///
/// assert!(is_dns_compatible_bucket("my-bucket"));
/// assert!(!is_dns_compatible_bucket("mybucket.foo"));
/// assert!(!is_dns_compatible_bucket("ab"));
/// ```
#[must_use]
pub fn is_dns_compatible_bucket(bucket: &str) -> bool {
    let bytes = bucket.as_bytes();
    if !(MIN_BUCKET_LABEL_LEN..=MAX_LABEL_LEN).contains(&bytes.len()) {
        return false;
    }
    let first = bytes[0];
    let last = bytes[bytes.len() - 1];
    first.is_ascii_alphanumeric()
        && last.is_ascii_alphanumeric()
        && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
}

/// Strip an optional `:port` suffix from a host.
pub(crate) fn host_without_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}
