//! Outbound request descriptors.
//!
//! A [`RequestDescriptor`] holds the parts of an HTTP request that address
//! preparation touches: method, scheme, host, path, query, headers, and the
//! signing path. Descriptors are built per call by the request builder and
//! handed to the signer once prepared.

use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method, Uri};

use crate::canonical::normalize_url_path;
use crate::error::AddressingError;
use crate::query::{parse_raw_query, percent_encode_pair, render_raw_query};

/// Describes an outbound request to an object-storage endpoint.
///
/// Query pairs are stored in their raw wire form (already percent-encoded),
/// so a descriptor parsed from a URL renders back to the same URL. A key
/// without `=` is stored with a `None` value and renders bare (`?location`),
/// while `?acl=` keeps its equals sign.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use s3prep_addressing::RequestDescriptor;
///
/// let req = RequestDescriptor::from_url(
///     Method::PUT,
///     "https://s3-us-west-2.amazonaws.com/bucket/key.txt",
/// )
/// .unwrap();
/// assert_eq!(req.host, "s3-us-west-2.amazonaws.com");
/// assert_eq!(req.path, "/bucket/key.txt");
/// assert_eq!(req.url(), "https://s3-us-west-2.amazonaws.com/bucket/key.txt");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// HTTP method.
    pub method: Method,
    /// URL scheme, e.g. `https`.
    pub scheme: String,
    /// Host, optionally with a `:port` suffix.
    pub host: String,
    /// Wire path.
    pub path: String,
    /// Raw query pairs in order.
    pub query: Vec<(String, Option<String>)>,
    /// Request headers.
    pub headers: HeaderMap,
    /// Path the signer must use when it differs from the wire path. Set once
    /// by address rewriting and never overwritten.
    pub signing_path: Option<String>,
}

impl RequestDescriptor {
    /// Create an `https` descriptor with no query, headers, or signing path.
    #[must_use]
    pub fn new(method: Method, host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method,
            scheme: "https".to_owned(),
            host: host.into(),
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            signing_path: None,
        }
    }

    /// Parse a descriptor from an absolute URL.
    ///
    /// The fragment, if any, is dropped.
    pub fn from_url(method: Method, url: &str) -> Result<Self, AddressingError> {
        let invalid = |reason: &str| AddressingError::InvalidUrl {
            url: url.to_owned(),
            reason: reason.to_owned(),
        };

        let uri: Uri = url.parse().map_err(|e: http::uri::InvalidUri| invalid(&e.to_string()))?;
        let scheme = uri.scheme_str().ok_or_else(|| invalid("missing scheme"))?;
        let authority = uri.authority().ok_or_else(|| invalid("missing host"))?;

        Ok(Self {
            method,
            scheme: scheme.to_owned(),
            host: authority.as_str().to_owned(),
            path: uri.path().to_owned(),
            query: uri.query().map(parse_raw_query).unwrap_or_default(),
            headers: HeaderMap::new(),
            signing_path: None,
        })
    }

    /// Set the URL scheme.
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Append a query parameter, percent-encoding the key and value.
    pub fn push_query_param(&mut self, key: &str, value: &str) {
        let encoded = percent_encode_pair(key, value);
        let (k, v) = encoded.split_once('=').unwrap_or((encoded.as_str(), ""));
        self.query.push((k.to_owned(), Some(v.to_owned())));
    }

    /// Whether the query contains `key` (compared in raw form).
    #[must_use]
    pub fn has_query_param(&self, key: &str) -> bool {
        self.query.iter().any(|(k, _)| k == key)
    }

    /// Render the raw query string (without the leading `?`).
    #[must_use]
    pub fn query_string(&self) -> String {
        render_raw_query(&self.query)
    }

    /// Render the full URL.
    #[must_use]
    pub fn url(&self) -> String {
        let path = if self.path.is_empty() { "/" } else { self.path.as_str() };
        let mut url = format!("{}://{}{}", self.scheme, self.host, path);
        if !self.query.is_empty() {
            url.push('?');
            url.push_str(&self.query_string());
        }
        url
    }

    /// The path the signer should use: the signing path if rewriting set
    /// one, else the wire path.
    #[must_use]
    pub fn effective_signing_path(&self) -> &str {
        self.signing_path.as_deref().unwrap_or(&self.path)
    }

    /// The bucket and key addressed by a path-style path, if any.
    #[must_use]
    pub fn bucket_address(&self) -> Option<BucketAddress> {
        BucketAddress::from_path(&self.path)
    }
}

/// A bucket and object key extracted from a path-style request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketAddress {
    /// First path segment.
    pub bucket: String,
    /// Everything after the bucket segment, possibly empty (bucket root).
    pub key: String,
}

impl BucketAddress {
    /// Split a path into bucket and key after normalizing it.
    ///
    /// Returns `None` when the path addresses the service root.
    ///
    /// # Examples
    ///
    /// ```
    /// use s3prep_addressing::BucketAddress;
    ///
    /// let addr = BucketAddress::from_path("/bucket/dir/key.txt").unwrap();
    /// assert_eq!(addr.bucket, "bucket");
    /// assert_eq!(addr.key, "dir/key.txt");
    /// assert!(BucketAddress::from_path("/").is_none());
    /// ```
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let normalized = normalize_url_path(path);
        let trimmed = normalized.strip_prefix('/').unwrap_or(&normalized);
        if trimmed.is_empty() {
            return None;
        }
        let (bucket, key) = trimmed.split_once('/').unwrap_or((trimmed, ""));
        Some(Self {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
        })
    }

    /// Path-style path used for signing; a bucket root keeps its trailing
    /// slash.
    #[must_use]
    pub fn signing_path(&self) -> String {
        format!("/{}/{}", self.bucket, self.key)
    }

    /// Wire path once the bucket has moved into the host.
    #[must_use]
    pub fn object_path(&self) -> String {
        format!("/{}", self.key)
    }

    /// Virtual host for this bucket under `endpoint`.
    #[must_use]
    pub fn virtual_host(&self, endpoint: &str) -> String {
        format!("{}.{}", self.bucket, endpoint)
    }
}
