//! Error types for request addressing.

/// Errors that can occur while parsing or rewriting a request's address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressingError {
    /// The bucket cannot be used as a DNS label, so virtual-host addressing
    /// would produce a malformed hostname. Callers fall back to path style.
    #[error("bucket name is not DNS compatible: {bucket}")]
    InvalidDnsName {
        /// The offending bucket name.
        bucket: String,
    },

    /// The host template the bucket would be prefixed onto is empty or not a
    /// valid hostname.
    #[error("invalid endpoint host: {endpoint:?}")]
    InvalidEndpoint {
        /// The rejected template.
        endpoint: String,
    },

    /// The URL could not be parsed into a request descriptor.
    #[error("invalid request URL {url:?}: {reason}")]
    InvalidUrl {
        /// The URL as supplied.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}
