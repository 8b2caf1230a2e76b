//! Error types for payload hashing.

/// Errors that can occur while hashing a payload stream.
#[derive(Debug, thiserror::Error)]
pub enum ChecksumError {
    /// The underlying reader failed. The partial digest is discarded.
    #[error("failed to read payload stream: {0}")]
    Read(#[from] std::io::Error),

    /// A zero-sized read buffer can never make progress.
    #[error("read buffer size must be greater than zero")]
    InvalidBufferSize,
}

/// Error returned when parsing a [`Sha256Digest`](crate::Sha256Digest) from
/// hex fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid SHA-256 hex digest: {0}")]
pub struct ParseDigestError(pub(crate) String);
