//! Facade error type.

use s3prep_addressing::AddressingError;
use s3prep_checksums::ChecksumError;
use s3prep_core::S3PrepError;

/// Errors returned by [`RequestPreparer`](crate::RequestPreparer).
#[derive(Debug, thiserror::Error)]
pub enum PrepareError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] S3PrepError),

    /// Address rewriting failed for a reason other than a non-DNS bucket.
    #[error(transparent)]
    Addressing(#[from] AddressingError),

    /// Hashing the request body failed.
    #[error(transparent)]
    Checksum(#[from] ChecksumError),

    /// A digest could not be stored as a header value.
    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
}
