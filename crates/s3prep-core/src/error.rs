//! Error types for the s3prep core.

/// Core error type for configuration and type parsing.
#[derive(Debug, thiserror::Error)]
pub enum S3PrepError {
    /// The signature version tag is not one we know how to prepare for.
    #[error("unknown signature version: {0} (expected `s3` or `s3v4`)")]
    UnknownSignatureScheme(String),

    /// The addressing style is not one of `auto`, `virtual`, or `path`.
    #[error("unknown addressing style: {0} (expected `auto`, `virtual`, or `path`)")]
    UnknownAddressingStyle(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for s3prep core operations.
pub type S3PrepResult<T> = Result<T, S3PrepError>;
