//! Prepare S3 requests for signing.
//!
//! [`RequestPreparer`] ties the workspace together: it moves the bucket of a
//! path-style request into the hostname where that is safe, records the
//! path the signer must use, and attaches payload digests as headers.
//!
//! The lower-level crates remain usable on their own:
//!
//! - [`s3prep_core`] - Region, signature scheme, and [`PrepConfig`]
//! - [`s3prep_addressing`] - Path canonicalization and address rewriting
//! - [`s3prep_checksums`] - Streaming SHA-256 and tree hash

mod error;
mod preparer;

pub use error::PrepareError;
pub use preparer::{CONTENT_SHA256_HEADER, RequestPreparer, TREE_HASH_HEADER};
pub use s3prep_addressing::{BucketAddress, RequestDescriptor};
pub use s3prep_checksums::Sha256Digest;
pub use s3prep_core::{AddressingStyle, AwsRegion, PrepConfig, SignatureScheme};
