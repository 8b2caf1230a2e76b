//! Path canonicalization and virtual-host address rewriting for S3 requests.
//!
//! Before a request to an object-storage endpoint is signed, its path must
//! be in canonical form and, where possible, its bucket should move from the
//! path into the hostname. This crate does both without touching the
//! network:
//!
//! ```rust
//! use http::Method;
//! use s3prep_addressing::{RequestDescriptor, rewrite_to_virtual_host};
//! use s3prep_core::{AwsRegion, SignatureScheme};
//!
//! let req = RequestDescriptor::from_url(Method::GET, "https://minio.local/photos/cat.jpg")
//!     .unwrap();
//! let req = rewrite_to_virtual_host(&req, SignatureScheme::V4, &AwsRegion::default(), None)
//!     .unwrap();
//! assert_eq!(req.url(), "https://photos.minio.local/cat.jpg");
//! assert_eq!(req.effective_signing_path(), "/photos/cat.jpg");
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Dot-segment removal and path normalization
//! - [`endpoint`] - Hostname, bucket label, and endpoint URL validation
//! - [`error`] - Addressing error types
//! - [`query`] - Query string percent-encoding
//! - [`request`] - The request descriptor and bucket address types
//! - [`rewrite`] - Virtual-host rewriting

pub mod canonical;
pub mod endpoint;
pub mod error;
pub mod query;
pub mod request;
pub mod rewrite;

pub use canonical::{normalize_url_path, remove_dot_segments};
pub use endpoint::{
    is_dns_compatible_bucket, is_valid_endpoint_host, is_valid_endpoint_url, is_valid_hostname,
};
pub use error::AddressingError;
pub use query::percent_encode_sequence;
pub use request::{BucketAddress, RequestDescriptor};
pub use rewrite::{rewrite_to_known_endpoint, rewrite_to_virtual_host};
