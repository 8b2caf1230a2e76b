//! Request preparation pipeline.

use std::io::Read;

use http::{HeaderName, HeaderValue};
use s3prep_addressing::{
    AddressingError, RequestDescriptor, is_valid_endpoint_host, rewrite_to_known_endpoint,
    rewrite_to_virtual_host,
};
use s3prep_checksums::{
    Sha256Digest, calculate_sha256_async_with_buffer, calculate_sha256_with_buffer,
    calculate_tree_hash_async_with_buffer, calculate_tree_hash_with_buffer,
};
use s3prep_core::{AddressingStyle, PrepConfig};
use tokio::io::AsyncRead;
use tracing::debug;

use crate::error::PrepareError;

/// Header carrying the hex SHA-256 of the request body.
pub const CONTENT_SHA256_HEADER: HeaderName = HeaderName::from_static("x-amz-content-sha256");

/// Header carrying the hex tree hash of the request body.
pub const TREE_HASH_HEADER: HeaderName = HeaderName::from_static("x-amz-sha256-tree-hash");

/// Applies addressing and payload digests to requests according to one
/// [`PrepConfig`].
///
/// # Examples
///
/// ```
/// use http::Method;
/// use s3prep::{CONTENT_SHA256_HEADER, PrepConfig, RequestDescriptor, RequestPreparer};
///
/// let preparer = RequestPreparer::new(PrepConfig::default()).unwrap();
/// let req = RequestDescriptor::from_url(Method::PUT, "https://s3.amazonaws.com/bucket/key")
///     .unwrap();
/// let prepared = preparer.prepare(&req, &b"hello world"[..]).unwrap();
///
/// assert_eq!(prepared.url(), "https://bucket.s3.amazonaws.com/key");
/// assert_eq!(
///     prepared.headers[CONTENT_SHA256_HEADER],
///     "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct RequestPreparer {
    config: PrepConfig,
}

impl RequestPreparer {
    /// Create a preparer after validating `config`.
    ///
    /// An endpoint override must be a bare host with an optional port.
    pub fn new(config: PrepConfig) -> Result<Self, PrepareError> {
        config.validate()?;
        if let Some(endpoint) = config.endpoint_override.as_deref() {
            if !is_valid_endpoint_host(endpoint) {
                return Err(AddressingError::InvalidEndpoint {
                    endpoint: endpoint.to_owned(),
                }
                .into());
            }
        }
        Ok(Self { config })
    }

    /// Create a preparer from environment variables.
    pub fn from_env() -> Result<Self, PrepareError> {
        Self::new(PrepConfig::from_env()?)
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &PrepConfig {
        &self.config
    }

    /// Rewrite `request` according to the configured addressing style.
    ///
    /// A bucket that cannot be a DNS label keeps path-style addressing and
    /// the request is returned unchanged. A request whose own host cannot
    /// serve as a template is an error.
    pub fn apply_addressing(
        &self,
        request: &RequestDescriptor,
    ) -> Result<RequestDescriptor, PrepareError> {
        let config = &self.config;
        let endpoint = config.endpoint_override.as_deref();
        let rewritten = match config.addressing_style {
            AddressingStyle::Auto => rewrite_to_known_endpoint(
                request,
                config.signature_scheme,
                &config.region,
                endpoint,
            ),
            AddressingStyle::Virtual => rewrite_to_virtual_host(
                request,
                config.signature_scheme,
                &config.region,
                endpoint,
            ),
            AddressingStyle::Path => return Ok(request.clone()),
        };

        match rewritten {
            Ok(rewritten) => Ok(rewritten),
            Err(AddressingError::InvalidDnsName { bucket }) => {
                debug!(%bucket, "Bucket is not DNS compatible, using path-style addressing");
                Ok(request.clone())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Hash `body` and set the `x-amz-content-sha256` header.
    pub fn attach_content_sha256<R: Read>(
        &self,
        request: &mut RequestDescriptor,
        body: R,
    ) -> Result<Sha256Digest, PrepareError> {
        let digest = calculate_sha256_with_buffer(body, self.config.read_buffer_size)?;
        set_digest_header(request, CONTENT_SHA256_HEADER, &digest)?;
        Ok(digest)
    }

    /// Tree-hash `body` and set the `x-amz-sha256-tree-hash` header.
    pub fn attach_tree_hash<R: Read>(
        &self,
        request: &mut RequestDescriptor,
        body: R,
    ) -> Result<Sha256Digest, PrepareError> {
        let digest = calculate_tree_hash_with_buffer(body, self.config.read_buffer_size)?;
        set_digest_header(request, TREE_HASH_HEADER, &digest)?;
        Ok(digest)
    }

    /// Async counterpart of [`attach_content_sha256`](Self::attach_content_sha256).
    pub async fn attach_content_sha256_async<R: AsyncRead + Unpin>(
        &self,
        request: &mut RequestDescriptor,
        body: R,
    ) -> Result<Sha256Digest, PrepareError> {
        let digest = calculate_sha256_async_with_buffer(body, self.config.read_buffer_size).await?;
        set_digest_header(request, CONTENT_SHA256_HEADER, &digest)?;
        Ok(digest)
    }

    /// Async counterpart of [`attach_tree_hash`](Self::attach_tree_hash).
    pub async fn attach_tree_hash_async<R: AsyncRead + Unpin>(
        &self,
        request: &mut RequestDescriptor,
        body: R,
    ) -> Result<Sha256Digest, PrepareError> {
        let digest =
            calculate_tree_hash_async_with_buffer(body, self.config.read_buffer_size).await?;
        set_digest_header(request, TREE_HASH_HEADER, &digest)?;
        Ok(digest)
    }

    /// Apply addressing, then attach the content SHA-256 of `body`.
    pub fn prepare<R: Read>(
        &self,
        request: &RequestDescriptor,
        body: R,
    ) -> Result<RequestDescriptor, PrepareError> {
        let mut prepared = self.apply_addressing(request)?;
        self.attach_content_sha256(&mut prepared, body)?;
        debug!(
            url = %prepared.url(),
            signing_path = %prepared.effective_signing_path(),
            "Prepared request"
        );
        Ok(prepared)
    }

    /// Async counterpart of [`prepare`](Self::prepare).
    pub async fn prepare_async<R: AsyncRead + Unpin>(
        &self,
        request: &RequestDescriptor,
        body: R,
    ) -> Result<RequestDescriptor, PrepareError> {
        let mut prepared = self.apply_addressing(request)?;
        self.attach_content_sha256_async(&mut prepared, body).await?;
        Ok(prepared)
    }
}

fn set_digest_header(
    request: &mut RequestDescriptor,
    name: HeaderName,
    digest: &Sha256Digest,
) -> Result<(), PrepareError> {
    let value = HeaderValue::from_str(&digest.to_hex())?;
    request.headers.insert(name, value);
    Ok(())
}
