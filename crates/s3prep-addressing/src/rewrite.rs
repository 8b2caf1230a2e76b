//! Virtual-host address rewriting.
//!
//! Moves the bucket from the first path segment into the hostname:
//!
//! ```text
//! https://s3-us-west-2.amazonaws.com/bucket/key.txt
//!   -> https://bucket.s3.amazonaws.com/key.txt   (signing path /bucket/key.txt)
//! ```
//!
//! Rewrites are immutable transforms: they take a descriptor and return the
//! rewritten copy. A descriptor whose `signing_path` is already set has been
//! rewritten before and comes back unchanged, so running a descriptor
//! through the rewriter again on retry or re-signing is safe.
//!
//! Two entry points share one routine and differ only in the host template:
//!
//! - [`rewrite_to_known_endpoint`] only touches hosts that are recognized S3
//!   endpoints and substitutes the canonical endpoint for the scheme.
//! - [`rewrite_to_virtual_host`] prefixes whatever host (or override) the
//!   caller gives.

use s3prep_core::{AwsRegion, SignatureScheme};
use tracing::debug;

use crate::endpoint::{
    host_without_port, is_dns_compatible_bucket, is_valid_endpoint_host, is_valid_hostname,
};
use crate::error::AddressingError;
use crate::request::RequestDescriptor;

/// Global S3 endpoint used by legacy signing.
pub const GLOBAL_ENDPOINT: &str = "s3.amazonaws.com";

/// Base domain of the public S3 endpoints.
const AWS_DOMAIN: &str = "amazonaws.com";

/// Query key that marks a GetBucketLocation request.
const LOCATION_QUERY_KEY: &str = "location";

/// Rewrite a request against a recognized S3 endpoint to virtual-host style.
///
/// Leaves the request unchanged when the region is restricted or the host
/// is not one of `s3.amazonaws.com`, `s3-external-1.amazonaws.com`,
/// `s3-<region>.amazonaws.com`, or `s3.<region>.amazonaws.com`.
///
/// The host template depends on the scheme: legacy signing uses
/// `default_endpoint` (or [`GLOBAL_ENDPOINT`]); SigV4 scopes signatures to a
/// region, so it always uses the regional endpoint and ignores the override.
///
/// # Errors
///
/// Returns [`AddressingError::InvalidDnsName`] when the bucket cannot be a DNS
/// label. The caller keeps path-style addressing in that case.
///
/// Returns [`AddressingError::InvalidEndpoint`] when a legacy override is
/// not a valid hostname.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use s3prep_addressing::{RequestDescriptor, rewrite_to_known_endpoint};
/// use s3prep_core::{AwsRegion, SignatureScheme};
///
/// let req = RequestDescriptor::from_url(
///     Method::PUT,
///     "https://s3-us-west-2.amazonaws.com/bucket/key.txt",
/// )
/// .unwrap();
/// let rewritten = rewrite_to_known_endpoint(
///     &req,
///     SignatureScheme::Legacy,
///     &AwsRegion::new("us-west-2"),
///     None,
/// )
/// .unwrap();
/// assert_eq!(rewritten.url(), "https://bucket.s3.amazonaws.com/key.txt");
/// assert_eq!(rewritten.signing_path.as_deref(), Some("/bucket/key.txt"));
/// ```
pub fn rewrite_to_known_endpoint(
    request: &RequestDescriptor,
    scheme: SignatureScheme,
    region: &AwsRegion,
    default_endpoint: Option<&str>,
) -> Result<RequestDescriptor, AddressingError> {
    if region.is_restricted() {
        debug!(%region, "Region is restricted, keeping path-style addressing");
        return Ok(request.clone());
    }
    if !is_known_endpoint(&request.host, region) {
        debug!(host = %request.host, %region, "Host is not a known S3 endpoint, keeping it");
        return Ok(request.clone());
    }

    let template = match scheme {
        SignatureScheme::Legacy => default_endpoint.unwrap_or(GLOBAL_ENDPOINT).to_owned(),
        SignatureScheme::V4 => regional_endpoint(region),
    };
    rewrite_with_template(request, &template)
}

/// Rewrite a request to virtual-host style under its own host or an
/// override.
///
/// The bucket becomes a subdomain of `default_endpoint` when given, else of
/// the request's current host (port included). The override applies to both
/// signing schemes.
///
/// The path is normalized before the bucket is split off, so dot segments
/// and repeated slashes in the key are resolved: `/bucket/a//b/../c` is
/// sent as `/a/c` with signing path `/bucket/a/c`. Keys that rely on a
/// literal `//` or `..` must be sent path-style.
///
/// # Errors
///
/// Returns [`AddressingError::InvalidDnsName`] when the bucket cannot be a DNS
/// label. The caller keeps path-style addressing in that case.
///
/// Returns [`AddressingError::InvalidEndpoint`] when the template host is
/// empty or not a valid hostname.
///
/// # Examples
///
/// ```
/// use http::Method;
/// use s3prep_addressing::{AddressingError, RequestDescriptor, rewrite_to_virtual_host};
/// use s3prep_core::{AwsRegion, SignatureScheme};
///
/// let region = AwsRegion::new("us-west-2");
/// let req = RequestDescriptor::from_url(Method::PUT, "https://foo.amazonaws.com/bucket/key.txt")
///     .unwrap();
/// let rewritten = rewrite_to_virtual_host(&req, SignatureScheme::Legacy, &region, None).unwrap();
/// assert_eq!(rewritten.url(), "https://bucket.foo.amazonaws.com/key.txt");
///
/// let dotted = RequestDescriptor::from_url(Method::PUT, "https://foo.amazonaws.com/my.bucket/k")
///     .unwrap();
/// assert!(matches!(
///     rewrite_to_virtual_host(&dotted, SignatureScheme::Legacy, &region, None),
///     Err(AddressingError::InvalidDnsName { .. })
/// ));
/// ```
pub fn rewrite_to_virtual_host(
    request: &RequestDescriptor,
    scheme: SignatureScheme,
    region: &AwsRegion,
    default_endpoint: Option<&str>,
) -> Result<RequestDescriptor, AddressingError> {
    let template = default_endpoint.unwrap_or(&request.host).to_owned();
    debug!(%scheme, %region, template = %template, "Rewriting to virtual-host style");
    rewrite_with_template(request, &template)
}

/// Shared rewrite routine.
fn rewrite_with_template(
    request: &RequestDescriptor,
    template: &str,
) -> Result<RequestDescriptor, AddressingError> {
    if request.has_query_param(LOCATION_QUERY_KEY) {
        debug!(path = %request.path, "GetBucketLocation keeps path-style addressing");
        return Ok(request.clone());
    }
    if let Some(signing_path) = &request.signing_path {
        debug!(signing_path = %signing_path, "Request already rewritten");
        return Ok(request.clone());
    }
    let Some(address) = request.bucket_address() else {
        debug!(method = %request.method, "Service-root request keeps path-style addressing");
        return Ok(request.clone());
    };

    if !is_valid_endpoint_host(template) {
        return Err(AddressingError::InvalidEndpoint {
            endpoint: template.to_owned(),
        });
    }

    let host = address.virtual_host(template);
    if !is_dns_compatible_bucket(&address.bucket) || !is_valid_hostname(host_without_port(&host))
    {
        return Err(AddressingError::InvalidDnsName {
            bucket: address.bucket,
        });
    }

    let mut rewritten = request.clone();
    rewritten.signing_path = Some(address.signing_path());
    rewritten.path = address.object_path();
    rewritten.host = host;
    debug!(
        host = %rewritten.host,
        path = %rewritten.path,
        signing_path = %address.signing_path(),
        "Switched to virtual-host style"
    );
    Ok(rewritten)
}

/// Whether `host` is one of the public S3 endpoints for `region`.
fn is_known_endpoint(host: &str, region: &AwsRegion) -> bool {
    let host = host.to_ascii_lowercase();
    let region = region.as_str();
    let Some(label) = host.strip_suffix(AWS_DOMAIN).and_then(|h| h.strip_suffix('.')) else {
        return false;
    };
    label == "s3"
        || label == "s3-external-1"
        || label.strip_prefix("s3-") == Some(region)
        || label.strip_prefix("s3.") == Some(region)
}

/// Regional endpoint used by SigV4.
fn regional_endpoint(region: &AwsRegion) -> String {
    if region.as_str() == AwsRegion::DEFAULT {
        GLOBAL_ENDPOINT.to_owned()
    } else {
        format!("s3.{region}.{AWS_DOMAIN}")
    }
}
