//! Common type definitions shared across the s3prep crates.

use std::fmt;
use std::str::FromStr;

use crate::S3PrepError;

/// Regions where the legacy global endpoint must not be substituted.
const RESTRICTED_REGIONS: &[&str] = &["us-gov-west-1", "fips-us-gov-west-1"];

/// AWS Region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AwsRegion(String);

impl AwsRegion {
    /// Default region.
    pub const DEFAULT: &str = "us-east-1";

    /// Create a new region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether requests in this region must keep their regional endpoint.
    ///
    /// # Examples
    ///
    /// ```
    /// use s3prep_core::AwsRegion;
    ///
    /// assert!(AwsRegion::new("us-gov-west-1").is_restricted());
    /// assert!(!AwsRegion::new("us-west-2").is_restricted());
    /// ```
    #[must_use]
    pub fn is_restricted(&self) -> bool {
        RESTRICTED_REGIONS.contains(&self.0.as_str())
    }
}

impl Default for AwsRegion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request signing scheme the prepared request is destined for.
///
/// Only the distinction between the legacy scheme and SigV4 matters for
/// request preparation, so every SigV4 flavor maps to [`SignatureScheme::V4`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum SignatureScheme {
    /// Legacy `s3` (SigV2-style) signing.
    #[default]
    #[serde(rename = "s3", alias = "legacy")]
    Legacy,
    /// `s3v4` signing, including its query-string variant.
    #[serde(rename = "s3v4", alias = "v4")]
    V4,
}

impl SignatureScheme {
    /// Return the signature version tag.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "s3",
            Self::V4 => "s3v4",
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureScheme {
    type Err = S3PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "s3" | "s3-query" | "v2" => Ok(Self::Legacy),
            "v4" => Ok(Self::V4),
            other if other.starts_with("s3v4") => Ok(Self::V4),
            _ => Err(S3PrepError::UnknownSignatureScheme(s.to_owned())),
        }
    }
}

/// How the preparer should address buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressingStyle {
    /// Rewrite to virtual-host style only for recognized S3 endpoints.
    #[default]
    Auto,
    /// Always move the bucket into the hostname.
    Virtual,
    /// Leave the bucket in the path.
    Path,
}

impl AddressingStyle {
    /// Return the lowercase name of the style.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Virtual => "virtual",
            Self::Path => "path",
        }
    }
}

impl fmt::Display for AddressingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressingStyle {
    type Err = S3PrepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "virtual" => Ok(Self::Virtual),
            "path" => Ok(Self::Path),
            _ => Err(S3PrepError::UnknownAddressingStyle(s.to_owned())),
        }
    }
}
