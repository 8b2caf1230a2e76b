//! Request preparation configuration.
//!
//! Provides [`PrepConfig`], passed by value into the preparer. Values can be
//! loaded from environment variables via [`PrepConfig::from_env`].

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::{AddressingStyle, AwsRegion, S3PrepError, S3PrepResult, SignatureScheme};

/// Default read buffer used when hashing request bodies (1 MiB).
const DEFAULT_READ_BUFFER_SIZE: usize = 1024 * 1024;

/// Configuration for preparing S3 requests.
///
/// # Examples
///
/// ```
/// use s3prep_core::{AddressingStyle, PrepConfig, SignatureScheme};
///
/// let config = PrepConfig::default();
/// assert_eq!(config.signature_scheme, SignatureScheme::Legacy);
/// assert_eq!(config.addressing_style, AddressingStyle::Auto);
/// assert!(config.endpoint_override.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct PrepConfig {
    /// Region the request is destined for.
    #[builder(default)]
    pub region: AwsRegion,

    /// Signing scheme the request will be signed with.
    #[builder(default)]
    pub signature_scheme: SignatureScheme,

    /// Bucket addressing style.
    #[builder(default)]
    pub addressing_style: AddressingStyle,

    /// Endpoint used as the virtual-host template instead of the request host.
    #[builder(default, setter(strip_option, into))]
    pub endpoint_override: Option<String>,

    /// Read buffer size (in bytes) used when hashing request bodies.
    #[builder(default = DEFAULT_READ_BUFFER_SIZE)]
    pub read_buffer_size: usize,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            region: AwsRegion::default(),
            signature_scheme: SignatureScheme::default(),
            addressing_style: AddressingStyle::default(),
            endpoint_override: None,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl PrepConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `DEFAULT_REGION` | `us-east-1` |
    /// | `S3_SIGNATURE_VERSION` | `s3` |
    /// | `S3_ADDRESSING_STYLE` | `auto` |
    /// | `S3_ENDPOINT_OVERRIDE` | *(unset)* |
    /// | `S3_READ_BUFFER_SIZE` | `1048576` |
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value that cannot be parsed.
    pub fn from_env() -> S3PrepResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use s3prep_core::{PrepConfig, SignatureScheme};
    ///
    /// let config = PrepConfig::from_lookup(|key| match key {
    ///     "S3_SIGNATURE_VERSION" => Some("s3v4".to_owned()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.signature_scheme, SignatureScheme::V4);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> S3PrepResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("DEFAULT_REGION") {
            config.region = AwsRegion::new(v);
        }
        if let Some(v) = lookup("S3_SIGNATURE_VERSION") {
            config.signature_scheme = v.parse()?;
        }
        if let Some(v) = lookup("S3_ADDRESSING_STYLE") {
            config.addressing_style = v.parse()?;
        }
        if let Some(v) = lookup("S3_ENDPOINT_OVERRIDE") {
            if !v.is_empty() {
                config.endpoint_override = Some(v);
            }
        }
        if let Some(v) = lookup("S3_READ_BUFFER_SIZE") {
            config.read_buffer_size = v.parse::<usize>().map_err(|e| {
                S3PrepError::Config(format!("invalid S3_READ_BUFFER_SIZE {v:?}: {e}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check invariants that the builder cannot express.
    ///
    /// Only emptiness of the endpoint override is checked here; hostname
    /// syntax is checked where the override is applied.
    pub fn validate(&self) -> S3PrepResult<()> {
        if self.read_buffer_size == 0 {
            return Err(S3PrepError::Config(
                "read buffer size must be greater than zero".to_owned(),
            ));
        }
        if self
            .endpoint_override
            .as_deref()
            .is_some_and(|endpoint| endpoint.trim().is_empty())
        {
            return Err(S3PrepError::Config(
                "endpoint override must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}
