//! Core types, configuration, and errors for S3 request preparation.
//!
//! This crate holds the building blocks shared by the addressing and checksum
//! crates: the region and signature-scheme types that select rewrite behavior,
//! and the [`PrepConfig`] that callers load once and pass by value.

mod config;
mod error;
mod types;

pub use config::PrepConfig;
pub use error::{S3PrepError, S3PrepResult};
pub use types::{AddressingStyle, AwsRegion, SignatureScheme};
