//! End-to-end tests for the s3prep workspace.
//!
//! These tests exercise the crates together the way a client would: payloads
//! written to real files, hashed through blocking and async readers, and
//! requests prepared from configuration.
//!
//! Set `RUST_LOG=debug` to see rewrite decisions.

use std::io::Write;
use std::sync::Once;

use s3prep::{PrepConfig, RequestPreparer};
use tempfile::NamedTempFile;

static INIT: Once = Once::new();

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Create a preparer for `config` with tracing enabled.
pub fn preparer(config: PrepConfig) -> anyhow::Result<RequestPreparer> {
    init_tracing();
    Ok(RequestPreparer::new(config)?)
}

/// Write `len` copies of `byte` to a fresh temporary file.
pub fn payload_file(len: usize, byte: u8) -> anyhow::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    let block = vec![byte; 64 * 1024];
    let mut remaining = len;
    while remaining > 0 {
        let n = remaining.min(block.len());
        file.write_all(&block[..n])?;
        remaining -= n;
    }
    file.flush()?;
    Ok(file)
}

mod test_hashing;
mod test_prepare;
