//! Buffered read loops shared by every payload hasher.

use std::io::{ErrorKind, Read};

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::ChecksumError;
use crate::sha256::Sha256Digest;

/// Default read buffer size (1 MiB).
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1024 * 1024;

/// An incremental hasher that consumes a payload in arbitrary slices.
///
/// The digest depends only on the concatenation of all slices, never on how
/// the payload was split.
pub trait PayloadHasher {
    /// Feed the next slice of the payload.
    fn update(&mut self, data: &[u8]);

    /// Consume the hasher and produce the digest.
    fn finish(self) -> Sha256Digest;
}

/// Drain `reader` into `hasher` through a `buffer_size`-byte buffer.
///
/// Short reads are accepted and interrupted reads are retried. Any other I/O
/// error aborts hashing.
pub fn hash_reader<H, R>(
    mut hasher: H,
    mut reader: R,
    buffer_size: usize,
) -> Result<Sha256Digest, ChecksumError>
where
    H: PayloadHasher,
    R: Read,
{
    if buffer_size == 0 {
        return Err(ChecksumError::InvalidBufferSize);
    }
    let mut buf = vec![0u8; buffer_size];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buf[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(hasher.finish())
}

/// Async counterpart of [`hash_reader`].
pub async fn hash_async_reader<H, R>(
    mut hasher: H,
    mut reader: R,
    buffer_size: usize,
) -> Result<Sha256Digest, ChecksumError>
where
    H: PayloadHasher,
    R: AsyncRead + Unpin,
{
    if buffer_size == 0 {
        return Err(ChecksumError::InvalidBufferSize);
    }
    let mut buf = vec![0u8; buffer_size];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => hasher.update(&buf[..n]),
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(hasher.finish())
}
