//! Hashing for async payload sources.

use tokio::io::AsyncRead;

use crate::error::ChecksumError;
use crate::sha256::{Sha256Digest, Sha256Hasher};
use crate::stream::{DEFAULT_READ_BUFFER_SIZE, hash_async_reader};
use crate::tree_hash::TreeHasher;

/// Compute the SHA-256 of an async reader using a 1 MiB read buffer.
pub async fn calculate_sha256_async<R>(reader: R) -> Result<Sha256Digest, ChecksumError>
where
    R: AsyncRead + Unpin,
{
    calculate_sha256_async_with_buffer(reader, DEFAULT_READ_BUFFER_SIZE).await
}

/// Compute the SHA-256 of an async reader using a `buffer_size`-byte buffer.
pub async fn calculate_sha256_async_with_buffer<R>(
    reader: R,
    buffer_size: usize,
) -> Result<Sha256Digest, ChecksumError>
where
    R: AsyncRead + Unpin,
{
    hash_async_reader(Sha256Hasher::new(), reader, buffer_size).await
}

/// Compute the tree hash of an async reader using a 1 MiB read buffer.
pub async fn calculate_tree_hash_async<R>(reader: R) -> Result<Sha256Digest, ChecksumError>
where
    R: AsyncRead + Unpin,
{
    calculate_tree_hash_async_with_buffer(reader, DEFAULT_READ_BUFFER_SIZE).await
}

/// Compute the tree hash of an async reader using a `buffer_size`-byte buffer.
pub async fn calculate_tree_hash_async_with_buffer<R>(
    reader: R,
    buffer_size: usize,
) -> Result<Sha256Digest, ChecksumError>
where
    R: AsyncRead + Unpin,
{
    hash_async_reader(TreeHasher::new(), reader, buffer_size).await
}
