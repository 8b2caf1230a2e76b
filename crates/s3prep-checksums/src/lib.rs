//! Streaming payload digests for S3 request preparation.
//!
//! Two digests are supported, both computed from a reader through a bounded
//! buffer so that arbitrarily large payloads hash in constant memory:
//!
//! - plain SHA-256, used for the `x-amz-content-sha256` header
//! - the 1 MiB tree hash, used for the `x-amz-sha256-tree-hash` header
//!
//! Blocking readers go through [`calculate_sha256`] and
//! [`calculate_tree_hash`]; tokio readers through the `_async` variants.
//! In-memory payloads can be tree-hashed on the rayon pool with
//! [`tree_hash_parallel`].

mod async_io;
mod error;
mod sha256;
mod stream;
mod tree_hash;

pub use async_io::{
    calculate_sha256_async, calculate_sha256_async_with_buffer, calculate_tree_hash_async,
    calculate_tree_hash_async_with_buffer,
};
pub use error::{ChecksumError, ParseDigestError};
pub use sha256::{Sha256Digest, Sha256Hasher, calculate_sha256, calculate_sha256_with_buffer};
pub use stream::{DEFAULT_READ_BUFFER_SIZE, PayloadHasher, hash_async_reader, hash_reader};
pub use tree_hash::{
    TREE_HASH_CHUNK_SIZE, TreeHasher, calculate_tree_hash, calculate_tree_hash_with_buffer,
    reduce_tree, tree_hash_parallel,
};
