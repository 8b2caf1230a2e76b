//! Glacier-style SHA-256 tree hash.
//!
//! The payload is split into 1 MiB chunks. Each chunk is hashed, then
//! adjacent digests are paired and hashed together level by level until a
//! single root remains. An unpaired trailing digest is carried up unchanged.
//! An empty payload hashes to SHA-256 of the empty string.

use std::io::Read;
use std::mem;

use digest::Digest;
use rayon::prelude::*;
use sha2::Sha256;

use crate::error::ChecksumError;
use crate::sha256::Sha256Digest;
use crate::stream::{DEFAULT_READ_BUFFER_SIZE, PayloadHasher, hash_reader};

/// Size of one tree-hash leaf (1 MiB).
pub const TREE_HASH_CHUNK_SIZE: usize = 1024 * 1024;

/// Incremental tree hasher.
///
/// Leaves are cut on exact 1 MiB boundaries of the payload regardless of
/// how the caller slices its input.
#[derive(Debug, Clone, Default)]
pub struct TreeHasher {
    current: Sha256,
    current_len: usize,
    leaves: Vec<Sha256Digest>,
}

impl TreeHasher {
    /// Create an empty tree hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of complete leaves hashed so far.
    #[must_use]
    pub fn completed_leaves(&self) -> usize {
        self.leaves.len()
    }

    fn close_leaf(&mut self) {
        let hasher = mem::take(&mut self.current);
        self.leaves.push(Sha256Digest::from_hasher(hasher));
        self.current_len = 0;
    }
}

impl PayloadHasher for TreeHasher {
    fn update(&mut self, mut data: &[u8]) {
        while !data.is_empty() {
            let take = (TREE_HASH_CHUNK_SIZE - self.current_len).min(data.len());
            let (head, rest) = data.split_at(take);
            Digest::update(&mut self.current, head);
            self.current_len += take;
            data = rest;
            if self.current_len == TREE_HASH_CHUNK_SIZE {
                self.close_leaf();
            }
        }
    }

    fn finish(mut self) -> Sha256Digest {
        // A partial tail is a leaf; so is the empty payload.
        if self.current_len > 0 || self.leaves.is_empty() {
            self.close_leaf();
        }
        reduce_tree(self.leaves)
    }
}

/// Reduce leaf digests to the tree root.
///
/// Each level is rewritten in place over the same buffer. An empty input
/// yields SHA-256 of the empty string.
#[must_use]
pub fn reduce_tree(mut level: Vec<Sha256Digest>) -> Sha256Digest {
    let mut len = level.len();
    if len == 0 {
        return Sha256Digest::of(&[]);
    }
    while len > 1 {
        let mut write = 0;
        for read in (0..len).step_by(2) {
            level[write] = if read + 1 < len {
                Sha256Digest::combine(&level[read], &level[read + 1])
            } else {
                level[read]
            };
            write += 1;
        }
        len = write;
    }
    level[0]
}

/// Compute the tree hash of a reader using a 1 MiB read buffer.
///
/// # Examples
///
/// ```
/// use s3prep_checksums::calculate_tree_hash;
///
/// let digest = calculate_tree_hash(&[b'a'; 1024][..]).unwrap();
/// assert_eq!(
///     digest.to_hex(),
///     "2edc986847e209b4016e141a6dc8716d3207350f416969382d431539bf292e4a"
/// );
/// ```
pub fn calculate_tree_hash<R: Read>(reader: R) -> Result<Sha256Digest, ChecksumError> {
    calculate_tree_hash_with_buffer(reader, DEFAULT_READ_BUFFER_SIZE)
}

/// Compute the tree hash of a reader using a `buffer_size`-byte read buffer.
pub fn calculate_tree_hash_with_buffer<R: Read>(
    reader: R,
    buffer_size: usize,
) -> Result<Sha256Digest, ChecksumError> {
    hash_reader(TreeHasher::new(), reader, buffer_size)
}

/// Tree hash of an in-memory payload, hashing leaves in parallel.
///
/// Produces the same digest as [`calculate_tree_hash`].
#[must_use]
pub fn tree_hash_parallel(data: &[u8]) -> Sha256Digest {
    let leaves: Vec<Sha256Digest> = data
        .par_chunks(TREE_HASH_CHUNK_SIZE)
        .map(Sha256Digest::of)
        .collect();
    reduce_tree(leaves)
}
