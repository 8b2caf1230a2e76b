//! SHA-256 digests of request payloads.
//!
//! [`calculate_sha256`] hashes a reader of any length with a fixed-size
//! buffer. The result is a [`Sha256Digest`], which callers render either as
//! lowercase hex (for `x-amz-content-sha256`) or as raw bytes.

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use digest::Digest;
use sha2::Sha256;

use crate::error::{ChecksumError, ParseDigestError};
use crate::stream::{DEFAULT_READ_BUFFER_SIZE, PayloadHasher, hash_reader};

/// A 32-byte SHA-256 digest.
///
/// # Examples
///
/// ```
/// use s3prep_checksums::Sha256Digest;
///
/// let digest = Sha256Digest::of(b"");
/// assert_eq!(
///     digest.to_hex(),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// assert_eq!(digest.as_bytes().len(), 32);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Digest([u8; Self::LEN]);

impl Sha256Digest {
    /// Digest length in bytes.
    pub const LEN: usize = 32;

    /// Wrap raw digest bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    /// Hash an in-memory buffer.
    #[must_use]
    pub fn of(data: &[u8]) -> Self {
        Self::from_hasher(Sha256::new_with_prefix(data))
    }

    /// Hash the concatenation of two digests.
    #[must_use]
    pub fn combine(left: &Self, right: &Self) -> Self {
        let mut hasher = Sha256::new();
        Digest::update(&mut hasher, left.0);
        Digest::update(&mut hasher, right.0);
        Self::from_hasher(hasher)
    }

    /// Raw digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Consume into raw digest bytes.
    #[must_use]
    pub fn into_bytes(self) -> [u8; Self::LEN] {
        self.0
    }

    /// Lowercase hex encoding.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub(crate) fn from_hasher(hasher: Sha256) -> Self {
        let output = hasher.finalize();
        let mut bytes = [0u8; Self::LEN];
        bytes.copy_from_slice(output.as_slice());
        Self(bytes)
    }
}

impl AsRef<[u8]> for Sha256Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha256Digest({})", self.to_hex())
    }
}

impl FromStr for Sha256Digest {
    type Err = ParseDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; Self::LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| ParseDigestError(s.to_owned()))?;
        Ok(Self(bytes))
    }
}

/// Incremental SHA-256 over a payload.
#[derive(Debug, Clone, Default)]
pub struct Sha256Hasher {
    inner: Sha256,
    len: u64,
}

impl Sha256Hasher {
    /// Create an empty hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes fed so far.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether no bytes have been fed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl PayloadHasher for Sha256Hasher {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.inner, data);
        self.len += data.len() as u64;
    }

    fn finish(self) -> Sha256Digest {
        Sha256Digest::from_hasher(self.inner)
    }
}

/// Compute the SHA-256 of a reader using a 1 MiB read buffer.
///
/// # Examples
///
/// ```
/// use s3prep_checksums::calculate_sha256;
///
/// let digest = calculate_sha256(&b"hello world"[..]).unwrap();
/// assert_eq!(
///     digest.to_hex(),
///     "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
/// );
/// ```
pub fn calculate_sha256<R: Read>(reader: R) -> Result<Sha256Digest, ChecksumError> {
    calculate_sha256_with_buffer(reader, DEFAULT_READ_BUFFER_SIZE)
}

/// Compute the SHA-256 of a reader using a `buffer_size`-byte read buffer.
pub fn calculate_sha256_with_buffer<R: Read>(
    reader: R,
    buffer_size: usize,
) -> Result<Sha256Digest, ChecksumError> {
    hash_reader(Sha256Hasher::new(), reader, buffer_size)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::stream::test_readers::FragmentingReader;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    const HELLO_WORLD_SHA256: &str =
        "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

    #[test]
    fn test_should_hash_empty_stream() {
        let digest = calculate_sha256(std::io::empty()).expect("empty stream");
        assert_eq!(digest.to_hex(), EMPTY_SHA256);
    }

    #[test]
    fn test_should_hash_as_hex() {
        let digest = calculate_sha256(&b"hello world"[..]).expect("hash");
        assert_eq!(digest.to_hex(), HELLO_WORLD_SHA256);
        assert_eq!(digest.to_string(), HELLO_WORLD_SHA256);
    }

    #[test]
    fn test_should_hash_as_binary() {
        let digest = calculate_sha256(&b"hello world"[..]).expect("hash");
        let expected: [u8; 32] = [
            0xb9, 0x4d, 0x27, 0xb9, 0x93, 0x4d, 0x3e, 0x08, 0xa5, 0x2e, 0x52, 0xd7, 0xda, 0x7d,
            0xab, 0xfa, 0xc4, 0x84, 0xef, 0xe3, 0x7a, 0x53, 0x80, 0xee, 0x90, 0x88, 0xf7, 0xac,
            0xe2, 0xef, 0xcd, 0xe9,
        ];
        assert_eq!(digest.as_bytes(), &expected);
        assert_eq!(digest.into_bytes(), expected);
    }

    #[test]
    fn test_should_match_one_shot_digest_for_any_buffer_size() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let expected = Sha256Digest::of(&data);
        for size in [1, 7, 64, 4096, 1 << 20] {
            let digest = calculate_sha256_with_buffer(&data[..], size).expect("hash");
            assert_eq!(digest, expected, "buffer size {size}");
        }
    }

    #[test]
    fn test_should_reject_zero_buffer_size() {
        let err = calculate_sha256_with_buffer(&b"x"[..], 0).expect_err("zero buffer");
        assert!(matches!(err, ChecksumError::InvalidBufferSize));
    }

    #[test]
    fn test_should_count_streamed_bytes() {
        let mut hasher = Sha256Hasher::new();
        assert!(hasher.is_empty());
        hasher.update(b"hello ");
        hasher.update(b"world");
        assert_eq!(hasher.len(), 11);
        assert_eq!(hasher.finish().to_hex(), HELLO_WORLD_SHA256);
    }

    #[test]
    fn test_should_parse_hex_digest() {
        let digest: Sha256Digest = EMPTY_SHA256.parse().expect("valid hex");
        assert_eq!(digest, Sha256Digest::of(b""));
        assert!("abc".parse::<Sha256Digest>().is_err());
        assert!("zz".repeat(32).parse::<Sha256Digest>().is_err());
    }

    #[test]
    fn test_should_combine_digests_in_order() {
        let left = Sha256Digest::of(b"left");
        let right = Sha256Digest::of(b"right");
        let mut concatenated = Vec::new();
        concatenated.extend_from_slice(left.as_bytes());
        concatenated.extend_from_slice(right.as_bytes());
        assert_eq!(Sha256Digest::combine(&left, &right), Sha256Digest::of(&concatenated));
        assert_ne!(
            Sha256Digest::combine(&left, &right),
            Sha256Digest::combine(&right, &left)
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn test_should_not_depend_on_buffer_or_fragment_size(
            data in proptest::collection::vec(any::<u8>(), 0..20_000),
            buffer in 1usize..8_192,
            fragment in 1usize..4_096,
        ) {
            let reader = FragmentingReader { data: &data, max: fragment };
            let streamed = calculate_sha256_with_buffer(reader, buffer).expect("hash");
            prop_assert_eq!(streamed, Sha256Digest::of(&data));
        }
    }
}
