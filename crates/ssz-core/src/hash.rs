//! Hash primitives for Merkleization.
//!
//! The engine only needs a deterministic `bytes -> 32 bytes` function. SHA-256
//! is the standard SSZ choice; BLAKE3 is offered for applications that commit
//! with it elsewhere.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::OnceLock;

use crate::constants::CHUNK_SIZE;
use crate::zero_hashes::ZeroHashes;

/// A 32-byte Merkleization chunk (leaf, node or root).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Chunk(pub [u8; CHUNK_SIZE]);

impl Chunk {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; CHUNK_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; CHUNK_SIZE] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != CHUNK_SIZE {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; CHUNK_SIZE];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Build a chunk from at most 32 bytes, zero-padding on the right.
    pub fn from_slice_padded(bytes: &[u8]) -> Self {
        let mut arr = [0u8; CHUNK_SIZE];
        let len = bytes.len().min(CHUNK_SIZE);
        arr[..len].copy_from_slice(&bytes[..len]);
        Self(arr)
    }

    /// The all-zero chunk.
    pub const ZERO: Self = Self([0u8; CHUNK_SIZE]);
}

impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Chunk {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; CHUNK_SIZE]> for Chunk {
    fn from(bytes: [u8; CHUNK_SIZE]) -> Self {
        Self(bytes)
    }
}

/// A deterministic 32-byte hash function used for Merkleization.
///
/// Implementations must also expose their zero-hash table so that empty
/// subtrees are never rehashed.
pub trait Hasher {
    /// Hash arbitrary bytes.
    fn hash(&self, data: &[u8]) -> Chunk;

    /// Hash the concatenation `left || right`.
    fn hash_pair(&self, left: &Chunk, right: &Chunk) -> Chunk {
        let mut buf = [0u8; CHUNK_SIZE * 2];
        buf[..CHUNK_SIZE].copy_from_slice(&left.0);
        buf[CHUNK_SIZE..].copy_from_slice(&right.0);
        self.hash(&buf)
    }

    /// Padding roots of empty subtrees under this hash function.
    fn zero_hashes(&self) -> &ZeroHashes;
}

/// SHA-256, the standard SSZ hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn hash(&self, data: &[u8]) -> Chunk {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Chunk(hasher.finalize().into())
    }

    fn zero_hashes(&self) -> &ZeroHashes {
        static TABLE: OnceLock<ZeroHashes> = OnceLock::new();
        TABLE.get_or_init(|| ZeroHashes::compute(self))
    }
}

/// BLAKE3 in its default 32-byte output mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

impl Hasher for Blake3Hasher {
    fn hash(&self, data: &[u8]) -> Chunk {
        Chunk(*blake3::hash(data).as_bytes())
    }

    fn zero_hashes(&self) -> &ZeroHashes {
        static TABLE: OnceLock<ZeroHashes> = OnceLock::new();
        TABLE.get_or_init(|| ZeroHashes::compute(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        // SHA-256 of the empty string.
        let h = Sha256Hasher.hash(b"");
        assert_eq!(
            h.to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_hash_pair_is_concatenation() {
        let left = Chunk([0x11; 32]);
        let right = Chunk([0x22; 32]);
        let mut buf = Vec::new();
        buf.extend_from_slice(&left.0);
        buf.extend_from_slice(&right.0);

        assert_eq!(Sha256Hasher.hash_pair(&left, &right), Sha256Hasher.hash(&buf));
        assert_eq!(Blake3Hasher.hash_pair(&left, &right), Blake3Hasher.hash(&buf));
        assert_ne!(
            Sha256Hasher.hash_pair(&left, &right),
            Sha256Hasher.hash_pair(&right, &left)
        );
    }

    #[test]
    fn test_hashers_differ() {
        assert_ne!(Sha256Hasher.hash(b"ssz"), Blake3Hasher.hash(b"ssz"));
    }

    #[test]
    fn test_chunk_hex_roundtrip() {
        let chunk = Chunk([0xab; 32]);
        let recovered = Chunk::from_hex(&chunk.to_hex()).unwrap();
        assert_eq!(chunk, recovered);
        assert!(Chunk::from_hex("abcd").is_err());
    }

    #[test]
    fn test_chunk_padding() {
        let chunk = Chunk::from_slice_padded(&[1, 2, 3]);
        assert_eq!(&chunk.0[..3], &[1, 2, 3]);
        assert!(chunk.0[3..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_chunk_debug() {
        let debug = format!("{:?}", Chunk([0xcd; 32]));
        assert_eq!(debug, "Chunk(cdcdcdcdcdcdcdcd)");
    }
}
