//! Canonical SSZ constants.
//!
//! Offsets are 4 bytes wide, so the largest addressable serialized value is
//! `2^32 - 1` bytes.

/// Number of bytes per Merkleization chunk.
pub const CHUNK_SIZE: usize = 32;

/// Number of bytes per serialized offset.
pub const OFFSET_SIZE: usize = 4;

/// Largest serialized size an offset can address.
pub const MAX_CONTENT_SIZE: usize = (u64::MAX >> (64 - OFFSET_SIZE * 8)) as usize;

/// A chunk of zero bytes.
pub const EMPTY_CHUNK: [u8; CHUNK_SIZE] = [0u8; CHUNK_SIZE];

/// Number of entries in a zero-hash table (depths `0..ZERO_HASHES_DEPTH`).
pub const ZERO_HASHES_DEPTH: usize = 100;
