//! # SSZ Core
//!
//! Pure primitives for SSZ ("simple serialize"): sedes, the offset-based
//! serialization codec, chunk packing and Merkleization, and the hash cache.
//!
//! This crate contains no I/O, no storage, no networking. It is pure computation
//! over in-memory byte buffers.
//!
//! ## Key Types
//!
//! - [`Sedes`] - Closed set of schema descriptors (basic, vector, list, container)
//! - [`SszSedes`] - The capability interface every sedes implements
//! - [`Value`] - A dynamically-typed value checked against a sedes
//! - [`Chunk`] - A 32-byte Merkleization unit
//! - [`HashCache`] - Per-session memoization of element and node roots
//!
//! ## Hashing
//!
//! The hash function is pluggable through [`Hasher`]. [`Sha256Hasher`] is the
//! standard SSZ choice; [`Blake3Hasher`] is also provided.

pub mod cache;
pub mod codec;
pub mod constants;
pub mod error;
pub mod hash;
pub mod merkle;
pub mod sedes;
pub mod serialize;
pub mod value;
pub mod zero_hashes;

pub use cache::{CacheConfig, CacheKey, CacheStats, HashCache};
pub use codec::{decode_offset, encode_offset, get_next_power_of_two, pack, pack_bytes};
pub use constants::{CHUNK_SIZE, EMPTY_CHUNK, MAX_CONTENT_SIZE, OFFSET_SIZE, ZERO_HASHES_DEPTH};
pub use error::{DeserializationError, SchemaError, SerializationError, SszError};
pub use hash::{Blake3Hasher, Chunk, Hasher, Sha256Hasher};
pub use merkle::{merkleize, merkleize_with_cache, mix_in_length};
pub use sedes::{
    boolean, byte, bytes32, bytes48, bytes96, infer_sedes, uint128, uint16, uint256, uint32,
    uint64, uint8, Boolean, Byte, ByteList, ByteVector, Container, List, Sedes, SszSedes, UInt,
    Vector,
};
pub use value::Value;
pub use zero_hashes::ZeroHashes;

/// Result type for core SSZ operations.
pub type Result<T> = std::result::Result<T, SszError>;
