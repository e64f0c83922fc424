//! # SSZ
//!
//! The unified API for SSZ ("simple serialize") - a deterministic binary
//! encoding and a Merkle hash tree root over the same schemas.
//!
//! ## Overview
//!
//! - **Sedes**: Schema descriptors (`uintN`, `boolean`, byte strings,
//!   `Vector`, `List`, `Container`) built once and shared
//! - **Encoding**: Fixed members inline, variable members behind 4-byte
//!   little-endian offsets
//! - **Hash tree root**: 32-byte Merkle root; lists mix their length in
//! - **Sessions**: A retained cache so that re-hashing a slightly modified
//!   value only recomputes what changed
//!
//! ## Usage
//!
//! ```rust
//! use ssz::{decode, encode, hash_tree_root, HashSession, Sedes, Value};
//! use ssz::core::{uint64, SszSedes};
//!
//! let sedes = Sedes::container(vec![
//!     ("a", uint64()),
//!     ("b", Sedes::list(uint64(), 3).unwrap()),
//! ])
//! .unwrap();
//! let value = Value::Container(vec![Value::Uint(7), Value::uints([1, 2, 3])]);
//!
//! let bytes = encode(&value, Some(&sedes)).unwrap();
//! assert_eq!(bytes.len(), 36);
//! assert_eq!(decode(&bytes, &sedes).unwrap(), value);
//!
//! let mut session = HashSession::default();
//! let root = session.hash_tree_root(&value, &sedes).unwrap();
//! assert_eq!(root, hash_tree_root(&value, &sedes).unwrap());
//! assert_eq!(sedes.type_name(), "Container(a: uint64, b: List(uint64, 3))");
//! ```
//!
//! ## Re-exports
//!
//! - `ssz::core` - Sedes, values, codec and Merkleization primitives

pub mod codec;
pub mod error;
pub mod session;

pub use ssz_core as core;

pub use codec::{decode, encode, hash_tree_root, hash_tree_root_with_cache};
pub use error::{Error, Result};
pub use session::{HashSession, HasherKind, SessionConfig};

pub use ssz_core::{
    boolean, byte, bytes32, bytes48, bytes96, infer_sedes, uint128, uint16, uint256, uint32,
    uint64, uint8, CacheConfig, CacheStats, Chunk, HashCache, Sedes, Value,
};
