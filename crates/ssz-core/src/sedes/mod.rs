//! Sedes: schema descriptors that serialize, deserialize and hash values.
//!
//! Every variant implements [`SszSedes`]. The closed [`Sedes`] enum ties them
//! together so that composite sedes can hold arbitrary element and field types
//! with exhaustive matching, and no runtime capability probing.
//!
//! Sedes are built once at schema-definition time and never mutated.

mod basic;
mod byte_list;
mod container;
mod homogeneous;

use std::fmt;
use std::sync::Arc;

pub use basic::{Boolean, Byte, ByteVector, UInt};
pub use byte_list::ByteList;
pub use container::Container;
pub use homogeneous::{List, Vector};

use crate::cache::{CacheConfig, CacheKey, HashCache};
use crate::codec::tree_depth;
use crate::constants::ZERO_HASHES_DEPTH;
use crate::error::{SchemaError, SerializationError, SszError};
use crate::hash::{Chunk, Hasher, Sha256Hasher};
use crate::value::Value;

/// Capabilities shared by every sedes.
pub trait SszSedes {
    /// Canonical type name, e.g. `List(uint64, 8)`. Doubles as the cache-key tag.
    fn type_name(&self) -> &str;

    fn is_fixed_sized(&self) -> bool;

    /// Serialized size in bytes. Fails for variable-sized sedes.
    fn fixed_size(&self) -> Result<usize, SchemaError>;

    fn serialize(&self, value: &Value) -> Result<Vec<u8>, SszError>;

    fn deserialize(&self, data: &[u8]) -> Result<Value, SszError>;

    /// Hash tree root with SHA-256 and a throwaway cache.
    fn hash_tree_root(&self, value: &Value) -> Result<Chunk, SszError> {
        let config = CacheConfig {
            memoize_nodes: false,
        };
        let mut scratch = HashCache::with_config(Sha256Hasher, config);
        self.hash_tree_root_with_cache(value, &mut scratch)
    }

    /// Hash tree root, reading and extending `cache`.
    ///
    /// The cache stays with the caller and can be passed to a later call on a
    /// modified value. The result never depends on the cache contents.
    fn hash_tree_root_with_cache<H: Hasher>(
        &self,
        value: &Value,
        cache: &mut HashCache<H>,
    ) -> Result<Chunk, SszError>;

    /// Number of leaf chunks (the Merkle width before padding).
    fn chunk_count(&self) -> usize;

    /// Identity of `value` under this sedes.
    fn cache_key(&self, value: &Value) -> Result<CacheKey, SszError> {
        Ok(CacheKey::from_serialized(
            self.type_name(),
            &self.serialize(value)?,
        ))
    }
}

/// The closed set of sedes variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sedes {
    Boolean(Boolean),
    UInt(UInt),
    Byte(Byte),
    ByteVector(ByteVector),
    ByteList(ByteList),
    Vector(Vector),
    List(List),
    Container(Container),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            Sedes::Boolean($inner) => $body,
            Sedes::UInt($inner) => $body,
            Sedes::Byte($inner) => $body,
            Sedes::ByteVector($inner) => $body,
            Sedes::ByteList($inner) => $body,
            Sedes::Vector($inner) => $body,
            Sedes::List($inner) => $body,
            Sedes::Container($inner) => $body,
        }
    };
}

impl SszSedes for Sedes {
    fn type_name(&self) -> &str {
        dispatch!(self, s => s.type_name())
    }

    fn is_fixed_sized(&self) -> bool {
        dispatch!(self, s => s.is_fixed_sized())
    }

    fn fixed_size(&self) -> Result<usize, SchemaError> {
        dispatch!(self, s => s.fixed_size())
    }

    fn serialize(&self, value: &Value) -> Result<Vec<u8>, SszError> {
        dispatch!(self, s => s.serialize(value))
    }

    fn deserialize(&self, data: &[u8]) -> Result<Value, SszError> {
        dispatch!(self, s => s.deserialize(data))
    }

    fn hash_tree_root_with_cache<H: Hasher>(
        &self,
        value: &Value,
        cache: &mut HashCache<H>,
    ) -> Result<Chunk, SszError> {
        dispatch!(self, s => s.hash_tree_root_with_cache(value, cache))
    }

    fn chunk_count(&self) -> usize {
        dispatch!(self, s => s.chunk_count())
    }

    fn cache_key(&self, value: &Value) -> Result<CacheKey, SszError> {
        dispatch!(self, s => s.cache_key(value))
    }
}

impl Sedes {
    /// Unsigned integer of `bits` width (8, 16, 32, 64, 128 or 256).
    pub fn uint(bits: u16) -> Result<Self, SchemaError> {
        UInt::new(bits).map(Sedes::UInt)
    }

    /// Fixed-length byte string.
    pub fn byte_vector(size: usize) -> Self {
        Sedes::ByteVector(ByteVector::new(size))
    }

    /// Variable-length byte string of at most `max_length` bytes.
    pub fn byte_list(max_length: usize) -> Result<Self, SchemaError> {
        ByteList::new(max_length).map(Sedes::ByteList)
    }

    /// Exactly `length` elements of `element`.
    pub fn vector(element: Sedes, length: usize) -> Result<Self, SchemaError> {
        Vector::new(element, length).map(Sedes::Vector)
    }

    /// At most `max_length` elements of `element`.
    pub fn list(element: Sedes, max_length: usize) -> Result<Self, SchemaError> {
        List::new(element, max_length).map(Sedes::List)
    }

    /// Ordered record of named fields.
    pub fn container<N: Into<String>>(fields: Vec<(N, Sedes)>) -> Result<Self, SchemaError> {
        Container::new(fields).map(Sedes::Container)
    }

    /// Size in bytes if fixed-sized.
    pub fn static_size(&self) -> Option<usize> {
        self.fixed_size().ok()
    }

    /// Scalars and fixed byte strings: leaves that never recurse.
    pub fn is_basic(&self) -> bool {
        matches!(
            self,
            Sedes::Boolean(_) | Sedes::UInt(_) | Sedes::Byte(_) | Sedes::ByteVector(_)
        )
    }

    /// Basic sedes whose serializations are packed side by side into chunks
    /// when they appear as elements of a vector or list.
    pub fn is_packable(&self) -> bool {
        matches!(self, Sedes::Boolean(_) | Sedes::UInt(_) | Sedes::Byte(_))
    }

    /// Hash tree root with an explicit hash function and a throwaway cache.
    pub fn hash_tree_root_with_hasher<H: Hasher>(
        &self,
        hasher: H,
        value: &Value,
    ) -> Result<Chunk, SszError> {
        let config = CacheConfig {
            memoize_nodes: false,
        };
        let mut scratch = HashCache::with_config(hasher, config);
        self.hash_tree_root_with_cache(value, &mut scratch)
    }
}

impl fmt::Display for Sedes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

pub fn boolean() -> Sedes {
    Sedes::Boolean(Boolean)
}

pub fn byte() -> Sedes {
    Sedes::Byte(Byte)
}

pub fn uint8() -> Sedes {
    Sedes::UInt(UInt::UINT8)
}

pub fn uint16() -> Sedes {
    Sedes::UInt(UInt::UINT16)
}

pub fn uint32() -> Sedes {
    Sedes::UInt(UInt::UINT32)
}

pub fn uint64() -> Sedes {
    Sedes::UInt(UInt::UINT64)
}

pub fn uint128() -> Sedes {
    Sedes::UInt(UInt::UINT128)
}

pub fn uint256() -> Sedes {
    Sedes::UInt(UInt::UINT256)
}

pub fn bytes32() -> Sedes {
    Sedes::byte_vector(32)
}

pub fn bytes48() -> Sedes {
    Sedes::byte_vector(48)
}

pub fn bytes96() -> Sedes {
    Sedes::byte_vector(96)
}

/// Pick a sedes for a value that carries enough type information on its own.
///
/// Booleans and 256-bit integers are unambiguous. A plain integer has no
/// declared width and cannot be serialized without an explicit `uint` sedes.
pub fn infer_sedes(value: &Value) -> Result<Sedes, SerializationError> {
    match value {
        Value::Bool(_) => Ok(boolean()),
        Value::Uint256(_) => Ok(uint256()),
        Value::Uint(_) => Err(SerializationError::UntypedInteger),
        other => Err(SerializationError::CannotInfer(other.kind())),
    }
}

/// Root of one element or field, memoized by cache key unless it is basic.
pub(crate) fn element_root<H: Hasher>(
    sedes: &Sedes,
    value: &Value,
    cache: &mut HashCache<H>,
) -> Result<Chunk, SszError> {
    if sedes.is_basic() {
        return sedes.hash_tree_root_with_cache(value, cache);
    }

    let key = sedes.cache_key(value)?;
    if let Some(root) = cache.get_root(&key) {
        return Ok(root);
    }
    tracing::trace!(sedes = sedes.type_name(), "element root cache miss");
    let root = sedes.hash_tree_root_with_cache(value, cache)?;
    cache.insert_root(key, root);
    Ok(root)
}

/// Cache key for a collection whose empty serialization needs a marker.
pub(crate) fn collection_key(type_name: &str, serialized: &[u8], max_length: usize) -> CacheKey {
    if serialized.is_empty() {
        CacheKey::empty(type_name, max_length)
    } else {
        CacheKey::from_serialized(type_name, serialized)
    }
}

/// Fail unless `value` is the expected variant.
pub(crate) fn mismatch(sedes: &str, expected: &'static str, value: &Value) -> SszError {
    SerializationError::TypeMismatch {
        sedes: sedes.to_string(),
        expected,
        actual: value.kind(),
    }
    .into()
}

/// Reject sedes whose Merkle tree is deeper than the zero-hash table.
pub(crate) fn check_depth(type_name: &str, chunk_count: usize) -> Result<(), SchemaError> {
    let depth = tree_depth(chunk_count);
    if depth >= ZERO_HASHES_DEPTH {
        return Err(SchemaError::TreeTooDeep {
            sedes: type_name.to_string(),
            depth,
            max: ZERO_HASHES_DEPTH - 1,
        });
    }
    Ok(())
}

pub(crate) fn shared(sedes: Sedes) -> Arc<Sedes> {
    Arc::new(sedes)
}
