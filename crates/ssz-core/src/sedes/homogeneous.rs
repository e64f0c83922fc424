//! Homogeneous composites: `Vector(T, N)` and `List(T, N)`.
//!
//! Packable elements (booleans, integers, bytes) are serialized side by side
//! and packed into chunks for hashing. Any other element contributes its own
//! hash tree root as one leaf, looked up in the cache first.

use std::sync::Arc;

use crate::cache::{CacheKey, HashCache};
use crate::codec::pack_bytes;
use crate::constants::CHUNK_SIZE;
use crate::error::{SchemaError, SerializationError, SszError};
use crate::hash::{Chunk, Hasher};
use crate::merkle::{merkleize_for, mix_in_length_cached};
use crate::serialize::{deserialize_sequence, serialize_members, Count};
use crate::value::Value;

use super::{check_depth, collection_key, element_root, mismatch, shared, Sedes, SszSedes};

/// Exactly `length` elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vector {
    element: Arc<Sedes>,
    length: usize,
    name: String,
    fixed_size: Option<usize>,
}

impl Vector {
    pub fn new(element: Sedes, length: usize) -> Result<Self, SchemaError> {
        let name = format!("Vector({}, {})", element.type_name(), length);
        check_depth(&name, leaf_count(&element, length))?;
        let fixed_size = if length == 0 {
            Some(0)
        } else {
            match element.static_size() {
                Some(size) => Some(
                    size.checked_mul(length)
                        .ok_or_else(|| SchemaError::SizeOverflow(name.clone()))?,
                ),
                None => None,
            }
        };
        Ok(Self {
            element: shared(element),
            length,
            name,
            fixed_size,
        })
    }

    pub fn element(&self) -> &Sedes {
        &self.element
    }

    pub fn length(&self) -> usize {
        self.length
    }

    fn items<'a>(&self, value: &'a Value) -> Result<&'a [Value], SszError> {
        let items = match value {
            Value::Sequence(items) => items,
            other => return Err(mismatch(&self.name, "sequence", other)),
        };
        if items.len() != self.length {
            return Err(SerializationError::LengthMismatch {
                sedes: self.name.clone(),
                expected: self.length,
                actual: items.len(),
            }
            .into());
        }
        Ok(items)
    }
}

impl SszSedes for Vector {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn is_fixed_sized(&self) -> bool {
        self.fixed_size.is_some()
    }

    fn fixed_size(&self) -> Result<usize, SchemaError> {
        self.fixed_size
            .ok_or_else(|| SchemaError::NotFixedSize(self.name.clone()))
    }

    fn serialize(&self, value: &Value) -> Result<Vec<u8>, SszError> {
        serialize_items(&self.element, self.items(value)?)
    }

    fn deserialize(&self, data: &[u8]) -> Result<Value, SszError> {
        deserialize_sequence(data, &self.element, Count::Exact(self.length), &self.name)
            .map(Value::Sequence)
    }

    fn hash_tree_root_with_cache<H: Hasher>(
        &self,
        value: &Value,
        cache: &mut HashCache<H>,
    ) -> Result<Chunk, SszError> {
        let leaves = leaves(&self.element, self.items(value)?, cache)?;
        merkleize_for(&leaves, None, cache, &self.name)
    }

    fn chunk_count(&self) -> usize {
        leaf_count(&self.element, self.length)
    }

    fn cache_key(&self, value: &Value) -> Result<CacheKey, SszError> {
        let serialized = self.serialize(value)?;
        Ok(collection_key(&self.name, &serialized, self.length))
    }
}

/// At most `max_length` elements.
///
/// Elements must have a non-zero size, otherwise the element count could not
/// be recovered from the encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    element: Arc<Sedes>,
    max_length: usize,
    name: String,
}

impl List {
    pub fn new(element: Sedes, max_length: usize) -> Result<Self, SchemaError> {
        let name = format!("List({}, {})", element.type_name(), max_length);
        if element.static_size() == Some(0) {
            return Err(SchemaError::ZeroSizedElement(name));
        }
        check_depth(&name, leaf_count(&element, max_length))?;
        Ok(Self {
            element: shared(element),
            max_length,
            name,
        })
    }

    pub fn element(&self) -> &Sedes {
        &self.element
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    fn items<'a>(&self, value: &'a Value) -> Result<&'a [Value], SszError> {
        let items = match value {
            Value::Sequence(items) => items,
            other => return Err(mismatch(&self.name, "sequence", other)),
        };
        if items.len() > self.max_length {
            return Err(SerializationError::TooManyItems {
                sedes: self.name.clone(),
                max: self.max_length,
                actual: items.len(),
            }
            .into());
        }
        Ok(items)
    }
}

impl SszSedes for List {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn is_fixed_sized(&self) -> bool {
        false
    }

    fn fixed_size(&self) -> Result<usize, SchemaError> {
        Err(SchemaError::NotFixedSize(self.name.clone()))
    }

    fn serialize(&self, value: &Value) -> Result<Vec<u8>, SszError> {
        serialize_items(&self.element, self.items(value)?)
    }

    fn deserialize(&self, data: &[u8]) -> Result<Value, SszError> {
        deserialize_sequence(
            data,
            &self.element,
            Count::AtMost(self.max_length),
            &self.name,
        )
        .map(Value::Sequence)
    }

    fn hash_tree_root_with_cache<H: Hasher>(
        &self,
        value: &Value,
        cache: &mut HashCache<H>,
    ) -> Result<Chunk, SszError> {
        let items = self.items(value)?;
        let leaves = leaves(&self.element, items, cache)?;
        let root = merkleize_for(&leaves, Some(self.chunk_count()), cache, &self.name)?;
        Ok(mix_in_length_cached(cache, &root, items.len()))
    }

    fn chunk_count(&self) -> usize {
        leaf_count(&self.element, self.max_length)
    }

    fn cache_key(&self, value: &Value) -> Result<CacheKey, SszError> {
        let serialized = self.serialize(value)?;
        Ok(collection_key(&self.name, &serialized, self.max_length))
    }
}

/// Leaf chunks for `n` elements: packed bytes or one root per element.
///
/// Packable sizes divide the chunk size, so this counts whole elements per
/// chunk and never multiplies `n`.
fn leaf_count(element: &Sedes, n: usize) -> usize {
    match packed_size(element) {
        Some(size) => n.div_ceil(CHUNK_SIZE / size),
        None => n,
    }
}

fn packed_size(element: &Sedes) -> Option<usize> {
    if element.is_packable() {
        element.static_size()
    } else {
        None
    }
}

fn serialize_items(element: &Sedes, items: &[Value]) -> Result<Vec<u8>, SszError> {
    if element.is_fixed_sized() {
        let capacity = element
            .static_size()
            .and_then(|size| size.checked_mul(items.len()))
            .unwrap_or(0);
        let mut out = Vec::with_capacity(capacity);
        for item in items {
            out.extend_from_slice(&element.serialize(item)?);
        }
        return Ok(out);
    }
    let pairs: Vec<(&Value, &Sedes)> = items.iter().map(|item| (item, element)).collect();
    serialize_members(&pairs)
}

fn leaves<H: Hasher>(
    element: &Sedes,
    items: &[Value],
    cache: &mut HashCache<H>,
) -> Result<Vec<Chunk>, SszError> {
    if packed_size(element).is_some() {
        let packed = serialize_items(element, items)?;
        return Ok(pack_bytes(&packed));
    }
    items
        .iter()
        .map(|item| element_root(element, item, cache))
        .collect()
}
