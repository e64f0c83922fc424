//! `ByteList(N)`: a variable-length byte string of at most N bytes.

use crate::cache::{CacheKey, HashCache};
use crate::codec::{chunks_for_bytes, pack_bytes};
use crate::error::{DeserializationError, SchemaError, SerializationError, SszError};
use crate::hash::{Chunk, Hasher};
use crate::merkle::{merkleize_for, mix_in_length_cached};
use crate::value::Value;

use super::{check_depth, collection_key, mismatch, SszSedes};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ByteList {
    max_length: usize,
    name: String,
}

impl ByteList {
    pub fn new(max_length: usize) -> Result<Self, SchemaError> {
        let name = format!("ByteList({})", max_length);
        check_depth(&name, chunks_for_bytes(max_length))?;
        Ok(Self { max_length, name })
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    fn bytes<'a>(&self, value: &'a Value) -> Result<&'a [u8], SszError> {
        let bytes = value
            .as_bytes()
            .ok_or_else(|| mismatch(&self.name, "bytes", value))?;
        if bytes.len() > self.max_length {
            return Err(SerializationError::TooManyItems {
                sedes: self.name.clone(),
                max: self.max_length,
                actual: bytes.len(),
            }
            .into());
        }
        Ok(bytes)
    }
}

impl SszSedes for ByteList {
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
        self.bytes(value).map(<[u8]>::to_vec)
    }

    fn deserialize(&self, data: &[u8]) -> Result<Value, SszError> {
        if data.len() > self.max_length {
            return Err(DeserializationError::TooManyItems {
                sedes: self.name.clone(),
                max: self.max_length,
                actual: data.len(),
            }
            .into());
        }
        Ok(Value::Bytes(data.to_vec()))
    }

    fn hash_tree_root_with_cache<H: Hasher>(
        &self,
        value: &Value,
        cache: &mut HashCache<H>,
    ) -> Result<Chunk, SszError> {
        let bytes = self.bytes(value)?;
        let root = merkleize_for(
            &pack_bytes(bytes),
            Some(self.chunk_count()),
            cache,
            &self.name,
        )?;
        Ok(mix_in_length_cached(cache, &root, bytes.len()))
    }

    fn chunk_count(&self) -> usize {
        chunks_for_bytes(self.max_length)
    }

    fn cache_key(&self, value: &Value) -> Result<CacheKey, SszError> {
        Ok(collection_key(&self.name, self.bytes(value)?, self.max_length))
    }
}
