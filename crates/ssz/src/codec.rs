//! One-shot encode, decode and hash tree root.

use ssz_core::{
    infer_sedes, Chunk, DeserializationError, HashCache, Hasher, Sedes, SszSedes, Value,
    MAX_CONTENT_SIZE,
};

use crate::error::Result;

/// Serialize `value`.
///
/// Without an explicit sedes one is inferred from the value; only booleans
/// and 256-bit integers carry enough type information for that.
pub fn encode(value: &Value, sedes: Option<&Sedes>) -> Result<Vec<u8>> {
    let bytes = match sedes {
        Some(sedes) => sedes.serialize(value)?,
        None => infer_sedes(value)?.serialize(value)?,
    };
    Ok(bytes)
}

/// Deserialize `data` under `sedes`.
///
/// The input must be consumed exactly.
pub fn decode(data: &[u8], sedes: &Sedes) -> Result<Value> {
    decode_bounded(data, sedes, MAX_CONTENT_SIZE)
}

pub(crate) fn decode_bounded(data: &[u8], sedes: &Sedes, max_size: usize) -> Result<Value> {
    if data.len() > max_size {
        return Err(DeserializationError::InputTooLarge {
            size: data.len(),
            max: max_size,
        }
        .into());
    }
    Ok(sedes.deserialize(data)?)
}

/// SHA-256 hash tree root of `value`, computed without a retained cache.
pub fn hash_tree_root(value: &Value, sedes: &Sedes) -> Result<Chunk> {
    Ok(sedes.hash_tree_root(value)?)
}

/// Hash tree root through a caller-owned cache.
///
/// Pass the same cache to later calls on a modified value to recompute only
/// what changed.
pub fn hash_tree_root_with_cache<H: Hasher>(
    value: &Value,
    sedes: &Sedes,
    cache: &mut HashCache<H>,
) -> Result<Chunk> {
    Ok(sedes.hash_tree_root_with_cache(value, cache)?)
}
