//! Merkleization: reduce chunks to a single root.
//!
//! The tree is built bottom-up, pairing adjacent nodes left to right. Leaves
//! are padded to the next power of two of `max(len, limit, 1)`; instead of
//! hashing padding, a missing right sibling at depth `d` is taken from the
//! zero-hash table. Reduction is iterative, so element counts never grow the
//! call stack.
//!
//! There is a single implementation. Hashing without a cache runs the same
//! code against a fresh cache that is thrown away.

use crate::cache::{CacheConfig, HashCache};
use crate::codec::tree_depth;
use crate::constants::CHUNK_SIZE;
use crate::error::{SerializationError, SszError};
use crate::hash::{Chunk, Hasher};

/// Merkleize `chunks` without keeping any memoized state.
pub fn merkleize<H: Hasher>(
    hasher: H,
    chunks: &[Chunk],
    limit: Option<usize>,
) -> Result<Chunk, SszError> {
    let config = CacheConfig {
        memoize_nodes: false,
    };
    let mut scratch = HashCache::with_config(hasher, config);
    merkleize_with_cache(chunks, limit, &mut scratch)
}

/// Merkleize `chunks`, memoizing parent nodes in `cache`.
///
/// Fails if `limit` is given and `chunks` holds more than `limit` chunks.
pub fn merkleize_with_cache<H: Hasher>(
    chunks: &[Chunk],
    limit: Option<usize>,
    cache: &mut HashCache<H>,
) -> Result<Chunk, SszError> {
    merkleize_for(chunks, limit, cache, "chunks")
}

/// [`merkleize_with_cache`] with the owning sedes named in errors.
pub(crate) fn merkleize_for<H: Hasher>(
    chunks: &[Chunk],
    limit: Option<usize>,
    cache: &mut HashCache<H>,
    sedes: &str,
) -> Result<Chunk, SszError> {
    let count = chunks.len();
    let width = match limit {
        Some(limit) if count > limit => {
            return Err(SerializationError::TooManyItems {
                sedes: sedes.to_string(),
                max: limit,
                actual: count,
            }
            .into());
        }
        Some(limit) => limit,
        None => count,
    };
    let depth = tree_depth(width);
    let empty_root = cache.zero_hashes().at(depth, sedes)?;

    if count == 0 {
        tracing::trace!(sedes, depth, "zero subtree fill");
        return Ok(empty_root);
    }

    tracing::trace!(sedes, count, depth, "merkleize");

    let mut layer = chunks.to_vec();
    for level in 0..depth {
        if layer.len() % 2 == 1 {
            let zero = cache.zero_hashes().at(level, sedes)?;
            tracing::trace!(sedes, level, "zero subtree fill");
            layer.push(zero);
        }
        layer = layer
            .chunks_exact(2)
            .map(|pair| cache.hash_pair(&pair[0], &pair[1]))
            .collect();
    }

    Ok(layer[0])
}

/// Little-endian length in a zero-padded chunk.
pub fn length_chunk(length: usize) -> Chunk {
    let mut bytes = [0u8; CHUNK_SIZE];
    bytes[..8].copy_from_slice(&(length as u64).to_le_bytes());
    Chunk(bytes)
}

/// `H(root || length)`, the root of a variable-length collection.
pub fn mix_in_length<H: Hasher>(hasher: &H, root: &Chunk, length: usize) -> Chunk {
    hasher.hash_pair(root, &length_chunk(length))
}

/// [`mix_in_length`] through the cache's node memo.
pub(crate) fn mix_in_length_cached<H: Hasher>(
    cache: &mut HashCache<H>,
    root: &Chunk,
    length: usize,
) -> Chunk {
    cache.hash_pair(root, &length_chunk(length))
}
