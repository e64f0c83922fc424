//! Hash cache threaded through a hash-tree-root computation.
//!
//! The cache is owned by the caller and passed down by `&mut` through every
//! recursive call. Keeping it between calls lets an evolving value be re-hashed
//! incrementally: only elements whose cache key changed are recomputed.
//!
//! Two tables are kept:
//! - element roots, keyed by [`CacheKey`] (sedes identity + serialized value)
//! - parent nodes, keyed by the 64-byte concatenation of their children
//!
//! Nothing is ever evicted implicitly. Call [`HashCache::clear`] to drop state.

use std::collections::HashMap;
use std::fmt;

use crate::constants::CHUNK_SIZE;
use crate::hash::{Chunk, Hasher, Sha256Hasher};
use crate::zero_hashes::ZeroHashes;

/// Identity of a value under a particular sedes.
///
/// Format: `<type tag>:<hex(serialized)>`, or `<type tag>#<max length>` for an
/// empty collection, whose serialization is the empty string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a non-empty serialization.
    pub fn from_serialized(type_tag: &str, serialized: &[u8]) -> Self {
        let mut key = String::with_capacity(type_tag.len() + 1 + serialized.len() * 2);
        key.push_str(type_tag);
        key.push(':');
        key.push_str(&hex::encode(serialized));
        Self(key)
    }

    /// Key for an empty collection with the given maximum length.
    pub fn empty(type_tag: &str, max_length: usize) -> Self {
        Self(format!("{}#{}", type_tag, max_length))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.chars().count() > 48 {
            let head: String = self.0.chars().take(48).collect();
            write!(f, "CacheKey({}...)", head)
        } else {
            write!(f, "CacheKey({})", self.0)
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cache behaviour knobs.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Memoize parent-node hashes by child pair, in addition to element roots.
    pub memoize_nodes: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            memoize_nodes: true,
        }
    }
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub root_hits: u64,
    pub root_misses: u64,
    pub node_hits: u64,
    pub node_misses: u64,
}

/// Memoization state for one hash-tree-root call graph.
pub struct HashCache<H: Hasher = Sha256Hasher> {
    hasher: H,
    config: CacheConfig,
    roots: HashMap<CacheKey, Chunk>,
    nodes: HashMap<[u8; CHUNK_SIZE * 2], Chunk>,
    stats: CacheStats,
}

impl HashCache<Sha256Hasher> {
    /// Create an empty SHA-256 cache.
    pub fn new() -> Self {
        Self::with_hasher(Sha256Hasher)
    }
}

impl Default for HashCache<Sha256Hasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Hasher> HashCache<H> {
    /// Create an empty cache for the given hash function.
    pub fn with_hasher(hasher: H) -> Self {
        Self::with_config(hasher, CacheConfig::default())
    }

    /// Create an empty cache with explicit configuration.
    pub fn with_config(hasher: H, config: CacheConfig) -> Self {
        Self {
            hasher,
            config,
            roots: HashMap::new(),
            nodes: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// The hash function this cache computes with.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Zero-hash table of the underlying hash function.
    pub fn zero_hashes(&self) -> &ZeroHashes {
        self.hasher.zero_hashes()
    }

    /// Hash arbitrary bytes (never memoized).
    pub fn hash(&self, data: &[u8]) -> Chunk {
        self.hasher.hash(data)
    }

    /// Hash a parent node, reusing a previous result for the same child pair.
    pub fn hash_pair(&mut self, left: &Chunk, right: &Chunk) -> Chunk {
        if !self.config.memoize_nodes {
            return self.hasher.hash_pair(left, right);
        }

        let mut key = [0u8; CHUNK_SIZE * 2];
        key[..CHUNK_SIZE].copy_from_slice(&left.0);
        key[CHUNK_SIZE..].copy_from_slice(&right.0);

        if let Some(node) = self.nodes.get(&key) {
            self.stats.node_hits += 1;
            return *node;
        }
        self.stats.node_misses += 1;
        let node = self.hasher.hash(&key);
        self.nodes.insert(key, node);
        node
    }

    /// Look up a previously computed element root.
    pub fn get_root(&mut self, key: &CacheKey) -> Option<Chunk> {
        match self.roots.get(key) {
            Some(root) => {
                self.stats.root_hits += 1;
                Some(*root)
            }
            None => {
                self.stats.root_misses += 1;
                None
            }
        }
    }

    /// Record an element root.
    pub fn insert_root(&mut self, key: CacheKey, root: Chunk) {
        self.roots.insert(key, root);
    }

    /// `true` if a root is recorded under `key`. Does not touch statistics.
    pub fn contains_root(&self, key: &CacheKey) -> bool {
        self.roots.contains_key(key)
    }

    /// Number of element roots recorded.
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Number of parent nodes recorded.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Drop all memoized state and reset statistics.
    pub fn clear(&mut self) {
        self.roots.clear();
        self.nodes.clear();
        self.stats = CacheStats::default();
    }
}

impl<H: Hasher> fmt::Debug for HashCache<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashCache")
            .field("roots", &self.roots.len())
            .field("nodes", &self.nodes.len())
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Blake3Hasher;

    #[test]
    fn test_cache_key_format() {
        let key = CacheKey::from_serialized("uint16", &[0x01, 0xff]);
        assert_eq!(key.as_str(), "uint16:01ff");

        let empty = CacheKey::empty("List(uint64, 8)", 8);
        assert_eq!(empty.as_str(), "List(uint64, 8)#8");
    }

    #[test]
    fn test_empty_keys_differ_by_type() {
        let a = CacheKey::empty("List(uint64, 8)", 8);
        let b = CacheKey::empty("List(uint64, 16)", 16);
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_pair_memoized() {
        let mut cache = HashCache::new();
        let left = Chunk([1; 32]);
        let right = Chunk([2; 32]);

        let first = cache.hash_pair(&left, &right);
        let second = cache.hash_pair(&left, &right);

        assert_eq!(first, second);
        assert_eq!(first, Sha256Hasher.hash_pair(&left, &right));
        assert_eq!(cache.node_count(), 1);
        assert_eq!(cache.stats().node_hits, 1);
        assert_eq!(cache.stats().node_misses, 1);
    }

    #[test]
    fn test_node_memoization_can_be_disabled() {
        let config = CacheConfig {
            memoize_nodes: false,
        };
        let mut cache = HashCache::with_config(Blake3Hasher, config);
        let root = cache.hash_pair(&Chunk::ZERO, &Chunk::ZERO);
        assert_eq!(root, Blake3Hasher.hash_pair(&Chunk::ZERO, &Chunk::ZERO));
        assert_eq!(cache.node_count(), 0);
    }

    #[test]
    fn test_root_lookup_and_clear() {
        let mut cache = HashCache::new();
        let key = CacheKey::from_serialized("bytes32", &[0xaa; 32]);
        assert_eq!(cache.get_root(&key), None);

        cache.insert_root(key.clone(), Chunk([0xaa; 32]));
        assert_eq!(cache.get_root(&key), Some(Chunk([0xaa; 32])));
        assert_eq!(cache.root_count(), 1);
        assert_eq!(cache.stats().root_hits, 1);
        assert_eq!(cache.stats().root_misses, 1);

        cache.clear();
        assert_eq!(cache.root_count(), 0);
        assert_eq!(cache.stats(), CacheStats::default());
    }
}
