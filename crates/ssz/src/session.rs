//! Hashing sessions: a retained cache plus configuration.
//!
//! A session is the incremental re-hashing entry point. Hash a large value
//! once, modify a few elements, hash again: every unchanged element root and
//! interior node is served from the session's cache.

use ssz_core::{
    Blake3Hasher, CacheConfig, CacheStats, Chunk, HashCache, Sedes, Sha256Hasher, SszSedes, Value,
    MAX_CONTENT_SIZE,
};

use crate::codec::decode_bounded;
use crate::error::Result;

/// Hash function used by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HasherKind {
    /// SHA-256, the standard SSZ hash.
    #[default]
    Sha256,
    Blake3,
}

/// Configuration for a [`HashSession`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Which hash function roots are computed with.
    pub hasher: HasherKind,
    /// Cache behaviour.
    pub cache: CacheConfig,
    /// Largest input accepted by [`HashSession::decode`].
    pub max_decode_size: usize,
    /// Keep cached roots between calls. When false, every call starts empty.
    pub reuse_cache: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            hasher: HasherKind::default(),
            cache: CacheConfig::default(),
            max_decode_size: MAX_CONTENT_SIZE,
            reuse_cache: true,
        }
    }
}

enum SessionCache {
    Sha256(HashCache<Sha256Hasher>),
    Blake3(HashCache<Blake3Hasher>),
}

impl SessionCache {
    fn new(kind: HasherKind, config: CacheConfig) -> Self {
        match kind {
            HasherKind::Sha256 => SessionCache::Sha256(HashCache::with_config(Sha256Hasher, config)),
            HasherKind::Blake3 => SessionCache::Blake3(HashCache::with_config(Blake3Hasher, config)),
        }
    }

    fn root(&mut self, sedes: &Sedes, value: &Value) -> Result<Chunk> {
        let root = match self {
            SessionCache::Sha256(cache) => sedes.hash_tree_root_with_cache(value, cache)?,
            SessionCache::Blake3(cache) => sedes.hash_tree_root_with_cache(value, cache)?,
        };
        Ok(root)
    }

    fn stats(&self) -> CacheStats {
        match self {
            SessionCache::Sha256(cache) => cache.stats(),
            SessionCache::Blake3(cache) => cache.stats(),
        }
    }

    fn sizes(&self) -> (usize, usize) {
        match self {
            SessionCache::Sha256(cache) => (cache.root_count(), cache.node_count()),
            SessionCache::Blake3(cache) => (cache.root_count(), cache.node_count()),
        }
    }

    fn clear(&mut self) {
        match self {
            SessionCache::Sha256(cache) => cache.clear(),
            SessionCache::Blake3(cache) => cache.clear(),
        }
    }
}

/// Stateful entry point for encode, decode and repeated hashing.
pub struct HashSession {
    config: SessionConfig,
    cache: SessionCache,
    calls: u64,
}

impl HashSession {
    /// Create a session with the given configuration.
    pub fn new(config: SessionConfig) -> Self {
        let cache = SessionCache::new(config.hasher, config.cache.clone());
        Self {
            config,
            cache,
            calls: 0,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Serialize `value` under `sedes`.
    pub fn encode(&self, value: &Value, sedes: &Sedes) -> Result<Vec<u8>> {
        Ok(sedes.serialize(value)?)
    }

    /// Deserialize `data` under `sedes`, rejecting inputs above
    /// [`SessionConfig::max_decode_size`].
    pub fn decode(&self, data: &[u8], sedes: &Sedes) -> Result<Value> {
        decode_bounded(data, sedes, self.config.max_decode_size)
    }

    /// Hash tree root of `value`, reusing and extending the session cache.
    pub fn hash_tree_root(&mut self, value: &Value, sedes: &Sedes) -> Result<Chunk> {
        if !self.config.reuse_cache {
            self.cache.clear();
        }
        let root = self.cache.root(sedes, value)?;
        self.calls += 1;

        let stats = self.cache.stats();
        let (roots, nodes) = self.cache.sizes();
        tracing::debug!(
            sedes = sedes.type_name(),
            call = self.calls,
            roots,
            nodes,
            root_hits = stats.root_hits,
            root_misses = stats.root_misses,
            node_hits = stats.node_hits,
            node_misses = stats.node_misses,
            "hash tree root"
        );

        Ok(root)
    }

    /// Cumulative cache statistics since creation or the last [`clear`](Self::clear).
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of element roots currently cached.
    pub fn cached_roots(&self) -> usize {
        self.cache.sizes().0
    }

    /// Number of interior nodes currently cached.
    pub fn cached_nodes(&self) -> usize {
        self.cache.sizes().1
    }

    /// Drop all cached state.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for HashSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use ssz_core::{bytes32, uint64, DeserializationError};

    fn registry() -> Sedes {
        let record = Sedes::container(vec![("key", bytes32()), ("balance", uint64())]).unwrap();
        Sedes::list(record, 1024).unwrap()
    }

    fn records(n: u8) -> Value {
        Value::Sequence(
            (0..n)
                .map(|i| Value::Container(vec![Value::Bytes(vec![i; 32]), Value::Uint(i.into())]))
                .collect(),
        )
    }

    #[test]
    fn test_rehash_hits_cache() {
        let sedes = registry();
        let mut value = records(16);
        let mut session = HashSession::default();

        session.hash_tree_root(&value, &sedes).unwrap();
        let misses = session.stats().root_misses;
        assert_eq!(misses, 16);

        value.as_items_mut().unwrap()[3] =
            Value::Container(vec![Value::Bytes(vec![0xee; 32]), Value::Uint(99)]);
        let root = session.hash_tree_root(&value, &sedes).unwrap();

        // Only the modified record is recomputed.
        assert_eq!(session.stats().root_misses, misses + 1);
        assert_eq!(root, sedes.hash_tree_root(&value).unwrap());
    }

    #[test]
    fn test_no_reuse_clears_between_calls() {
        let config = SessionConfig {
            reuse_cache: false,
            ..SessionConfig::default()
        };
        let sedes = registry();
        let value = records(4);
        let mut session = HashSession::new(config);

        let first = session.hash_tree_root(&value, &sedes).unwrap();
        let second = session.hash_tree_root(&value, &sedes).unwrap();
        assert_eq!(first, second);
        assert_eq!(session.stats().root_hits, 0);
        assert_eq!(session.cached_roots(), 4);
    }

    #[test]
    fn test_blake3_session_differs_from_sha256() {
        let sedes = registry();
        let value = records(2);
        let mut sha = HashSession::default();
        let mut blake = HashSession::new(SessionConfig {
            hasher: HasherKind::Blake3,
            ..SessionConfig::default()
        });

        let a = sha.hash_tree_root(&value, &sedes).unwrap();
        let b = blake.hash_tree_root(&value, &sedes).unwrap();
        assert_ne!(a, b);
        assert_eq!(b, sedes.hash_tree_root_with_hasher(Blake3Hasher, &value).unwrap());
    }

    #[test]
    fn test_decode_limit() {
        let session = HashSession::new(SessionConfig {
            max_decode_size: 8,
            ..SessionConfig::default()
        });
        let sedes = Sedes::list(uint64(), 4).unwrap();
        let bytes = session.encode(&Value::uints([1, 2]), &sedes).unwrap();
        assert_eq!(bytes.len(), 16);
        assert!(matches!(
            session.decode(&bytes, &sedes),
            Err(Error::Deserialization(DeserializationError::InputTooLarge { size: 16, max: 8 }))
        ));
        assert_eq!(session.decode(&bytes[..8], &sedes).unwrap(), Value::uints([1]));
    }
}
