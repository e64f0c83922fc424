//! Zero-hash table: roots of empty subtrees at each depth.

use crate::constants::ZERO_HASHES_DEPTH;
use crate::error::SchemaError;
use crate::hash::{Chunk, Hasher};

/// `table[0]` is the zero chunk, `table[d] = H(table[d-1] || table[d-1])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZeroHashes {
    table: Vec<Chunk>,
}

impl ZeroHashes {
    /// Compute the table for a hash function.
    pub fn compute<H: Hasher + ?Sized>(hasher: &H) -> Self {
        let mut table = Vec::with_capacity(ZERO_HASHES_DEPTH);
        table.push(Chunk::ZERO);
        for depth in 1..ZERO_HASHES_DEPTH {
            let below = table[depth - 1];
            table.push(hasher.hash_pair(&below, &below));
        }
        Self { table }
    }

    /// Root of an empty subtree of the given depth.
    pub fn get(&self, depth: usize) -> Option<&Chunk> {
        self.table.get(depth)
    }

    /// Like [`get`](Self::get), but failing with a schema error naming `sedes`.
    pub fn at(&self, depth: usize, sedes: &str) -> Result<Chunk, SchemaError> {
        self.table.get(depth).copied().ok_or_else(|| SchemaError::TreeTooDeep {
            sedes: sedes.to_string(),
            depth,
            max: self.table.len() - 1,
        })
    }

    /// Number of depths covered.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{Blake3Hasher, Sha256Hasher};

    #[test]
    fn test_zero_hash_recurrence() {
        let zh = Sha256Hasher.zero_hashes();
        assert_eq!(zh.len(), ZERO_HASHES_DEPTH);
        assert_eq!(zh.get(0), Some(&Chunk::ZERO));
        for d in 1..zh.len() {
            let below = zh.get(d - 1).unwrap();
            assert_eq!(zh.get(d).unwrap(), &Sha256Hasher.hash_pair(below, below));
        }
    }

    #[test]
    fn test_sha256_known_zero_hashes() {
        let zh = Sha256Hasher.zero_hashes();
        assert_eq!(
            zh.get(1).unwrap().to_hex(),
            "f5a5fd42d16a20302798ef6ed309979b43003d2320d9f0e8ea9831a92759fb4b"
        );
        assert_eq!(
            zh.get(2).unwrap().to_hex(),
            "db56114e00fdd4c1f85c892bf35ac9a89289aaecb1ebd0a96cde606a748b5d71"
        );
    }

    #[test]
    fn test_table_is_per_hasher() {
        let sha = Sha256Hasher.zero_hashes();
        let blake = Blake3Hasher.zero_hashes();
        assert_eq!(sha.get(0), blake.get(0));
        assert_ne!(sha.get(1), blake.get(1));
    }

    #[test]
    fn test_depth_beyond_table_is_schema_error() {
        let zh = Sha256Hasher.zero_hashes();
        let err = zh.at(ZERO_HASHES_DEPTH, "List(uint8, huge)").unwrap_err();
        assert!(matches!(err, SchemaError::TreeTooDeep { depth, .. } if depth == ZERO_HASHES_DEPTH));
    }
}
