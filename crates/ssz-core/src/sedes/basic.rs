//! Basic sedes: booleans, unsigned integers, single bytes and fixed byte strings.

use crate::cache::HashCache;
use crate::codec::{chunks_for_bytes, pack_bytes};
use crate::error::{DeserializationError, SchemaError, SerializationError, SszError};
use crate::hash::{Chunk, Hasher};
use crate::merkle::merkleize_for;
use crate::serialize::exact_bytes;
use crate::value::Value;

use super::{mismatch, SszSedes};

/// `boolean`: one byte, `0x00` or `0x01`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Boolean;

impl SszSedes for Boolean {
    fn type_name(&self) -> &str {
        "boolean"
    }

    fn is_fixed_sized(&self) -> bool {
        true
    }

    fn fixed_size(&self) -> Result<usize, SchemaError> {
        Ok(1)
    }

    fn serialize(&self, value: &Value) -> Result<Vec<u8>, SszError> {
        match value {
            Value::Bool(b) => Ok(vec![u8::from(*b)]),
            other => Err(mismatch(self.type_name(), "bool", other)),
        }
    }

    fn deserialize(&self, data: &[u8]) -> Result<Value, SszError> {
        let bytes = exact_bytes(data, 1, self.type_name())?;
        match bytes[0] {
            0x00 => Ok(Value::Bool(false)),
            0x01 => Ok(Value::Bool(true)),
            other => Err(DeserializationError::InvalidBoolean {
                sedes: self.type_name().to_string(),
                position: 0,
                byte: other,
            }
            .into()),
        }
    }

    fn hash_tree_root_with_cache<H: Hasher>(
        &self,
        value: &Value,
        _cache: &mut HashCache<H>,
    ) -> Result<Chunk, SszError> {
        Ok(Chunk::from_slice_padded(&self.serialize(value)?))
    }

    fn chunk_count(&self) -> usize {
        1
    }
}

/// `uintN` for N in {8, 16, 32, 64, 128, 256}, little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UInt {
    bits: u16,
}

impl UInt {
    pub const UINT8: UInt = UInt { bits: 8 };
    pub const UINT16: UInt = UInt { bits: 16 };
    pub const UINT32: UInt = UInt { bits: 32 };
    pub const UINT64: UInt = UInt { bits: 64 };
    pub const UINT128: UInt = UInt { bits: 128 };
    pub const UINT256: UInt = UInt { bits: 256 };

    pub fn new(bits: u16) -> Result<Self, SchemaError> {
        match bits {
            8 | 16 | 32 | 64 | 128 | 256 => Ok(Self { bits }),
            other => Err(SchemaError::UnsupportedWidth(other)),
        }
    }

    pub fn bits(&self) -> u16 {
        self.bits
    }

    /// Width in bytes.
    pub fn size(&self) -> usize {
        usize::from(self.bits / 8)
    }
}

impl SszSedes for UInt {
    fn type_name(&self) -> &str {
        match self.bits {
            8 => "uint8",
            16 => "uint16",
            32 => "uint32",
            64 => "uint64",
            128 => "uint128",
            _ => "uint256",
        }
    }

    fn is_fixed_sized(&self) -> bool {
        true
    }

    fn fixed_size(&self) -> Result<usize, SchemaError> {
        Ok(self.size())
    }

    fn serialize(&self, value: &Value) -> Result<Vec<u8>, SszError> {
        match (self.bits, value) {
            (256, Value::Uint256(bytes)) => Ok(bytes.to_vec()),
            (256, Value::Uint(n)) => {
                let mut bytes = vec![0u8; 32];
                bytes[..16].copy_from_slice(&n.to_le_bytes());
                Ok(bytes)
            }
            (bits, Value::Uint(n)) => {
                if bits < 128 && *n >> bits != 0 {
                    return Err(SerializationError::IntegerOverflow { value: *n, bits }.into());
                }
                Ok(n.to_le_bytes()[..self.size()].to_vec())
            }
            (_, other) => Err(mismatch(self.type_name(), "uint", other)),
        }
    }

    fn deserialize(&self, data: &[u8]) -> Result<Value, SszError> {
        let bytes = exact_bytes(data, self.size(), self.type_name())?;
        if self.bits == 256 {
            let mut out = [0u8; 32];
            out.copy_from_slice(bytes);
            return Ok(Value::Uint256(out));
        }
        let mut buf = [0u8; 16];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Value::Uint(u128::from_le_bytes(buf)))
    }

    fn hash_tree_root_with_cache<H: Hasher>(
        &self,
        value: &Value,
        _cache: &mut HashCache<H>,
    ) -> Result<Chunk, SszError> {
        Ok(Chunk::from_slice_padded(&self.serialize(value)?))
    }

    fn chunk_count(&self) -> usize {
        1
    }
}

/// `byte`: a single opaque byte, carried as a one-byte [`Value::Bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Byte;

impl SszSedes for Byte {
    fn type_name(&self) -> &str {
        "byte"
    }

    fn is_fixed_sized(&self) -> bool {
        true
    }

    fn fixed_size(&self) -> Result<usize, SchemaError> {
        Ok(1)
    }

    fn serialize(&self, value: &Value) -> Result<Vec<u8>, SszError> {
        match value {
            Value::Bytes(b) if b.len() == 1 => Ok(b.clone()),
            Value::Bytes(b) => Err(SerializationError::LengthMismatch {
                sedes: self.type_name().to_string(),
                expected: 1,
                actual: b.len(),
            }
            .into()),
            other => Err(mismatch(self.type_name(), "bytes", other)),
        }
    }

    fn deserialize(&self, data: &[u8]) -> Result<Value, SszError> {
        Ok(Value::Bytes(exact_bytes(data, 1, self.type_name())?.to_vec()))
    }

    fn hash_tree_root_with_cache<H: Hasher>(
        &self,
        value: &Value,
        _cache: &mut HashCache<H>,
    ) -> Result<Chunk, SszError> {
        Ok(Chunk::from_slice_padded(&self.serialize(value)?))
    }

    fn chunk_count(&self) -> usize {
        1
    }
}

/// `ByteVector(N)`: exactly N bytes. `bytes32`, `bytes48` and `bytes96` are
/// instances of this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ByteVector {
    size: usize,
    name: String,
}

impl ByteVector {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            name: format!("bytes{}", size),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl SszSedes for ByteVector {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn is_fixed_sized(&self) -> bool {
        true
    }

    fn fixed_size(&self) -> Result<usize, SchemaError> {
        Ok(self.size)
    }

    fn serialize(&self, value: &Value) -> Result<Vec<u8>, SszError> {
        match value {
            Value::Bytes(b) if b.len() == self.size => Ok(b.clone()),
            Value::Bytes(b) => Err(SerializationError::LengthMismatch {
                sedes: self.name.clone(),
                expected: self.size,
                actual: b.len(),
            }
            .into()),
            other => Err(mismatch(&self.name, "bytes", other)),
        }
    }

    fn deserialize(&self, data: &[u8]) -> Result<Value, SszError> {
        Ok(Value::Bytes(exact_bytes(data, self.size, &self.name)?.to_vec()))
    }

    fn hash_tree_root_with_cache<H: Hasher>(
        &self,
        value: &Value,
        cache: &mut HashCache<H>,
    ) -> Result<Chunk, SszError> {
        let bytes = self.serialize(value)?;
        merkleize_for(
            &pack_bytes(&bytes),
            Some(self.chunk_count()),
            cache,
            &self.name,
        )
    }

    fn chunk_count(&self) -> usize {
        chunks_for_bytes(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Sha256Hasher;

    #[test]
    fn test_boolean() {
        assert_eq!(Boolean.serialize(&Value::Bool(true)).unwrap(), vec![1]);
        assert_eq!(Boolean.serialize(&Value::Bool(false)).unwrap(), vec![0]);
        assert_eq!(Boolean.deserialize(&[1]).unwrap(), Value::Bool(true));
        assert_eq!(
            Boolean.deserialize(&[2]),
            Err(SszError::from(DeserializationError::InvalidBoolean {
                sedes: "boolean".into(),
                position: 0,
                byte: 2,
            }))
        );
        assert!(Boolean.deserialize(&[]).is_err());
        assert!(Boolean.deserialize(&[0, 0]).is_err());
    }

    #[test]
    fn test_boolean_root() {
        let root = Boolean.hash_tree_root(&Value::Bool(true)).unwrap();
        let mut expected = [0u8; 32];
        expected[0] = 1;
        assert_eq!(root, Chunk(expected));
    }

    #[test]
    fn test_uint_widths() {
        assert_eq!(UInt::new(24), Err(SchemaError::UnsupportedWidth(24)));
        assert_eq!(UInt::new(64).unwrap(), UInt::UINT64);
        assert_eq!(UInt::UINT128.size(), 16);
        assert_eq!(UInt::UINT256.type_name(), "uint256");
    }

    #[test]
    fn test_uint_little_endian() {
        let bytes = UInt::UINT32.serialize(&Value::Uint(0x01020304)).unwrap();
        assert_eq!(bytes, vec![0x04, 0x03, 0x02, 0x01]);
        assert_eq!(
            UInt::UINT32.deserialize(&bytes).unwrap(),
            Value::Uint(0x01020304)
        );
    }

    #[test]
    fn test_uint_overflow() {
        assert!(UInt::UINT8.serialize(&Value::Uint(255)).is_ok());
        assert_eq!(
            UInt::UINT8.serialize(&Value::Uint(256)),
            Err(SszError::from(SerializationError::IntegerOverflow {
                value: 256,
                bits: 8
            }))
        );
        assert!(UInt::UINT128.serialize(&Value::Uint(u128::MAX)).is_ok());
    }

    #[test]
    fn test_uint256_accepts_small_values() {
        let from_small = UInt::UINT256.serialize(&Value::Uint(5)).unwrap();
        let from_wide = UInt::UINT256
            .serialize(&Value::uint256_from_u128(5))
            .unwrap();
        assert_eq!(from_small, from_wide);
        assert_eq!(
            UInt::UINT256.deserialize(&from_small).unwrap(),
            Value::uint256_from_u128(5)
        );
    }

    #[test]
    fn test_uint_type_mismatch() {
        assert!(matches!(
            UInt::UINT16.serialize(&Value::Bool(true)),
            Err(SszError::Serialization(SerializationError::TypeMismatch { .. }))
        ));
        assert!(matches!(
            UInt::UINT64.serialize(&Value::uint256_from_u128(1)),
            Err(SszError::Serialization(SerializationError::TypeMismatch { .. }))
        ));
    }

    #[test]
    fn test_byte() {
        assert_eq!(Byte.serialize(&Value::Bytes(vec![7])).unwrap(), vec![7]);
        assert!(Byte.serialize(&Value::Bytes(vec![7, 8])).is_err());
        assert_eq!(Byte.deserialize(&[9]).unwrap(), Value::Bytes(vec![9]));
    }

    #[test]
    fn test_byte_vector_length() {
        let bv = ByteVector::new(4);
        assert_eq!(bv.type_name(), "bytes4");
        assert!(bv.serialize(&Value::Bytes(vec![0; 3])).is_err());
        assert!(bv.deserialize(&[0; 5]).is_err());
        assert_eq!(
            bv.deserialize(&[1, 2, 3, 4]).unwrap(),
            Value::Bytes(vec![1, 2, 3, 4])
        );
    }

    #[test]
    fn test_byte_vector_roots() {
        // Up to one chunk: the padded bytes themselves.
        let b32 = ByteVector::new(32);
        assert_eq!(
            b32.hash_tree_root(&Value::Bytes(vec![0xab; 32])).unwrap(),
            Chunk([0xab; 32])
        );

        // Three chunks pad to four.
        let b96 = ByteVector::new(96);
        let data: Vec<u8> = (0..96u8).collect();
        let c: Vec<Chunk> = data.chunks(32).map(Chunk::from_slice_padded).collect();
        let h = Sha256Hasher;
        let expected = h.hash_pair(
            &h.hash_pair(&c[0], &c[1]),
            &h.hash_pair(&c[2], &Chunk::ZERO),
        );
        assert_eq!(b96.hash_tree_root(&Value::Bytes(data)).unwrap(), expected);
    }
}
