//! Dynamically-typed values checked against a sedes.
//!
//! A [`Value`] carries no schema of its own: the same `Value::Uint(7)` is a
//! `uint8` or a `uint64` depending on the sedes it is serialized with.

use serde::{Deserialize, Serialize};

/// A value conforming to some sedes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// `boolean`.
    Bool(bool),
    /// `uint8` through `uint128`.
    Uint(u128),
    /// `uint256`, little-endian.
    Uint256([u8; 32]),
    /// `byte`, `ByteVector(N)` and `ByteList(N)`.
    Bytes(Vec<u8>),
    /// Elements of a `Vector` or `List`, in order.
    Sequence(Vec<Value>),
    /// Fields of a `Container`, in declaration order.
    Container(Vec<Value>),
}

impl Value {
    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Uint(_) => "uint",
            Value::Uint256(_) => "uint256",
            Value::Bytes(_) => "bytes",
            Value::Sequence(_) => "sequence",
            Value::Container(_) => "container",
        }
    }

    /// A `uint256` value from a smaller integer.
    pub fn uint256_from_u128(n: u128) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..16].copy_from_slice(&n.to_le_bytes());
        Value::Uint256(bytes)
    }

    /// A sequence of `Uint` values.
    pub fn uints<I: IntoIterator<Item = u128>>(items: I) -> Self {
        Value::Sequence(items.into_iter().map(Value::Uint).collect())
    }

    /// Number of elements, fields or bytes; `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Bytes(b) => Some(b.len()),
            Value::Sequence(items) | Value::Container(items) => Some(items.len()),
            _ => None,
        }
    }

    /// `true` if this is an empty collection.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    pub fn as_uint(&self) -> Option<u128> {
        match self {
            Value::Uint(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) | Value::Container(items) => Some(items),
            _ => None,
        }
    }

    /// Mutable access to sequence elements or container fields.
    pub fn as_items_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Sequence(items) | Value::Container(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Value::Uint(n.into())
    }
}

impl From<u16> for Value {
    fn from(n: u16) -> Self {
        Value::Uint(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Uint(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Uint(n.into())
    }
}

impl From<u128> for Value {
    fn from(n: u128) -> Self {
        Value::Uint(n)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uint256_from_u128() {
        let v = Value::uint256_from_u128(0x0102);
        match v {
            Value::Uint256(bytes) => {
                assert_eq!(bytes[0], 0x02);
                assert_eq!(bytes[1], 0x01);
                assert!(bytes[2..].iter().all(|b| *b == 0));
            }
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_len_and_empty() {
        assert_eq!(Value::Bool(true).len(), None);
        assert!(!Value::Bool(false).is_empty());
        assert!(Value::Sequence(vec![]).is_empty());
        assert_eq!(Value::uints([1, 2, 3]).len(), Some(3));
        assert_eq!(Value::Bytes(vec![0; 4]).len(), Some(4));
    }

    #[test]
    fn test_json_roundtrip() {
        let v = Value::Container(vec![Value::Uint(7), Value::uints([1, 2])]);
        let json = serde_json::to_string(&v).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
