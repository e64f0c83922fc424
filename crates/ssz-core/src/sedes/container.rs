//! `Container`: an ordered record of named, heterogeneous fields.

use std::collections::HashSet;

use crate::cache::HashCache;
use crate::constants::OFFSET_SIZE;
use crate::error::{SchemaError, SerializationError, SszError};
use crate::hash::{Chunk, Hasher};
use crate::merkle::merkleize_for;
use crate::serialize::{deserialize_members, serialize_members};
use crate::value::Value;

use super::{element_root, mismatch, Sedes, SszSedes};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    fields: Vec<(String, Sedes)>,
    name: String,
    fixed_size: Option<usize>,
}

impl Container {
    /// Build a container from `(name, sedes)` pairs in declaration order.
    ///
    /// Field names must be unique. An empty field list is allowed and
    /// describes a zero-sized type.
    pub fn new<N: Into<String>>(fields: Vec<(N, Sedes)>) -> Result<Self, SchemaError> {
        let fields: Vec<(String, Sedes)> = fields
            .into_iter()
            .map(|(name, sedes)| (name.into(), sedes))
            .collect();

        let mut seen = HashSet::new();
        for (name, _) in &fields {
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateField(name.clone()));
            }
        }

        let described: Vec<String> = fields
            .iter()
            .map(|(name, sedes)| format!("{}: {}", name, sedes.type_name()))
            .collect();
        let name = format!("Container({})", described.join(", "));

        let overflow = || SchemaError::SizeOverflow(name.clone());
        let mut fixed_size = Some(0usize);
        let mut section_length = 0usize;
        for (_, sedes) in &fields {
            let size = sedes.static_size();
            section_length = section_length
                .checked_add(size.unwrap_or(OFFSET_SIZE))
                .ok_or_else(overflow)?;
            fixed_size = match (fixed_size, size) {
                (Some(total), Some(size)) => Some(total.checked_add(size).ok_or_else(overflow)?),
                _ => None,
            };
        }

        Ok(Self {
            fields,
            name,
            fixed_size,
        })
    }

    pub fn fields(&self) -> &[(String, Sedes)] {
        &self.fields
    }

    /// Position of the field called `name`.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(field, _)| field == name)
    }

    fn values<'a>(&self, value: &'a Value) -> Result<&'a [Value], SszError> {
        let values = match value {
            Value::Container(values) => values,
            other => return Err(mismatch(&self.name, "container", other)),
        };
        if values.len() != self.fields.len() {
            return Err(SerializationError::LengthMismatch {
                sedes: self.name.clone(),
                expected: self.fields.len(),
                actual: values.len(),
            }
            .into());
        }
        Ok(values)
    }
}

impl SszSedes for Container {
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
        let pairs: Vec<(&Value, &Sedes)> = self
            .values(value)?
            .iter()
            .zip(self.fields.iter().map(|(_, sedes)| sedes))
            .collect();
        serialize_members(&pairs)
    }

    fn deserialize(&self, data: &[u8]) -> Result<Value, SszError> {
        let members: Vec<&Sedes> = self.fields.iter().map(|(_, sedes)| sedes).collect();
        deserialize_members(data, &members, &self.name).map(Value::Container)
    }

    fn hash_tree_root_with_cache<H: Hasher>(
        &self,
        value: &Value,
        cache: &mut HashCache<H>,
    ) -> Result<Chunk, SszError> {
        let leaves = self
            .values(value)?
            .iter()
            .zip(&self.fields)
            .map(|(field, (_, sedes))| element_root(sedes, field, cache))
            .collect::<Result<Vec<_>, _>>()?;
        merkleize_for(&leaves, None, cache, &self.name)
    }

    fn chunk_count(&self) -> usize {
        self.fields.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Sha256Hasher;
    use crate::sedes::{boolean, bytes32, uint16, uint64, uint8};

    fn pair() -> Container {
        Container::new(vec![
            ("a", uint64()),
            ("b", Sedes::list(uint64(), 3).unwrap()),
        ])
        .unwrap()
    }

    #[test]
    fn test_fixed_size_overflow_rejected() {
        let wide = Sedes::vector(uint64(), 1 << 60).unwrap();
        let err = Container::new(vec![("a", wide.clone()), ("b", wide.clone())]).unwrap_err();
        assert!(matches!(err, SchemaError::SizeOverflow(_)));

        let list = Sedes::list(uint8(), 4).unwrap();
        // Fixed fields fit; the offset for the list does not.
        let half = Sedes::byte_vector(usize::MAX / 2);
        let err = Container::new(vec![("a", half.clone()), ("b", half), ("c", list)]).unwrap_err();
        assert!(matches!(err, SchemaError::SizeOverflow(_)));

        assert_eq!(
            Container::new(vec![("a", wide), ("b", uint8())])
                .unwrap()
                .fixed_size()
                .unwrap(),
            (1 << 63) + 1
        );
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = Container::new(vec![("x", uint8()), ("x", uint16())]).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateField("x".into()));
    }

    #[test]
    fn test_field_index() {
        let c = pair();
        assert_eq!(c.field_index("b"), Some(1));
        assert_eq!(c.field_index("z"), None);
        assert_eq!(c.chunk_count(), 2);
    }

    #[test]
    fn test_offset_layout() {
        let c = pair();
        let value = Value::Container(vec![Value::Uint(7), Value::uints([1, 2, 3])]);
        let bytes = c.serialize(&value).unwrap();

        let mut expected = vec![7, 0, 0, 0, 0, 0, 0, 0, 12, 0, 0, 0];
        for n in 1u64..=3 {
            expected.extend_from_slice(&n.to_le_bytes());
        }
        assert_eq!(bytes, expected);
        assert_eq!(bytes.len(), 36);
        assert_eq!(c.deserialize(&bytes).unwrap(), value);
    }

    #[test]
    fn test_wrong_field_count() {
        let c = pair();
        assert!(matches!(
            c.serialize(&Value::Container(vec![Value::Uint(1)])),
            Err(SszError::Serialization(SerializationError::LengthMismatch { .. }))
        ));
        assert!(c.serialize(&Value::uints([1, 2])).is_err());
    }

    #[test]
    fn test_fixed_container_root() {
        let c = Container::new(vec![("flag", boolean()), ("root", bytes32())]).unwrap();
        let value = Value::Container(vec![Value::Bool(true), Value::Bytes(vec![9; 32])]);
        let mut flag = [0u8; 32];
        flag[0] = 1;
        let expected = Sha256Hasher.hash_pair(&Chunk(flag), &Chunk([9; 32]));
        assert_eq!(c.hash_tree_root(&value).unwrap(), expected);
        assert_eq!(c.fixed_size().unwrap(), 33);
    }

    #[test]
    fn test_empty_container() {
        let c = Container::new(Vec::<(String, Sedes)>::new()).unwrap();
        let value = Value::Container(vec![]);
        assert_eq!(c.type_name(), "Container()");
        assert!(c.serialize(&value).unwrap().is_empty());
        assert_eq!(c.deserialize(&[]).unwrap(), value);
        assert_eq!(c.hash_tree_root(&value).unwrap(), Chunk::ZERO);
    }

    #[test]
    fn test_identical_nested_values_share_cache_entry() {
        let inner = Sedes::Container(pair());
        let outer = Container::new(vec![("x", inner.clone()), ("y", inner)]).unwrap();
        let same = Value::Container(vec![Value::Uint(7), Value::uints([1, 2, 3])]);
        let value = Value::Container(vec![same.clone(), same]);

        let mut cache = HashCache::new();
        let root = outer.hash_tree_root_with_cache(&value, &mut cache).unwrap();
        assert_eq!(root, outer.hash_tree_root(&value).unwrap());
        // The inner List(uint64, 3) and the inner container each get one entry.
        assert_eq!(cache.root_count(), 2);
    }
}
