//! Proptest generators for property-based testing.
//!
//! [`sedes`] produces nested schemas of bounded depth; [`value_for`] produces
//! values conforming to a given schema. [`sedes_and_value`] pairs them.

use proptest::prelude::*;

use ssz_core::{
    boolean, byte, uint128, uint16, uint256, uint32, uint64, uint8, Sedes, Value,
};

/// Largest list limit and vector length the generators use.
pub const MAX_GENERATED_LENGTH: usize = 6;

/// Generate a basic sedes or a byte list.
pub fn leaf_sedes() -> impl Strategy<Value = Sedes> {
    prop_oneof![
        Just(boolean()),
        Just(byte()),
        Just(uint8()),
        Just(uint16()),
        Just(uint32()),
        Just(uint64()),
        Just(uint128()),
        Just(uint256()),
        (0usize..=40).prop_map(Sedes::byte_vector),
        (0usize..=70).prop_filter_map("invalid byte list", |n| Sedes::byte_list(n).ok()),
    ]
}

/// Generate a schema nested up to three levels deep.
pub fn sedes() -> impl Strategy<Value = Sedes> {
    leaf_sedes().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            (inner.clone(), 0..=MAX_GENERATED_LENGTH)
                .prop_filter_map("invalid vector", |(e, n)| Sedes::vector(e, n).ok()),
            (inner.clone(), 0..=MAX_GENERATED_LENGTH)
                .prop_filter_map("invalid list", |(e, n)| Sedes::list(e, n).ok()),
            prop::collection::vec(inner, 0..4).prop_filter_map("invalid container", |fields| {
                let named: Vec<(String, Sedes)> = fields
                    .into_iter()
                    .enumerate()
                    .map(|(i, s)| (format!("f{}", i), s))
                    .collect();
                Sedes::container(named).ok()
            }),
        ]
    })
}

/// Generate a value conforming to `sedes`.
pub fn value_for(sedes: &Sedes) -> BoxedStrategy<Value> {
    match sedes {
        Sedes::Boolean(_) => any::<bool>().prop_map(Value::Bool).boxed(),
        Sedes::UInt(u) if u.bits() == 256 => any::<[u8; 32]>().prop_map(Value::Uint256).boxed(),
        Sedes::UInt(u) => {
            let bits = u.bits();
            any::<u128>()
                .prop_map(move |n| {
                    if bits >= 128 {
                        Value::Uint(n)
                    } else {
                        Value::Uint(n & ((1u128 << bits) - 1))
                    }
                })
                .boxed()
        }
        Sedes::Byte(_) => any::<u8>().prop_map(|b| Value::Bytes(vec![b])).boxed(),
        Sedes::ByteVector(bv) => prop::collection::vec(any::<u8>(), bv.size())
            .prop_map(Value::Bytes)
            .boxed(),
        Sedes::ByteList(bl) => prop::collection::vec(any::<u8>(), 0..=bl.max_length())
            .prop_map(Value::Bytes)
            .boxed(),
        Sedes::Vector(v) => prop::collection::vec(value_for(v.element()), v.length())
            .prop_map(Value::Sequence)
            .boxed(),
        Sedes::List(l) => prop::collection::vec(value_for(l.element()), 0..=l.max_length())
            .prop_map(Value::Sequence)
            .boxed(),
        Sedes::Container(c) => c
            .fields()
            .iter()
            .map(|(_, field)| value_for(field))
            .collect::<Vec<_>>()
            .prop_map(Value::Container)
            .boxed(),
    }
}

/// Generate a schema together with a conforming value.
pub fn sedes_and_value() -> impl Strategy<Value = (Sedes, Value)> {
    sedes().prop_flat_map(|s| {
        let values = value_for(&s);
        (Just(s), values)
    })
}

/// Generate a list of byte lists: the simplest shape with an offset table.
pub fn nested_lists() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..12), 0..8)
}
