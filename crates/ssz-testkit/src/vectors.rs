//! Golden test vectors for deterministic verification.
//!
//! These vectors pin serialization and SHA-256 hash tree roots so that any
//! implementation can be checked against the same expected outputs.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ssz_core::{
    boolean, bytes48, uint64, SchemaError, Sedes, SszError, SszSedes, Value,
};

use crate::fixtures::{update_state, StateSchema};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Builds the schema.
    pub sedes: fn() -> Result<Sedes, SchemaError>,
    /// Builds the value.
    pub value: fn() -> Value,
    /// Expected hash tree root (hex).
    pub expected_root: &'static str,
}

/// Serializable form of a computed vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub name: String,
    pub sedes: String,
    pub serialized: String,
    pub root: String,
}

fn small_state_schema() -> Result<StateSchema, SchemaError> {
    StateSchema::new(64)
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "uint64 zero",
            sedes: || Ok(uint64()),
            value: || Value::Uint(0),
            expected_root: "0000000000000000000000000000000000000000000000000000000000000000",
        },
        GoldenVector {
            name: "Container with offset list",
            sedes: || Sedes::container(vec![("a", uint64()), ("b", Sedes::list(uint64(), 3)?)]),
            value: || Value::Container(vec![Value::Uint(7), Value::uints([1, 2, 3])]),
            expected_root: "71843719a51a393d34eac5d52f0739e14a17d28efdb7a2a1bb5b79a75cc2ac79",
        },
        GoldenVector {
            name: "Empty uint64 list",
            sedes: || Sedes::list(uint64(), 16),
            value: || Value::uints([]),
            expected_root: "28ba1834a3a7b657460ce79fa3a1d909ab8828fd557659d4d0554a9bdbc0ec30",
        },
        GoldenVector {
            name: "bytes48 spanning two chunks",
            sedes: || Ok(bytes48()),
            value: || Value::Bytes(vec![0x01; 48]),
            expected_root: "5a3a7764ba9cf1b19f5a4db8a2845ab72254d4741ff63a5b1bb4e3aec968ad07",
        },
        GoldenVector {
            name: "ByteList hello",
            sedes: || Sedes::byte_list(64),
            value: || Value::Bytes(b"hello".to_vec()),
            expected_root: "9c50f3d2c4de4a481e39dfddc07abe48ec9324673d72c3c3cce72dadbcf8298a",
        },
        GoldenVector {
            name: "Packed boolean list",
            sedes: || Sedes::list(boolean(), 32),
            value: || Value::Sequence(vec![Value::Bool(true), Value::Bool(false), Value::Bool(true)]),
            expected_root: "cd8c2af2680d6bfb5e37066f5f36ac305da4f776c7d2176acd563cd90902d820",
        },
        GoldenVector {
            name: "Fresh validator",
            sedes: || small_state_schema().map(|s| s.validator),
            value: || crate::fixtures::make_validator(0),
            expected_root: "fa324a462bcb0f10c24c9e17c326a4e0ebad204feced523eccaf346c686f06ee",
        },
        GoldenVector {
            name: "Registry state of 16 validators",
            sedes: || small_state_schema().map(|s| s.state),
            value: || {
                small_state_schema()
                    .map(|s| s.make_state(16))
                    .unwrap_or(Value::Bool(false))
            },
            expected_root: "ddc88826c381277d638b5a07a0aced86a71b91e20f83eb4899f8aed48023c62f",
        },
        GoldenVector {
            name: "Registry state after update at index 3",
            sedes: || small_state_schema().map(|s| s.state),
            value: || {
                let mut state = small_state_schema()
                    .map(|s| s.make_state(16))
                    .unwrap_or(Value::Bool(false));
                update_state(&mut state, 3);
                state
            },
            expected_root: "1475cec860d2e2be764536900a811fc48cff71e7cac9a01c62aea738603f40e5",
        },
    ]
}

/// Compute the serialization and root of a vector.
pub fn compute_vector(vector: &GoldenVector) -> Result<VectorRecord, SszError> {
    let sedes = (vector.sedes)()?;
    let value = (vector.value)();
    let serialized = sedes.serialize(&value)?;
    let root = sedes.hash_tree_root(&value)?;
    Ok(VectorRecord {
        name: vector.name.to_string(),
        sedes: sedes.type_name().to_string(),
        serialized: hex::encode(serialized),
        root: root.to_hex(),
    })
}

/// Verify all golden vectors against their expected roots.
///
/// Returns `(name, matches, computed root or error)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| match compute_vector(v) {
            Ok(record) => {
                let matches = record.root == v.expected_root;
                (v.name.to_string(), matches, record.root)
            }
            Err(e) => (v.name.to_string(), false, e.to_string()),
        })
        .collect()
}

/// Failure to export the vector table.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("vector computation failed: {0}")]
    Ssz(#[from] SszError),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// All computed vectors as pretty-printed JSON.
pub fn export_json() -> Result<String, ExportError> {
    let records = all_vectors()
        .iter()
        .map(compute_vector)
        .collect::<Result<Vec<_>, _>>()?;
    export_records(&records)
}

/// Pretty-printed JSON for already computed records.
pub fn export_records(records: &[VectorRecord]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}
