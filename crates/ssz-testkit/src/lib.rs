//! # SSZ Testkit
//!
//! Testing utilities for SSZ.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known schemas and values with expected roots for cross-implementation verification
//! - **Generators**: Proptest strategies for schemas and conforming values
//! - **Fixtures**: A validator-registry state schema for realistic re-hashing workloads
//!
//! ## Golden Vectors
//!
//! ```rust
//! use ssz_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, root) in verify_all_vectors() {
//!     assert!(matches, "{}: {}", name, root);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use ssz_core::SszSedes;
//! use ssz_testkit::generators::sedes_and_value;
//!
//! proptest! {
//!     #[test]
//!     fn roundtrip((sedes, value) in sedes_and_value()) {
//!         let bytes = sedes.serialize(&value).unwrap();
//!         prop_assert_eq!(sedes.deserialize(&bytes).unwrap(), value);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use ssz::HashSession;
//! use ssz_testkit::fixtures::{update_state, StateSchema};
//!
//! let schema = StateSchema::new(64).unwrap();
//! let mut state = schema.make_state(8);
//! let mut session = HashSession::default();
//! session.hash_tree_root(&state, &schema.state).unwrap();
//!
//! update_state(&mut state, 2);
//! session.hash_tree_root(&state, &schema.state).unwrap();
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{make_validator, update_state, StateSchema};
pub use generators::{sedes, sedes_and_value, value_for};
pub use vectors::{
    all_vectors, compute_vector, export_json, verify_all_vectors, ExportError, GoldenVector,
    VectorRecord,
};
