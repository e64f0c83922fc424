//! Error types for SSZ Core.

use thiserror::Error;

/// A value cannot be represented under the given sedes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializationError {
    #[error("{sedes} expects a {expected} value, got {actual}")]
    TypeMismatch {
        sedes: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("integer without a declared width: a uint sedes must be specified")]
    UntypedInteger,

    #[error("cannot infer a sedes for a {0} value")]
    CannotInfer(&'static str),

    #[error("value {value} does not fit in {bits} bits")]
    IntegerOverflow { value: u128, bits: u16 },

    #[error("{sedes} expects {expected} items, got {actual}")]
    LengthMismatch {
        sedes: String,
        expected: usize,
        actual: usize,
    },

    #[error("{sedes} holds at most {max} items, got {actual}")]
    TooManyItems {
        sedes: String,
        max: usize,
        actual: usize,
    },

    #[error("serialized size {size} exceeds the offset range ({max} bytes)")]
    ContentTooLarge { size: usize, max: usize },
}

/// Bytes cannot be decoded under the given sedes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeserializationError {
    #[error("{sedes} needs {expected} bytes at offset {position}, only {available} available")]
    InsufficientBytes {
        sedes: String,
        position: usize,
        expected: usize,
        available: usize,
    },

    #[error("{sedes}: got {count} superfluous bytes")]
    SuperfluousBytes { sedes: String, count: usize },

    #[error("{sedes}: invalid boolean byte 0x{byte:02x} at offset {position}")]
    InvalidBoolean {
        sedes: String,
        position: usize,
        byte: u8,
    },

    #[error("{sedes}: data length {length} is not a multiple of element size {element_size}")]
    MisalignedLength {
        sedes: String,
        length: usize,
        element_size: usize,
    },

    #[error("{sedes}: first offset {offset} does not match fixed section length {expected}")]
    OffsetMismatch {
        sedes: String,
        offset: usize,
        expected: usize,
    },

    #[error("{sedes}: first offset {offset} is not a positive multiple of the offset size")]
    MisalignedOffset { sedes: String, offset: usize },

    #[error("{sedes}: offset {offset} at index {index} precedes previous offset {previous}")]
    NonMonotonicOffset {
        sedes: String,
        index: usize,
        offset: usize,
        previous: usize,
    },

    #[error("{sedes}: offset {offset} at index {index} is beyond data length {length}")]
    OffsetOutOfRange {
        sedes: String,
        index: usize,
        offset: usize,
        length: usize,
    },

    #[error("{sedes}: offset table declares {declared} entries, expected {expected}")]
    UnconsumedOffsets {
        sedes: String,
        declared: usize,
        expected: usize,
    },

    #[error("{sedes} holds at most {max} items, data encodes {actual}")]
    TooManyItems {
        sedes: String,
        max: usize,
        actual: usize,
    },

    #[error("input of {size} bytes exceeds the decode limit of {max} bytes")]
    InputTooLarge { size: usize, max: usize },
}

/// A sedes cannot be constructed or queried as requested.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("unsupported integer width: {0} bits")]
    UnsupportedWidth(u16),

    #[error("{0} is not fixed-sized")]
    NotFixedSize(String),

    #[error("{0}: serialized size overflows usize")]
    SizeOverflow(String),

    #[error("{0}: list elements must not be zero-sized")]
    ZeroSizedElement(String),

    #[error("duplicate container field: {0}")]
    DuplicateField(String),

    #[error("{sedes} needs a tree depth of {depth}, zero-hash table covers {max}")]
    TreeTooDeep {
        sedes: String,
        depth: usize,
        max: usize,
    },
}

/// Any failure surfaced by the SSZ engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SszError {
    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),

    #[error("deserialization error: {0}")]
    Deserialization(#[from] DeserializationError),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}
