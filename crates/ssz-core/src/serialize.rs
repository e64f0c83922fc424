//! Serialization engine: the fixed/variable section codec.
//!
//! A composite serializes its members in declaration order. Fixed-size
//! members are written inline; each variable-size member contributes a 4-byte
//! offset to the fixed section and its bytes to the variable section:
//!
//! ```text
//! [fixed_0 | offset_1 | fixed_2 | offset_3] [variable_1] [variable_3]
//!                 |                   |      ^            ^
//!                 +-------------------|------+            |
//!                                     +-------------------+
//! ```
//!
//! Offsets are absolute positions within the composite's own serialization,
//! so the first offset always equals the fixed section length. Decoding
//! enforces that, requires offsets to be non-decreasing and in range, and
//! rejects any byte not claimed by some member.

use crate::codec::{decode_offset, encode_offset};
use crate::constants::{MAX_CONTENT_SIZE, OFFSET_SIZE};
use crate::error::{DeserializationError, SchemaError, SerializationError, SszError};
use crate::sedes::{Boolean, Sedes, SszSedes};
use crate::value::Value;

/// Length of the fixed section for members in declaration order.
pub fn fixed_size_section_length<'a, I>(members: I) -> usize
where
    I: IntoIterator<Item = &'a Sedes>,
{
    members
        .into_iter()
        .map(|sedes| sedes.static_size().unwrap_or(OFFSET_SIZE))
        .sum()
}

/// Serialize `(value, sedes)` pairs with the offset scheme.
///
/// No members serialize to the empty string.
pub(crate) fn serialize_members(pairs: &[(&Value, &Sedes)]) -> Result<Vec<u8>, SszError> {
    if pairs.is_empty() {
        return Ok(Vec::new());
    }

    let fixed_len = fixed_size_section_length(pairs.iter().map(|(_, sedes)| *sedes));

    let variable_parts = pairs
        .iter()
        .filter(|(_, sedes)| !sedes.is_fixed_sized())
        .map(|(value, sedes)| sedes.serialize(value))
        .collect::<Result<Vec<_>, _>>()?;

    let variable_len: usize = variable_parts.iter().map(Vec::len).sum();
    let total = fixed_len + variable_len;
    if !variable_parts.is_empty() && total > MAX_CONTENT_SIZE {
        return Err(SerializationError::ContentTooLarge {
            size: total,
            max: MAX_CONTENT_SIZE,
        }
        .into());
    }

    let mut out = Vec::with_capacity(total);
    let mut next_offset = fixed_len;
    let mut parts = variable_parts.iter();
    for (value, sedes) in pairs {
        if sedes.is_fixed_sized() {
            out.extend_from_slice(&sedes.serialize(value)?);
        } else {
            out.extend_from_slice(&encode_offset(next_offset)?);
            // One part was produced per variable member, in the same order.
            next_offset += parts.next().map(Vec::len).unwrap_or(0);
        }
    }
    for part in &variable_parts {
        out.extend_from_slice(part);
    }

    Ok(out)
}

/// Decode the members of a composite with a statically known member list.
pub(crate) fn deserialize_members(
    data: &[u8],
    members: &[&Sedes],
    owner: &str,
) -> Result<Vec<Value>, SszError> {
    let fixed_len = fixed_size_section_length(members.iter().copied());
    if data.len() < fixed_len {
        return Err(DeserializationError::InsufficientBytes {
            sedes: owner.to_string(),
            position: 0,
            expected: fixed_len,
            available: data.len(),
        }
        .into());
    }

    // Walk the fixed section, remembering where each member lives.
    enum Slot {
        Fixed(usize, usize),
        Variable(usize),
    }
    let mut slots = Vec::with_capacity(members.len());
    let mut offsets = Vec::new();
    let mut position = 0;
    for sedes in members {
        match sedes.static_size() {
            Some(size) => {
                slots.push(Slot::Fixed(position, position + size));
                position += size;
            }
            None => {
                slots.push(Slot::Variable(offsets.len()));
                offsets.push(decode_offset(data, position, owner)?);
                position += OFFSET_SIZE;
            }
        }
    }

    if offsets.is_empty() {
        if data.len() > fixed_len {
            return Err(DeserializationError::SuperfluousBytes {
                sedes: owner.to_string(),
                count: data.len() - fixed_len,
            }
            .into());
        }
    } else if offsets[0] != fixed_len {
        return Err(DeserializationError::OffsetMismatch {
            sedes: owner.to_string(),
            offset: offsets[0],
            expected: fixed_len,
        }
        .into());
    }

    let spans = variable_spans(&offsets, data.len(), owner)?;

    members
        .iter()
        .zip(slots)
        .map(|(sedes, slot)| match slot {
            Slot::Fixed(start, end) => sedes
                .deserialize(&data[start..end])
                .map_err(|e| relocate(e, owner, start)),
            Slot::Variable(index) => {
                let (start, end) = spans[index];
                sedes
                    .deserialize(&data[start..end])
                    .map_err(|e| relocate(e, owner, start))
            }
        })
        .collect()
}

/// How many elements a homogeneous sequence may hold.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Count {
    Exact(usize),
    AtMost(usize),
}

/// Decode a vector or list of `element`.
pub(crate) fn deserialize_sequence(
    data: &[u8],
    element: &Sedes,
    count: Count,
    owner: &str,
) -> Result<Vec<Value>, SszError> {
    match element.static_size() {
        Some(size) => deserialize_fixed_elements(data, element, size, count, owner),
        None => deserialize_variable_elements(data, element, count, owner),
    }
}

fn deserialize_fixed_elements(
    data: &[u8],
    element: &Sedes,
    size: usize,
    count: Count,
    owner: &str,
) -> Result<Vec<Value>, SszError> {
    if size == 0 {
        // Zero-sized elements occupy no bytes; only an exact count is meaningful.
        if !data.is_empty() {
            return Err(superfluous(owner, data.len()));
        }
        let n = match count {
            Count::Exact(n) => n,
            Count::AtMost(_) => 0,
        };
        return (0..n).map(|_| element.deserialize(&[])).collect();
    }

    let n = match count {
        Count::Exact(n) => {
            let expected = n
                .checked_mul(size)
                .ok_or_else(|| SchemaError::SizeOverflow(owner.to_string()))?;
            if data.len() < expected {
                return Err(DeserializationError::InsufficientBytes {
                    sedes: owner.to_string(),
                    position: 0,
                    expected,
                    available: data.len(),
                }
                .into());
            }
            if data.len() > expected {
                return Err(superfluous(owner, data.len() - expected));
            }
            n
        }
        Count::AtMost(max) => {
            if data.len() % size != 0 {
                return Err(DeserializationError::MisalignedLength {
                    sedes: owner.to_string(),
                    length: data.len(),
                    element_size: size,
                }
                .into());
            }
            let n = data.len() / size;
            if n > max {
                return Err(too_many(owner, max, n));
            }
            n
        }
    };

    data.chunks_exact(size)
        .take(n)
        .enumerate()
        .map(|(i, bytes)| {
            element
                .deserialize(bytes)
                .map_err(|e| relocate(e, owner, i * size))
        })
        .collect()
}

fn deserialize_variable_elements(
    data: &[u8],
    element: &Sedes,
    count: Count,
    owner: &str,
) -> Result<Vec<Value>, SszError> {
    if data.is_empty() {
        return match count {
            Count::Exact(n) if n > 0 => Err(DeserializationError::InsufficientBytes {
                sedes: owner.to_string(),
                position: 0,
                expected: n * OFFSET_SIZE,
                available: 0,
            }
            .into()),
            _ => Ok(Vec::new()),
        };
    }

    // The first offset marks the end of the offset table.
    let first = decode_offset(data, 0, owner)?;
    if first == 0 || first % OFFSET_SIZE != 0 {
        return Err(DeserializationError::MisalignedOffset {
            sedes: owner.to_string(),
            offset: first,
        }
        .into());
    }
    if first > data.len() {
        return Err(DeserializationError::OffsetOutOfRange {
            sedes: owner.to_string(),
            index: 0,
            offset: first,
            length: data.len(),
        }
        .into());
    }

    let declared = first / OFFSET_SIZE;
    match count {
        Count::Exact(n) if declared != n => {
            return Err(DeserializationError::UnconsumedOffsets {
                sedes: owner.to_string(),
                declared,
                expected: n,
            }
            .into());
        }
        Count::AtMost(max) if declared > max => return Err(too_many(owner, max, declared)),
        _ => {}
    }

    let offsets = (0..declared)
        .map(|i| decode_offset(data, i * OFFSET_SIZE, owner))
        .collect::<Result<Vec<_>, _>>()?;
    let spans = variable_spans(&offsets, data.len(), owner)?;

    spans
        .into_iter()
        .map(|(start, end)| {
            element
                .deserialize(&data[start..end])
                .map_err(|e| relocate(e, owner, start))
        })
        .collect()
}

/// Shift a nested boolean failure to its position within `owner`.
///
/// The innermost composite holding the boolean names itself as the sedes.
fn relocate(err: SszError, owner: &str, start: usize) -> SszError {
    match err {
        SszError::Deserialization(DeserializationError::InvalidBoolean {
            sedes,
            position,
            byte,
        }) => {
            let sedes = if sedes == Boolean.type_name() {
                owner.to_string()
            } else {
                sedes
            };
            DeserializationError::InvalidBoolean {
                sedes,
                position: start + position,
                byte,
            }
            .into()
        }
        other => other,
    }
}

/// Turn consecutive offsets into `(start, end)` spans ending at `total_len`.
///
/// Fails unless every offset is within the data and offsets never decrease.
pub(crate) fn variable_spans(
    offsets: &[usize],
    total_len: usize,
    owner: &str,
) -> Result<Vec<(usize, usize)>, DeserializationError> {
    let mut spans = Vec::with_capacity(offsets.len());
    for (index, &offset) in offsets.iter().enumerate() {
        if offset > total_len {
            return Err(DeserializationError::OffsetOutOfRange {
                sedes: owner.to_string(),
                index,
                offset,
                length: total_len,
            });
        }
        if index > 0 && offset < offsets[index - 1] {
            return Err(DeserializationError::NonMonotonicOffset {
                sedes: owner.to_string(),
                index,
                offset,
                previous: offsets[index - 1],
            });
        }
        let end = offsets.get(index + 1).copied().unwrap_or(total_len);
        spans.push((offset, end.max(offset).min(total_len)));
    }
    Ok(spans)
}

/// Require `data` to be exactly `size` bytes.
pub(crate) fn exact_bytes<'a>(
    data: &'a [u8],
    size: usize,
    owner: &str,
) -> Result<&'a [u8], DeserializationError> {
    if data.len() < size {
        return Err(DeserializationError::InsufficientBytes {
            sedes: owner.to_string(),
            position: 0,
            expected: size,
            available: data.len(),
        });
    }
    if data.len() > size {
        return Err(DeserializationError::SuperfluousBytes {
            sedes: owner.to_string(),
            count: data.len() - size,
        });
    }
    Ok(data)
}

fn superfluous(owner: &str, count: usize) -> SszError {
    DeserializationError::SuperfluousBytes {
        sedes: owner.to_string(),
        count,
    }
    .into()
}

fn too_many(owner: &str, max: usize, actual: usize) -> SszError {
    DeserializationError::TooManyItems {
        sedes: owner.to_string(),
        max,
        actual,
    }
    .into()
}
