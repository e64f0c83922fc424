//! Low-level byte helpers: offsets and chunk packing.
//!
//! Offsets are little-endian `u32` values. Packing concatenates serialized
//! basic values and cuts the result into zero-padded 32-byte chunks.

use crate::constants::{CHUNK_SIZE, MAX_CONTENT_SIZE, OFFSET_SIZE};
use crate::error::{DeserializationError, SerializationError};
use crate::hash::Chunk;

/// Encode an offset as 4 little-endian bytes.
pub fn encode_offset(offset: usize) -> Result<[u8; OFFSET_SIZE], SerializationError> {
    if offset > MAX_CONTENT_SIZE {
        return Err(SerializationError::ContentTooLarge {
            size: offset,
            max: MAX_CONTENT_SIZE,
        });
    }
    Ok((offset as u32).to_le_bytes())
}

/// Decode the offset stored at `position` in `data`.
///
/// `sedes` names the enclosing type for error context.
pub fn decode_offset(
    data: &[u8],
    position: usize,
    sedes: &str,
) -> Result<usize, DeserializationError> {
    let end = position + OFFSET_SIZE;
    let bytes = data
        .get(position..end)
        .ok_or_else(|| DeserializationError::InsufficientBytes {
            sedes: sedes.to_string(),
            position,
            expected: OFFSET_SIZE,
            available: data.len().saturating_sub(position),
        })?;
    let mut arr = [0u8; OFFSET_SIZE];
    arr.copy_from_slice(bytes);
    Ok(u32::from_le_bytes(arr) as usize)
}

/// Smallest power of two that is `>= n` (1 for `n == 0`).
pub fn get_next_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// Depth of a binary tree with `leaves` leaves after power-of-two padding.
pub fn tree_depth(leaves: usize) -> usize {
    if leaves <= 1 {
        0
    } else {
        (usize::BITS - (leaves - 1).leading_zeros()) as usize
    }
}

/// Number of chunks needed to hold `bytes` bytes.
pub fn chunks_for_bytes(bytes: usize) -> usize {
    bytes.div_ceil(CHUNK_SIZE)
}

/// Pack a contiguous byte string into zero-padded chunks.
///
/// Empty input produces no chunks.
pub fn pack_bytes(bytes: &[u8]) -> Vec<Chunk> {
    bytes.chunks(CHUNK_SIZE).map(Chunk::from_slice_padded).collect()
}

/// Pack serialized basic values into chunks.
pub fn pack<I, B>(serialized: I) -> Vec<Chunk>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut buf = Vec::new();
    for part in serialized {
        buf.extend_from_slice(part.as_ref());
    }
    pack_bytes(&buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_roundtrip() {
        let encoded = encode_offset(12).unwrap();
        assert_eq!(encoded, [0x0c, 0, 0, 0]);
        assert_eq!(decode_offset(&encoded, 0, "test").unwrap(), 12);
    }

    #[test]
    fn test_offset_too_large() {
        assert!(encode_offset(MAX_CONTENT_SIZE).is_ok());
        assert!(matches!(
            encode_offset(MAX_CONTENT_SIZE + 1),
            Err(SerializationError::ContentTooLarge { .. })
        ));
    }

    #[test]
    fn test_decode_offset_truncated() {
        let err = decode_offset(&[1, 2, 3], 0, "List(uint8, 4)").unwrap_err();
        assert_eq!(
            err,
            DeserializationError::InsufficientBytes {
                sedes: "List(uint8, 4)".into(),
                position: 0,
                expected: 4,
                available: 3,
            }
        );
    }

    #[test]
    fn test_next_power_of_two() {
        assert_eq!(get_next_power_of_two(0), 1);
        assert_eq!(get_next_power_of_two(1), 1);
        assert_eq!(get_next_power_of_two(3), 4);
        assert_eq!(get_next_power_of_two(8), 8);
        assert_eq!(get_next_power_of_two(9), 16);
    }

    #[test]
    fn test_tree_depth() {
        assert_eq!(tree_depth(0), 0);
        assert_eq!(tree_depth(1), 0);
        assert_eq!(tree_depth(2), 1);
        assert_eq!(tree_depth(5), 3);
        assert_eq!(tree_depth(1 << 40), 40);
        assert_eq!(tree_depth(usize::MAX), usize::BITS as usize);
    }

    #[test]
    fn test_pack_empty() {
        assert!(pack(Vec::<Vec<u8>>::new()).is_empty());
        assert!(pack_bytes(&[]).is_empty());
    }

    #[test]
    fn test_pack_pads_last_chunk() {
        let values: Vec<[u8; 8]> = (1u64..=5).map(|v| v.to_le_bytes()).collect();
        let chunks = pack(&values);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].0[0], 1);
        assert_eq!(chunks[0].0[24], 4);
        assert_eq!(chunks[1].0[0], 5);
        assert!(chunks[1].0[8..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_chunks_for_bytes() {
        assert_eq!(chunks_for_bytes(0), 0);
        assert_eq!(chunks_for_bytes(1), 1);
        assert_eq!(chunks_for_bytes(32), 1);
        assert_eq!(chunks_for_bytes(96), 3);
        assert_eq!(chunks_for_bytes(97), 4);
    }
}
