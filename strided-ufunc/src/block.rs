//! Tile sizes for blocked iteration.
//!
//! Blocked traversal tiles every dimension with the same edge length, chosen
//! so that one tile row of the widest element type spans a cache line.

use crate::dtype::DType;
use crate::{BLOCK_SIZE_IN_BYTES, BLOCK_SIZE_IN_ELEMENTS};

/// Tile edge length (in elements) for a set of arrays.
///
/// When no array has a known element size (all `generic`), falls back to
/// [`BLOCK_SIZE_IN_ELEMENTS`].
pub(crate) fn block_size(dtypes: &[DType]) -> usize {
    let widest = dtypes
        .iter()
        .filter_map(|dt| dt.bytes_per_element())
        .max();
    match widest {
        Some(nbytes) => (BLOCK_SIZE_IN_BYTES / nbytes).max(1),
        None => BLOCK_SIZE_IN_ELEMENTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_size() {
        assert_eq!(block_size(&[DType::Float64, DType::Float64]), 8);
        assert_eq!(block_size(&[DType::Float32, DType::Int8]), 16);
        assert_eq!(block_size(&[DType::Uint8, DType::Complex128]), 4);
        assert_eq!(block_size(&[DType::Generic, DType::Generic]), BLOCK_SIZE_IN_ELEMENTS);
        assert_eq!(block_size(&[DType::Generic, DType::Int16]), 32);
    }
}
