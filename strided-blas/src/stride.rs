//! Stride/offset addressing for flat buffers.
//!
//! A strided view of `n` elements visits indices `offset + k*stride` for
//! `k in 0..n`. Conventional entry points derive `offset` from the stride
//! sign with [`stride2offset`]; the `_ndarray` variants take it explicitly.

/// Starting index for a conventional strided view.
///
/// Positive (and zero) strides start at the front of the buffer; negative
/// strides start at `(1 - n) * stride` so the walk ends at index 0.
///
/// ```rust
/// use strided_blas::stride::stride2offset;
///
/// assert_eq!(stride2offset(4, 2), 0);
/// assert_eq!(stride2offset(4, -2), 6);
/// assert_eq!(stride2offset(0, -2), 0);
/// ```
#[inline]
pub fn stride2offset(n: usize, stride: isize) -> usize {
    if stride < 0 && n > 0 {
        ((1 - n as isize) * stride) as usize
    } else {
        0
    }
}

/// Iterator over the `n` linear indices of a strided view, in logical order.
#[derive(Debug, Clone)]
pub struct StridedIndices {
    next: isize,
    stride: isize,
    remaining: usize,
}

impl StridedIndices {
    pub fn new(n: usize, stride: isize, offset: usize) -> Self {
        Self {
            next: offset as isize,
            stride,
            remaining: n,
        }
    }

    /// Indices for a conventional view (offset derived from the stride).
    pub fn conventional(n: usize, stride: isize) -> Self {
        Self::new(n, stride, stride2offset(n, stride))
    }
}

impl Iterator for StridedIndices {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.next as usize;
        self.next += self.stride;
        self.remaining -= 1;
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for StridedIndices {}

/// Debug-only check that a strided view fits its buffer.
#[inline(always)]
pub(crate) fn debug_check_view(len: usize, n: usize, stride: isize, offset: usize) {
    if cfg!(debug_assertions) && n > 0 {
        let last = offset as isize + (n as isize - 1) * stride;
        debug_assert!(
            (offset < len) && last >= 0 && (last as usize) < len,
            "strided view out of bounds: n={n} stride={stride} offset={offset} len={len}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stride2offset() {
        assert_eq!(stride2offset(5, 1), 0);
        assert_eq!(stride2offset(5, -1), 4);
        assert_eq!(stride2offset(3, -3), 6);
        assert_eq!(stride2offset(3, 0), 0);
        assert_eq!(stride2offset(1, -7), 0);
    }

    #[test]
    fn test_indices_positive_negative_zero() {
        assert_eq!(StridedIndices::new(3, 2, 1).collect::<Vec<_>>(), vec![1, 3, 5]);
        assert_eq!(StridedIndices::conventional(3, -2).collect::<Vec<_>>(), vec![4, 2, 0]);
        assert_eq!(StridedIndices::new(3, 0, 2).collect::<Vec<_>>(), vec![2, 2, 2]);
        assert_eq!(StridedIndices::new(0, 1, 0).len(), 0);
    }

    #[test]
    fn test_negative_stride_is_reversed_positive() {
        let fwd: Vec<usize> = StridedIndices::conventional(6, 2).collect();
        let mut bwd: Vec<usize> = StridedIndices::conventional(6, -2).collect();
        bwd.reverse();
        assert_eq!(fwd, bwd);
    }
}
