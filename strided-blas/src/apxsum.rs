//! Sums of `alpha + x[i]` over a strided view.
//!
//! The added constant is applied per element before accumulation, so the
//! result equals `sum(x) + n*alpha` in exact arithmetic but rounds the way
//! an element-wise shift would.

use num_traits::Float;

use crate::cusum::BLOCKSIZE;
use crate::stride::{debug_check_view, stride2offset};

// ============================================================================
// Pairwise
// ============================================================================

/// Sum `alpha + x[i]` using pairwise summation.
///
/// ```rust
/// use strided_blas::gapxsumpw;
///
/// let x = [1.0, -2.0, 2.0];
/// assert_eq!(gapxsumpw(3, 5.0, &x, 1), 16.0);
/// ```
pub fn gapxsumpw<T: Float>(n: usize, alpha: T, x: &[T], stride_x: isize) -> T {
    gapxsumpw_ndarray(n, alpha, x, stride_x, stride2offset(n, stride_x))
}

/// [`gapxsumpw`] with an explicit starting offset.
pub fn gapxsumpw_ndarray<T: Float>(
    n: usize,
    alpha: T,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
) -> T {
    if n == 0 {
        return T::zero();
    }
    if n == 1 || stride_x == 0 {
        return from_len::<T>(n) * (alpha + x[offset_x]);
    }
    debug_check_view(x.len(), n, stride_x, offset_x);
    apxsumpw_block(n, alpha, x, stride_x, offset_x as isize)
}

#[inline]
fn from_len<T: Float>(n: usize) -> T {
    T::from(n).unwrap_or_else(T::infinity)
}

fn apxsumpw_block<T: Float>(n: usize, alpha: T, x: &[T], stride_x: isize, offset_x: isize) -> T {
    let at = |ix: isize| alpha + x[ix as usize];

    if n < 8 {
        let mut s = T::zero();
        let mut ix = offset_x;
        for _ in 0..n {
            s = s + at(ix);
            ix += stride_x;
        }
        return s;
    }

    if n <= BLOCKSIZE {
        // Eight interleaved accumulators, combined as a balanced tree
        let mut ix = offset_x;
        let mut acc = [T::zero(); 8];
        for (k, a) in acc.iter_mut().enumerate() {
            *a = at(ix + k as isize * stride_x);
        }
        ix += 8 * stride_x;
        let m = n - n % 8;
        let mut i = 8;
        while i < m {
            for (k, a) in acc.iter_mut().enumerate() {
                *a = *a + at(ix + k as isize * stride_x);
            }
            ix += 8 * stride_x;
            i += 8;
        }
        let mut s = ((acc[0] + acc[1]) + (acc[2] + acc[3])) + ((acc[4] + acc[5]) + (acc[6] + acc[7]));
        while i < n {
            s = s + at(ix);
            ix += stride_x;
            i += 1;
        }
        return s;
    }

    // Split at a multiple of 8 so both halves keep the unrolled shape
    let half = n / 2;
    let half = half - half % 8;
    apxsumpw_block(half, alpha, x, stride_x, offset_x)
        + apxsumpw_block(n - half, alpha, x, stride_x, offset_x + half as isize * stride_x)
}

/// Sum `alpha + x[i]` with the default algorithm (pairwise).
pub fn gapxsum<T: Float>(n: usize, alpha: T, x: &[T], stride_x: isize) -> T {
    gapxsumpw(n, alpha, x, stride_x)
}

/// [`gapxsum`] with an explicit starting offset.
pub fn gapxsum_ndarray<T: Float>(
    n: usize,
    alpha: T,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
) -> T {
    gapxsumpw_ndarray(n, alpha, x, stride_x, offset_x)
}

/// Pairwise sum of `x` (no added constant).
pub fn gsumpw<T: Float>(n: usize, x: &[T], stride_x: isize) -> T {
    gapxsumpw(n, T::zero(), x, stride_x)
}

// ============================================================================
// Kahan-Babuska-Neumaier
// ============================================================================

/// Sum `alpha + x[i]` using Kahan-Babuska-Neumaier compensated summation.
pub fn gapxsumkbn<T: Float>(n: usize, alpha: T, x: &[T], stride_x: isize) -> T {
    gapxsumkbn_ndarray(n, alpha, x, stride_x, stride2offset(n, stride_x))
}

/// [`gapxsumkbn`] with an explicit starting offset.
pub fn gapxsumkbn_ndarray<T: Float>(
    n: usize,
    alpha: T,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
) -> T {
    if n == 0 {
        return T::zero();
    }
    if n == 1 || stride_x == 0 {
        return from_len::<T>(n) * (alpha + x[offset_x]);
    }
    debug_check_view(x.len(), n, stride_x, offset_x);

    let mut sum = T::zero();
    let mut c = T::zero();
    let mut ix = offset_x as isize;
    for _ in 0..n {
        let v = alpha + x[ix as usize];
        let t = sum + v;
        if sum.abs() >= v.abs() {
            c = c + ((sum - t) + v);
        } else {
            c = c + ((v - t) + sum);
        }
        sum = t;
        ix += stride_x;
    }
    sum + c
}

// ============================================================================
// Typed aliases
// ============================================================================

/// Single-precision [`gapxsum`].
pub fn sapxsum(n: usize, alpha: f32, x: &[f32], stride_x: isize) -> f32 {
    gapxsum(n, alpha, x, stride_x)
}

/// Single-precision [`gapxsum_ndarray`].
pub fn sapxsum_ndarray(n: usize, alpha: f32, x: &[f32], stride_x: isize, offset_x: usize) -> f32 {
    gapxsum_ndarray(n, alpha, x, stride_x, offset_x)
}

/// Double-precision [`gapxsum`].
pub fn dapxsum(n: usize, alpha: f64, x: &[f64], stride_x: isize) -> f64 {
    gapxsum(n, alpha, x, stride_x)
}

/// Double-precision [`gapxsum_ndarray`].
pub fn dapxsum_ndarray(n: usize, alpha: f64, x: &[f64], stride_x: isize, offset_x: usize) -> f64 {
    gapxsum_ndarray(n, alpha, x, stride_x, offset_x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_small_examples() {
        let x = [1.0f64, -2.0, 3.0, -4.0, 5.0, -6.0];
        assert_eq!(dapxsum(3, 5.0, &x, 2), 24.0);
        assert_eq!(dapxsum(3, 0.0, &x, -2), 9.0);
        assert_eq!(dapxsum_ndarray(2, 1.0, &x, 1, 4), 1.0);
        assert_eq!(sapxsum(4, 0.5, &[1.0f32, 2.0, 3.0, 4.0], 1), 12.0);
    }

    #[test]
    fn test_degenerate_lengths_and_zero_stride() {
        let x = [2.0f64, 9.0];
        assert_eq!(gapxsum(0, 1.0, &x, 1), 0.0);
        assert_eq!(gapxsum(1, 1.0, &x, 1), 3.0);
        assert_eq!(gapxsum(5, 1.0, &x, 0), 15.0);
        assert_eq!(gapxsumkbn(5, 1.0, &x, 0), 15.0);
        assert_eq!(gapxsumkbn(0, 1.0, &x, 1), 0.0);
    }

    #[test]
    fn test_unrolled_and_recursive_sizes() {
        for n in [7usize, 8, 9, 15, 16, 17, 127, 128, 129, 1000, 1031] {
            let x: Vec<f64> = (0..n).map(|i| (i % 13) as f64 - 6.0).collect();
            let naive: f64 = x.iter().map(|v| v + 0.25).sum();
            assert_relative_eq!(gapxsumpw(n, 0.25, &x, 1), naive, epsilon = 1e-9);
            assert_relative_eq!(gapxsumkbn(n, 0.25, &x, 1), naive, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_nan_propagates() {
        let mut x = vec![1.0f64; 300];
        x[211] = f64::NAN;
        assert!(gapxsumpw(300, 0.0, &x, 1).is_nan());
        assert!(gapxsumkbn(300, 0.0, &x, -1).is_nan());
    }

    #[test]
    fn test_kbn_compensates() {
        let x = [1.0f64, 1e100, 1.0, -1e100];
        assert_eq!(gapxsumkbn(4, 0.0, &x, 1), 2.0);
    }

    #[test]
    fn test_sumpw() {
        let x: Vec<f32> = (1..=200).map(|i| i as f32).collect();
        assert_eq!(gsumpw(200, &x, 1), 20100.0);
    }

    proptest! {
        #[test]
        fn prop_pairwise_matches_shifted_sum(
            data in proptest::collection::vec(-1e3f64..1e3, 0..400),
            alpha in -10.0f64..10.0,
            stride in prop_oneof![Just(1isize), Just(3), Just(-1), Just(-2)],
        ) {
            let step = stride.unsigned_abs();
            let n = if data.is_empty() { 0 } else { (data.len() - 1) / step + 1 };
            let expected: f64 = crate::stride::StridedIndices::conventional(n, stride)
                .map(|i| data[i] + alpha)
                .sum();
            let got = gapxsumpw(n, alpha, &data, stride);
            prop_assert!((got - expected).abs() <= 1e-8 * (1.0 + expected.abs()));
        }
    }
}
