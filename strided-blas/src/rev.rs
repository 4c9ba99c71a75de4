//! In-place reversal of a strided view.

use crate::stride::{debug_check_view, stride2offset};

/// Reverse `n` strided elements of `x` in place.
///
/// ```rust
/// use strided_blas::grev;
///
/// let mut x = [1.0, -2.0, 3.0, -4.0, 5.0];
/// grev(3, &mut x, 2);
/// assert_eq!(x, [5.0, -2.0, 3.0, -4.0, 1.0]);
/// ```
pub fn grev<T>(n: usize, x: &mut [T], stride_x: isize) -> &mut [T] {
    grev_ndarray(n, x, stride_x, stride2offset(n, stride_x))
}

/// [`grev`] with an explicit starting offset.
pub fn grev_ndarray<T>(n: usize, x: &mut [T], stride_x: isize, offset_x: usize) -> &mut [T] {
    if n == 0 {
        return x;
    }
    debug_check_view(x.len(), n, stride_x, offset_x);

    let half = n / 2;
    let mut ix = offset_x as isize;

    if stride_x == 1 {
        let mut iy = ix + n as isize - 1;
        // Clean-up loop first, then unroll by 3
        let m = half % 3;
        for _ in 0..m {
            x.swap(ix as usize, iy as usize);
            ix += 1;
            iy -= 1;
        }
        let mut i = m;
        while i < half {
            x.swap(ix as usize, iy as usize);
            x.swap((ix + 1) as usize, (iy - 1) as usize);
            x.swap((ix + 2) as usize, (iy - 2) as usize);
            ix += 3;
            iy -= 3;
            i += 3;
        }
        return x;
    }

    let mut iy = ix + (n as isize - 1) * stride_x;
    for _ in 0..half {
        x.swap(ix as usize, iy as usize);
        ix += stride_x;
        iy -= stride_x;
    }
    x
}

/// Single-precision [`grev`].
pub fn srev(n: usize, x: &mut [f32], stride_x: isize) -> &mut [f32] {
    grev(n, x, stride_x)
}

/// Single-precision [`grev_ndarray`].
pub fn srev_ndarray(n: usize, x: &mut [f32], stride_x: isize, offset_x: usize) -> &mut [f32] {
    grev_ndarray(n, x, stride_x, offset_x)
}

/// Double-precision [`grev`].
pub fn drev(n: usize, x: &mut [f64], stride_x: isize) -> &mut [f64] {
    grev(n, x, stride_x)
}

/// Double-precision [`grev_ndarray`].
pub fn drev_ndarray(n: usize, x: &mut [f64], stride_x: isize, offset_x: usize) -> &mut [f64] {
    grev_ndarray(n, x, stride_x, offset_x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unit_stride_all_lengths() {
        for n in 0..12usize {
            let orig: Vec<f64> = (0..n).map(|i| i as f64).collect();
            let mut x = orig.clone();
            grev(n, &mut x, 1);
            for i in 0..n {
                assert_eq!(x[i], orig[n - 1 - i]);
            }
        }
    }

    #[test]
    fn test_negative_stride() {
        let mut x = [1.0f32, -2.0, 3.0, -4.0, 5.0, -6.0];
        srev(3, &mut x, -2);
        assert_eq!(x, [5.0, -2.0, 3.0, -4.0, 1.0, -6.0]);
    }

    #[test]
    fn test_ndarray_offset() {
        let mut x = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
        drev_ndarray(3, &mut x, 1, 3);
        assert_eq!(x, [1.0, 2.0, 3.0, 6.0, 5.0, 4.0]);
    }

    #[test]
    fn test_zero_length_unchanged() {
        let mut x = [1.0f64, 2.0];
        let out = drev(0, &mut x, 1);
        assert_eq!(out, &[1.0, 2.0]);
    }

    #[test]
    fn test_generic_elements() {
        let mut x = vec!["a", "b", "c", "d"];
        grev(4, &mut x, 1);
        assert_eq!(x, vec!["d", "c", "b", "a"]);
    }

    proptest! {
        #[test]
        fn prop_reversal_is_involutory(
            data in proptest::collection::vec(-1e6f64..1e6, 0..64),
            stride in prop_oneof![Just(1isize), Just(2), Just(-1), Just(-3)],
        ) {
            let step = stride.unsigned_abs();
            let n = if data.is_empty() { 0 } else { (data.len() - 1) / step + 1 };
            let mut x = data.clone();
            grev(n, &mut x, stride);
            grev(n, &mut x, stride);
            prop_assert_eq!(x, data);
        }

        #[test]
        fn prop_reversal_maps_i_to_n_minus_1_minus_i(
            data in proptest::collection::vec(-1e6f64..1e6, 1..64),
            stride in prop_oneof![Just(1isize), Just(2), Just(-1), Just(-2)],
        ) {
            let step = stride.unsigned_abs();
            let n = (data.len() - 1) / step + 1;
            let idx: Vec<usize> = crate::stride::StridedIndices::conventional(n, stride).collect();
            let mut x = data.clone();
            grev(n, &mut x, stride);
            for i in 0..n {
                prop_assert_eq!(x[idx[i]], data[idx[n - 1 - i]]);
            }
        }
    }
}
