//! Masked minimum and maximum.
//!
//! An element takes part only when its mask value is zero. The `nan*`
//! variants also skip NaN values; the plain variants return NaN as soon as
//! an unmasked NaN is seen. Ties between `-0` and `+0` resolve to `-0` for
//! minima and `+0` for maxima.

use num_traits::Float;

use crate::stride::{debug_check_view, stride2offset};

#[inline]
fn is_negative_zero<T: Float>(v: T) -> bool {
    v == T::zero() && v.is_sign_negative()
}

#[inline]
fn is_positive_zero<T: Float>(v: T) -> bool {
    v == T::zero() && v.is_sign_positive()
}

#[derive(Clone, Copy)]
enum Extremum {
    Min,
    Max,
}

impl Extremum {
    /// Whether `v` replaces the current extreme value `m`.
    #[inline]
    fn replaces<T: Float>(self, v: T, m: T) -> bool {
        match self {
            Extremum::Min => v < m || (v == m && is_negative_zero(v)),
            Extremum::Max => v > m || (v == m && is_positive_zero(v)),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn masked_extremum<T: Float>(
    which: Extremum,
    skip_nan: bool,
    n: usize,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    mask: &[u8],
    stride_mask: isize,
    offset_mask: usize,
) -> T {
    if n == 0 {
        return T::nan();
    }
    if n == 1 || stride_x == 0 {
        return if mask[offset_mask] == 0 {
            x[offset_x]
        } else {
            T::nan()
        };
    }
    debug_check_view(x.len(), n, stride_x, offset_x);
    debug_check_view(mask.len(), n, stride_mask, offset_mask);

    let mut ix = offset_x as isize;
    let mut im = offset_mask as isize;

    // First qualifying element seeds the result
    let mut i = 0usize;
    let mut best = T::nan();
    while i < n {
        if mask[im as usize] == 0 {
            let v = x[ix as usize];
            if !v.is_nan() {
                best = v;
                break;
            }
            if !skip_nan {
                return v;
            }
        }
        ix += stride_x;
        im += stride_mask;
        i += 1;
    }
    if i == n {
        return T::nan();
    }

    i += 1;
    ix += stride_x;
    im += stride_mask;
    while i < n {
        if mask[im as usize] == 0 {
            let v = x[ix as usize];
            if v.is_nan() {
                if !skip_nan {
                    return v;
                }
            } else if which.replaces(v, best) {
                best = v;
            }
        }
        ix += stride_x;
        im += stride_mask;
        i += 1;
    }
    best
}

macro_rules! masked_kernel {
    ($(#[$doc:meta])* $name:ident, $name_nd:ident, $which:expr, $skip_nan:expr) => {
        $(#[$doc])*
        pub fn $name<T: Float>(
            n: usize,
            x: &[T],
            stride_x: isize,
            mask: &[u8],
            stride_mask: isize,
        ) -> T {
            $name_nd(
                n,
                x,
                stride_x,
                stride2offset(n, stride_x),
                mask,
                stride_mask,
                stride2offset(n, stride_mask),
            )
        }

        #[doc = concat!("[`", stringify!($name), "`] with explicit starting offsets.")]
        pub fn $name_nd<T: Float>(
            n: usize,
            x: &[T],
            stride_x: isize,
            offset_x: usize,
            mask: &[u8],
            stride_mask: isize,
            offset_mask: usize,
        ) -> T {
            masked_extremum(
                $which,
                $skip_nan,
                n,
                x,
                stride_x,
                offset_x,
                mask,
                stride_mask,
                offset_mask,
            )
        }
    };
}

masked_kernel!(
    /// Minimum of the unmasked, non-NaN elements; NaN when none qualify.
    ///
    /// ```rust
    /// use strided_blas::gnanmskmin;
    ///
    /// let x = [1.0, -2.0, -4.0, f64::NAN, 5.0, 0.0, 3.0];
    /// let mask = [0, 0, 0, 1, 0, 0, 0];
    /// assert_eq!(gnanmskmin(7, &x, 1, &mask, 1), -4.0);
    /// ```
    gnanmskmin,
    gnanmskmin_ndarray,
    Extremum::Min,
    true
);

masked_kernel!(
    /// Maximum of the unmasked, non-NaN elements; NaN when none qualify.
    gnanmskmax,
    gnanmskmax_ndarray,
    Extremum::Max,
    true
);

masked_kernel!(
    /// Minimum of the unmasked elements; NaN if any unmasked element is NaN.
    gmskmin,
    gmskmin_ndarray,
    Extremum::Min,
    false
);

masked_kernel!(
    /// Maximum of the unmasked elements; NaN if any unmasked element is NaN.
    gmskmax,
    gmskmax_ndarray,
    Extremum::Max,
    false
);

/// Single-precision [`gnanmskmin`].
pub fn snanmskmin(n: usize, x: &[f32], stride_x: isize, mask: &[u8], stride_mask: isize) -> f32 {
    gnanmskmin(n, x, stride_x, mask, stride_mask)
}

/// Double-precision [`gnanmskmin`].
pub fn dnanmskmin(n: usize, x: &[f64], stride_x: isize, mask: &[u8], stride_mask: isize) -> f64 {
    gnanmskmin(n, x, stride_x, mask, stride_mask)
}

/// Double-precision [`gnanmskmin_ndarray`].
pub fn dnanmskmin_ndarray(
    n: usize,
    x: &[f64],
    stride_x: isize,
    offset_x: usize,
    mask: &[u8],
    stride_mask: isize,
    offset_mask: usize,
) -> f64 {
    gnanmskmin_ndarray(n, x, stride_x, offset_x, mask, stride_mask, offset_mask)
}
