//! Level-1 BLAS routines over strided views.
//!
//! Unit-stride paths unroll the main loop after a short clean-up loop; the
//! general paths walk both views with running indices.

use num_traits::Float;

use crate::stride::{debug_check_view, stride2offset};

// ============================================================================
// axpy
// ============================================================================

/// `y = alpha*x + y`.
///
/// ```rust
/// use strided_blas::gaxpy;
///
/// let x = [1.0, 2.0, 3.0];
/// let mut y = [1.0, 1.0, 1.0];
/// gaxpy(3, 2.0, &x, 1, &mut y, -1);
/// assert_eq!(y, [7.0, 5.0, 3.0]);
/// ```
pub fn gaxpy<'a, T: Float>(
    n: usize,
    alpha: T,
    x: &[T],
    stride_x: isize,
    y: &'a mut [T],
    stride_y: isize,
) -> &'a mut [T] {
    gaxpy_ndarray(
        n,
        alpha,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
    )
}

/// [`gaxpy`] with explicit starting offsets.
#[allow(clippy::too_many_arguments)]
pub fn gaxpy_ndarray<'a, T: Float>(
    n: usize,
    alpha: T,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    y: &'a mut [T],
    stride_y: isize,
    offset_y: usize,
) -> &'a mut [T] {
    if n == 0 || alpha == T::zero() {
        return y;
    }
    debug_check_view(x.len(), n, stride_x, offset_x);
    debug_check_view(y.len(), n, stride_y, offset_y);

    if stride_x == 1 && stride_y == 1 {
        let (mut ix, mut iy) = (offset_x, offset_y);
        let m = n % 4;
        for _ in 0..m {
            y[iy] = y[iy] + alpha * x[ix];
            ix += 1;
            iy += 1;
        }
        let mut i = m;
        while i < n {
            y[iy] = y[iy] + alpha * x[ix];
            y[iy + 1] = y[iy + 1] + alpha * x[ix + 1];
            y[iy + 2] = y[iy + 2] + alpha * x[ix + 2];
            y[iy + 3] = y[iy + 3] + alpha * x[ix + 3];
            ix += 4;
            iy += 4;
            i += 4;
        }
        return y;
    }

    let (mut ix, mut iy) = (offset_x as isize, offset_y as isize);
    for _ in 0..n {
        let j = iy as usize;
        y[j] = y[j] + alpha * x[ix as usize];
        ix += stride_x;
        iy += stride_y;
    }
    y
}

/// Single-precision [`gaxpy`].
pub fn saxpy<'a>(
    n: usize,
    alpha: f32,
    x: &[f32],
    stride_x: isize,
    y: &'a mut [f32],
    stride_y: isize,
) -> &'a mut [f32] {
    gaxpy(n, alpha, x, stride_x, y, stride_y)
}

/// Double-precision [`gaxpy`].
pub fn daxpy<'a>(
    n: usize,
    alpha: f64,
    x: &[f64],
    stride_x: isize,
    y: &'a mut [f64],
    stride_y: isize,
) -> &'a mut [f64] {
    gaxpy(n, alpha, x, stride_x, y, stride_y)
}

// ============================================================================
// scal
// ============================================================================

/// `x = alpha*x`.
pub fn gscal<T: Float>(n: usize, alpha: T, x: &mut [T], stride_x: isize) -> &mut [T] {
    gscal_ndarray(n, alpha, x, stride_x, stride2offset(n, stride_x))
}

/// [`gscal`] with an explicit starting offset.
pub fn gscal_ndarray<T: Float>(
    n: usize,
    alpha: T,
    x: &mut [T],
    stride_x: isize,
    offset_x: usize,
) -> &mut [T] {
    if n == 0 || alpha == T::one() {
        return x;
    }
    debug_check_view(x.len(), n, stride_x, offset_x);
    let mut ix = offset_x as isize;
    for _ in 0..n {
        let j = ix as usize;
        x[j] = alpha * x[j];
        ix += stride_x;
    }
    x
}

// ============================================================================
// copy / swap
// ============================================================================

/// Copy `n` strided elements of `x` into `y`.
pub fn gcopy<'a, T: Copy>(
    n: usize,
    x: &[T],
    stride_x: isize,
    y: &'a mut [T],
    stride_y: isize,
) -> &'a mut [T] {
    gcopy_ndarray(
        n,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
    )
}

/// [`gcopy`] with explicit starting offsets.
pub fn gcopy_ndarray<'a, T: Copy>(
    n: usize,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    y: &'a mut [T],
    stride_y: isize,
    offset_y: usize,
) -> &'a mut [T] {
    if n == 0 {
        return y;
    }
    debug_check_view(x.len(), n, stride_x, offset_x);
    debug_check_view(y.len(), n, stride_y, offset_y);

    if stride_x == 1 && stride_y == 1 {
        y[offset_y..offset_y + n].copy_from_slice(&x[offset_x..offset_x + n]);
        return y;
    }
    let (mut ix, mut iy) = (offset_x as isize, offset_y as isize);
    for _ in 0..n {
        y[iy as usize] = x[ix as usize];
        ix += stride_x;
        iy += stride_y;
    }
    y
}

/// Exchange `n` strided elements between `x` and `y`.
pub fn gswap<T>(n: usize, x: &mut [T], stride_x: isize, y: &mut [T], stride_y: isize) {
    gswap_ndarray(
        n,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
    )
}

/// [`gswap`] with explicit starting offsets.
pub fn gswap_ndarray<T>(
    n: usize,
    x: &mut [T],
    stride_x: isize,
    offset_x: usize,
    y: &mut [T],
    stride_y: isize,
    offset_y: usize,
) {
    if n == 0 {
        return;
    }
    debug_check_view(x.len(), n, stride_x, offset_x);
    debug_check_view(y.len(), n, stride_y, offset_y);
    let (mut ix, mut iy) = (offset_x as isize, offset_y as isize);
    for _ in 0..n {
        std::mem::swap(&mut x[ix as usize], &mut y[iy as usize]);
        ix += stride_x;
        iy += stride_y;
    }
}

// ============================================================================
// dot
// ============================================================================

/// Dot product of two strided views.
pub fn gdot<T: Float>(n: usize, x: &[T], stride_x: isize, y: &[T], stride_y: isize) -> T {
    gdot_ndarray(
        n,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
    )
}

/// [`gdot`] with explicit starting offsets.
pub fn gdot_ndarray<T: Float>(
    n: usize,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    y: &[T],
    stride_y: isize,
    offset_y: usize,
) -> T {
    let mut dot = T::zero();
    if n == 0 {
        return dot;
    }
    debug_check_view(x.len(), n, stride_x, offset_x);
    debug_check_view(y.len(), n, stride_y, offset_y);

    if stride_x == 1 && stride_y == 1 {
        let (xs, ys) = (&x[offset_x..offset_x + n], &y[offset_y..offset_y + n]);
        let m = n % 5;
        for i in 0..m {
            dot = dot + xs[i] * ys[i];
        }
        let mut i = m;
        while i < n {
            dot = dot
                + xs[i] * ys[i]
                + xs[i + 1] * ys[i + 1]
                + xs[i + 2] * ys[i + 2]
                + xs[i + 3] * ys[i + 3]
                + xs[i + 4] * ys[i + 4];
            i += 5;
        }
        return dot;
    }
    let (mut ix, mut iy) = (offset_x as isize, offset_y as isize);
    for _ in 0..n {
        dot = dot + x[ix as usize] * y[iy as usize];
        ix += stride_x;
        iy += stride_y;
    }
    dot
}

/// Double-precision [`gdot`].
pub fn ddot(n: usize, x: &[f64], stride_x: isize, y: &[f64], stride_y: isize) -> f64 {
    gdot(n, x, stride_x, y, stride_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axpy_unrolled_and_strided() {
        for n in 0..11usize {
            let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
            let mut y = vec![1.0; n];
            daxpy(n, 3.0, &x, 1, &mut y, 1);
            for i in 0..n {
                assert_eq!(y[i], 1.0 + 3.0 * i as f64);
            }
        }
        let x = [1.0f32, 2.0, 3.0, 4.0];
        let mut y = [0.0f32; 2];
        saxpy(2, 1.0, &x, 2, &mut y, -1);
        assert_eq!(y, [3.0, 1.0]);
    }

    #[test]
    fn test_axpy_zero_alpha_is_noop() {
        let x = [f64::NAN; 3];
        let mut y = [1.0f64, 2.0, 3.0];
        gaxpy(3, 0.0, &x, 1, &mut y, 1);
        assert_eq!(y, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_scal_copy_swap() {
        let mut x = [1.0f64, 2.0, 3.0, 4.0];
        gscal(2, -2.0, &mut x, 2);
        assert_eq!(x, [-2.0, 2.0, -6.0, 4.0]);

        let mut y = [0.0f64; 4];
        gcopy(4, &x, 1, &mut y, -1);
        assert_eq!(y, [4.0, -6.0, 2.0, -2.0]);
        gcopy_ndarray(2, &x, 1, 1, &mut y, 1, 0);
        assert_eq!(y, [2.0, -6.0, 2.0, -2.0]);

        let mut a = ["a", "b", "c"];
        let mut b = ["x", "y", "z"];
        gswap(3, &mut a, 1, &mut b, -1);
        assert_eq!(a, ["z", "y", "x"]);
        assert_eq!(b, ["c", "b", "a"]);
    }

    #[test]
    fn test_dot() {
        let n = 13;
        let x: Vec<f64> = (0..n).map(|i| i as f64 * 0.5).collect();
        let y: Vec<f64> = (0..n).map(|i| 2.0 - i as f64).collect();
        let expected: f64 = x.iter().zip(&y).map(|(a, b)| a * b).sum();
        assert_relative_eq!(ddot(n, &x, 1, &y, 1), expected, epsilon = 1e-12);
        assert_eq!(gdot(2, &[1.0f64, 2.0, 3.0], 2, &[4.0, 5.0], -1), 5.0 + 12.0);
        assert_eq!(gdot::<f64>(0, &[], 1, &[], 1), 0.0);
    }
}
