//! Cumulative sums with an initial value.
//!
//! All variants compute `y[0] = sum + x[0]` and `y[i] = y[i-1] + x[i]`,
//! differing only in how rounding error is controlled. `x` and `y` have
//! independent strides. A NaN in `x` makes every later output NaN.

use num_traits::Float;

use crate::stride::{debug_check_view, stride2offset};

/// Block length below which [`gcusumpw`] sums directly.
pub const BLOCKSIZE: usize = 128;

// ============================================================================
// Pairwise
// ============================================================================

/// Cumulative sum using pairwise summation.
///
/// ```rust
/// use strided_blas::gcusumpw;
///
/// let x = [1.0, -2.0, 2.0];
/// let mut y = [0.0; 3];
/// gcusumpw(3, 0.0, &x, 1, &mut y, 1);
/// assert_eq!(y, [1.0, -1.0, 1.0]);
/// ```
pub fn gcusumpw<'a, T: Float>(
    n: usize,
    sum: T,
    x: &[T],
    stride_x: isize,
    y: &'a mut [T],
    stride_y: isize,
) -> &'a mut [T] {
    gcusumpw_ndarray(
        n,
        sum,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
    )
}

/// [`gcusumpw`] with explicit starting offsets.
#[allow(clippy::too_many_arguments)]
pub fn gcusumpw_ndarray<'a, T: Float>(
    n: usize,
    sum: T,
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
    cusumpw_block(n, sum, x, stride_x, offset_x as isize, y, stride_y, offset_y as isize);
    y
}

/// Recursive halving: the second half is seeded with the last output of the
/// first half.
#[allow(clippy::too_many_arguments)]
fn cusumpw_block<T: Float>(
    n: usize,
    sum: T,
    x: &[T],
    stride_x: isize,
    offset_x: isize,
    y: &mut [T],
    stride_y: isize,
    offset_y: isize,
) {
    if n <= BLOCKSIZE {
        let mut ix = offset_x;
        let mut iy = offset_y;
        let mut s = T::zero();
        for _ in 0..n {
            s = s + x[ix as usize];
            y[iy as usize] = sum + s;
            ix += stride_x;
            iy += stride_y;
        }
        return;
    }
    let half = n / 2;
    let half = half - half % 8;
    cusumpw_block(half, sum, x, stride_x, offset_x, y, stride_y, offset_y);
    let last = offset_y + (half as isize - 1) * stride_y;
    let seed = y[last as usize];
    cusumpw_block(
        n - half,
        seed,
        x,
        stride_x,
        offset_x + half as isize * stride_x,
        y,
        stride_y,
        last + stride_y,
    );
}

// ============================================================================
// Kahan-Babuska-Neumaier
// ============================================================================

/// Cumulative sum using Kahan-Babuska-Neumaier compensated summation.
pub fn gcusumkbn<'a, T: Float>(
    n: usize,
    sum: T,
    x: &[T],
    stride_x: isize,
    y: &'a mut [T],
    stride_y: isize,
) -> &'a mut [T] {
    gcusumkbn_ndarray(
        n,
        sum,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
    )
}

/// [`gcusumkbn`] with explicit starting offsets.
#[allow(clippy::too_many_arguments)]
pub fn gcusumkbn_ndarray<'a, T: Float>(
    n: usize,
    sum: T,
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

    let mut ix = offset_x as isize;
    let mut iy = offset_y as isize;
    let mut s = sum;
    let mut c = T::zero();
    for _ in 0..n {
        let v = x[ix as usize];
        let t = s + v;
        if s.abs() >= v.abs() {
            c = c + ((s - t) + v);
        } else {
            c = c + ((v - t) + s);
        }
        s = t;
        y[iy as usize] = s + c;
        ix += stride_x;
        iy += stride_y;
    }
    y
}

// ============================================================================
// Straightforward accumulation
// ============================================================================

/// Cumulative sum by plain left-to-right accumulation.
pub fn gcusum<'a, T: Float>(
    n: usize,
    sum: T,
    x: &[T],
    stride_x: isize,
    y: &'a mut [T],
    stride_y: isize,
) -> &'a mut [T] {
    gcusum_ndarray(
        n,
        sum,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
    )
}

/// [`gcusum`] with explicit starting offsets.
#[allow(clippy::too_many_arguments)]
pub fn gcusum_ndarray<'a, T: Float>(
    n: usize,
    sum: T,
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

    let mut ix = offset_x as isize;
    let mut iy = offset_y as isize;
    let mut s = sum;
    for _ in 0..n {
        s = s + x[ix as usize];
        y[iy as usize] = s;
        ix += stride_x;
        iy += stride_y;
    }
    y
}

// ============================================================================
// Typed aliases
// ============================================================================

/// Single-precision [`gcusumpw`].
pub fn scusumpw<'a>(
    n: usize,
    sum: f32,
    x: &[f32],
    stride_x: isize,
    y: &'a mut [f32],
    stride_y: isize,
) -> &'a mut [f32] {
    gcusumpw(n, sum, x, stride_x, y, stride_y)
}

/// Single-precision [`gcusumpw_ndarray`].
#[allow(clippy::too_many_arguments)]
pub fn scusumpw_ndarray<'a>(
    n: usize,
    sum: f32,
    x: &[f32],
    stride_x: isize,
    offset_x: usize,
    y: &'a mut [f32],
    stride_y: isize,
    offset_y: usize,
) -> &'a mut [f32] {
    gcusumpw_ndarray(n, sum, x, stride_x, offset_x, y, stride_y, offset_y)
}

/// Double-precision [`gcusumpw`].
pub fn dcusumpw<'a>(
    n: usize,
    sum: f64,
    x: &[f64],
    stride_x: isize,
    y: &'a mut [f64],
    stride_y: isize,
) -> &'a mut [f64] {
    gcusumpw(n, sum, x, stride_x, y, stride_y)
}

/// Double-precision [`gcusumpw_ndarray`].
#[allow(clippy::too_many_arguments)]
pub fn dcusumpw_ndarray<'a>(
    n: usize,
    sum: f64,
    x: &[f64],
    stride_x: isize,
    offset_x: usize,
    y: &'a mut [f64],
    stride_y: isize,
    offset_y: usize,
) -> &'a mut [f64] {
    gcusumpw_ndarray(n, sum, x, stride_x, offset_x, y, stride_y, offset_y)
}
