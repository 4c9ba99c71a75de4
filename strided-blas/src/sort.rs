//! In-place sorting of strided views.
//!
//! `order > 0` sorts ascending, `order < 0` descending and `order == 0`
//! leaves the input untouched. Ascending order places `-0` before `+0` and
//! NaNs last; descending order is its exact reverse. Neither algorithm is
//! stable.
//!
//! Descending order is implemented by sorting ascending over the reversed
//! view: the stride is negated and the offset moved to the last element.

use num_traits::Float;

use crate::stride::{debug_check_view, stride2offset};

/// Shell sort gap sequence (Ciura).
const GAPS: [usize; 8] = [701, 301, 132, 57, 23, 10, 4, 1];

#[inline]
fn is_positive_zero<T: Float>(v: T) -> bool {
    v == T::zero() && v.is_sign_positive()
}

#[inline]
fn is_negative_zero<T: Float>(v: T) -> bool {
    v == T::zero() && v.is_sign_negative()
}

/// Heap ordering: NaN is the largest value and `+0` outranks `-0`.
#[inline]
fn is_bigger<T: Float>(a: T, b: T) -> bool {
    a > b || a.is_nan() || (a == b && is_positive_zero(a))
}

/// Normalize `(stride, offset)` so that an ascending sort realizes `order`.
#[inline]
fn oriented<T: Float>(n: usize, order: T, stride: isize, offset: usize) -> (isize, isize) {
    if order < T::zero() {
        let stride = -stride;
        (stride, offset as isize - (n as isize - 1) * stride)
    } else {
        (stride, offset as isize)
    }
}

// ============================================================================
// Heap sort
// ============================================================================

/// Sort `n` strided elements of `x` in place using heap sort.
///
/// ```rust
/// use strided_blas::gsorthp;
///
/// let mut x = [1.0, -2.0, 3.0, -4.0];
/// gsorthp(4, 1.0, &mut x, 1);
/// assert_eq!(x, [-4.0, -2.0, 1.0, 3.0]);
/// ```
pub fn gsorthp<T: Float>(n: usize, order: T, x: &mut [T], stride_x: isize) -> &mut [T] {
    gsorthp_ndarray(n, order, x, stride_x, stride2offset(n, stride_x))
}

/// [`gsorthp`] with an explicit starting offset.
pub fn gsorthp_ndarray<T: Float>(
    n: usize,
    order: T,
    x: &mut [T],
    stride_x: isize,
    offset_x: usize,
) -> &mut [T] {
    if n <= 1 || order == T::zero() || order.is_nan() || stride_x == 0 {
        return x;
    }
    debug_check_view(x.len(), n, stride_x, offset_x);
    let (sx, ox) = oriented(n, order, stride_x, offset_x);
    let at = |i: usize| (ox + i as isize * sx) as usize;

    let mut len = n;
    let mut parent = n / 2;
    loop {
        let t;
        if parent > 0 {
            // Build the heap
            parent -= 1;
            t = x[at(parent)];
        } else {
            // Move the root to its sorted position
            len -= 1;
            if len == 0 {
                return x;
            }
            let i = at(len);
            t = x[i];
            x[i] = x[at(0)];
        }

        // Sift `t` down
        let mut j = parent;
        let mut child = 2 * j + 1;
        while child < len {
            let k = child + 1;
            if k < len && is_bigger(x[at(k)], x[at(child)]) {
                child = k;
            }
            let v = x[at(child)];
            if is_bigger(v, t) {
                x[at(j)] = v;
                j = child;
                child = 2 * j + 1;
            } else {
                break;
            }
        }
        x[at(j)] = t;
    }
}

/// Sort `x` with heap sort, applying the same permutation to `y`.
#[allow(clippy::too_many_arguments)]
pub fn gsort2hp<'a, T: Float, U: Copy>(
    n: usize,
    order: T,
    x: &'a mut [T],
    stride_x: isize,
    y: &mut [U],
    stride_y: isize,
) -> &'a mut [T] {
    gsort2hp_ndarray(
        n,
        order,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
    )
}

/// [`gsort2hp`] with explicit starting offsets.
#[allow(clippy::too_many_arguments)]
pub fn gsort2hp_ndarray<'a, T: Float, U: Copy>(
    n: usize,
    order: T,
    x: &'a mut [T],
    stride_x: isize,
    offset_x: usize,
    y: &mut [U],
    stride_y: isize,
    offset_y: usize,
) -> &'a mut [T] {
    if n <= 1 || order == T::zero() || order.is_nan() || stride_x == 0 {
        return x;
    }
    debug_check_view(x.len(), n, stride_x, offset_x);
    debug_check_view(y.len(), n, stride_y, offset_y);
    let (sx, ox) = oriented(n, order, stride_x, offset_x);
    let (sy, oy) = oriented(n, order, stride_y, offset_y);
    let ax = |i: usize| (ox + i as isize * sx) as usize;
    let ay = |i: usize| (oy + i as isize * sy) as usize;

    let mut len = n;
    let mut parent = n / 2;
    loop {
        let (tx, ty);
        if parent > 0 {
            parent -= 1;
            tx = x[ax(parent)];
            ty = y[ay(parent)];
        } else {
            len -= 1;
            if len == 0 {
                return x;
            }
            tx = x[ax(len)];
            ty = y[ay(len)];
            x[ax(len)] = x[ax(0)];
            y[ay(len)] = y[ay(0)];
        }

        let mut j = parent;
        let mut child = 2 * j + 1;
        while child < len {
            let k = child + 1;
            if k < len && is_bigger(x[ax(k)], x[ax(child)]) {
                child = k;
            }
            let v = x[ax(child)];
            if is_bigger(v, tx) {
                x[ax(j)] = v;
                y[ay(j)] = y[ay(child)];
                j = child;
                child = 2 * j + 1;
            } else {
                break;
            }
        }
        x[ax(j)] = tx;
        y[ay(j)] = ty;
    }
}

// ============================================================================
// Shell sort
// ============================================================================

/// Sort `n` strided elements of `x` in place using Shell sort.
pub fn gsortsh<T: Float>(n: usize, order: T, x: &mut [T], stride_x: isize) -> &mut [T] {
    gsortsh_ndarray(n, order, x, stride_x, stride2offset(n, stride_x))
}

/// [`gsortsh`] with an explicit starting offset.
pub fn gsortsh_ndarray<T: Float>(
    n: usize,
    order: T,
    x: &mut [T],
    stride_x: isize,
    offset_x: usize,
) -> &mut [T] {
    if n <= 1 || order == T::zero() || order.is_nan() || stride_x == 0 {
        return x;
    }
    debug_check_view(x.len(), n, stride_x, offset_x);
    let (sx, ox) = oriented(n, order, stride_x, offset_x);
    let at = |i: usize| (ox + i as isize * sx) as usize;

    for &gap in GAPS.iter() {
        for i in gap..n {
            let v = x[at(i)];
            // NaNs stay put and are carried to the end by later shifts
            if v.is_nan() {
                continue;
            }
            let negative_zero = is_negative_zero(v);
            let mut j = i;
            while j >= gap {
                let u = x[at(j - gap)];
                if u <= v && !(negative_zero && is_positive_zero(u)) {
                    break;
                }
                x[at(j)] = u;
                j -= gap;
            }
            x[at(j)] = v;
        }
    }
    x
}

// ============================================================================
// Typed aliases
// ============================================================================

/// Double-precision [`gsorthp`].
pub fn dsorthp(n: usize, order: f64, x: &mut [f64], stride_x: isize) -> &mut [f64] {
    gsorthp(n, order, x, stride_x)
}

/// Double-precision [`gsorthp_ndarray`].
pub fn dsorthp_ndarray(
    n: usize,
    order: f64,
    x: &mut [f64],
    stride_x: isize,
    offset_x: usize,
) -> &mut [f64] {
    gsorthp_ndarray(n, order, x, stride_x, offset_x)
}

/// Single-precision [`gsortsh`].
pub fn ssortsh(n: usize, order: f32, x: &mut [f32], stride_x: isize) -> &mut [f32] {
    gsortsh(n, order, x, stride_x)
}

/// Single-precision [`gsortsh_ndarray`].
pub fn ssortsh_ndarray(
    n: usize,
    order: f32,
    x: &mut [f32],
    stride_x: isize,
    offset_x: usize,
) -> &mut [f32] {
    gsortsh_ndarray(n, order, x, stride_x, offset_x)
}
