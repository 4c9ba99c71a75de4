//! One-dimensional strided front ends over the dispatcher.
//!
//! These follow the BLAS calling convention: the conventional functions take
//! `(n, x, stride_x, y, stride_y, ...)` and start negative-stride views at
//! the far end of the buffer; the `_ndarray` variants take an explicit
//! offset after each `(buffer, stride)` pair.

use strided_blas::stride::stride2offset;

use crate::accessor::{Accessor, AccessorMut};
use crate::dispatch::{binary, for_each_index, unary};
use crate::dtype::Element;
use crate::order::Order;
use crate::view::NdArray;
use crate::Result;

/// Apply `f` to `n` strided elements of `x`, writing into `y`.
pub fn strided_unary<T, U, F>(
    n: usize,
    x: &[T],
    stride_x: isize,
    y: &mut [U],
    stride_y: isize,
    f: F,
) -> Result<()>
where
    T: Element,
    U: Element,
    F: FnMut(T) -> U,
{
    strided_unary_ndarray(
        n,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
        f,
    )
}

/// [`strided_unary`] with explicit starting offsets.
#[allow(clippy::too_many_arguments)]
pub fn strided_unary_ndarray<T, U, F>(
    n: usize,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    y: &mut [U],
    stride_y: isize,
    offset_y: usize,
    f: F,
) -> Result<()>
where
    T: Element,
    U: Element,
    F: FnMut(T) -> U,
{
    if n == 0 {
        return Ok(());
    }
    let xv = NdArray::new(x, &[n], &[stride_x], offset_x, Order::RowMajor)?;
    let mut yv = NdArray::new(y, &[n], &[stride_y], offset_y, Order::RowMajor)?;
    unary(&xv, &mut yv, f)
}

/// Apply `f` to `n` strided pairs from `x` and `y`, writing into `z`.
#[allow(clippy::too_many_arguments)]
pub fn strided_binary<T, U, V, F>(
    n: usize,
    x: &[T],
    stride_x: isize,
    y: &[U],
    stride_y: isize,
    z: &mut [V],
    stride_z: isize,
    f: F,
) -> Result<()>
where
    T: Element,
    U: Element,
    V: Element,
    F: FnMut(T, U) -> V,
{
    strided_binary_ndarray(
        n,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
        z,
        stride_z,
        stride2offset(n, stride_z),
        f,
    )
}

/// [`strided_binary`] with explicit starting offsets.
#[allow(clippy::too_many_arguments)]
pub fn strided_binary_ndarray<T, U, V, F>(
    n: usize,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    y: &[U],
    stride_y: isize,
    offset_y: usize,
    z: &mut [V],
    stride_z: isize,
    offset_z: usize,
    f: F,
) -> Result<()>
where
    T: Element,
    U: Element,
    V: Element,
    F: FnMut(T, U) -> V,
{
    if n == 0 {
        return Ok(());
    }
    let xv = NdArray::new(x, &[n], &[stride_x], offset_x, Order::RowMajor)?;
    let yv = NdArray::new(y, &[n], &[stride_y], offset_y, Order::RowMajor)?;
    let mut zv = NdArray::new(z, &[n], &[stride_z], offset_z, Order::RowMajor)?;
    binary(&xv, &yv, &mut zv, f)
}

/// Apply `f` to the unmasked elements of `x`, writing into `y`.
///
/// Elements whose mask value is non-zero are skipped and leave `y`
/// untouched.
#[allow(clippy::too_many_arguments)]
pub fn strided_mskunary<T, U, F>(
    n: usize,
    x: &[T],
    stride_x: isize,
    mask: &[u8],
    stride_mask: isize,
    y: &mut [U],
    stride_y: isize,
    f: F,
) -> Result<()>
where
    T: Element,
    U: Element,
    F: FnMut(T) -> U,
{
    strided_mskunary_ndarray(
        n,
        x,
        stride_x,
        stride2offset(n, stride_x),
        mask,
        stride_mask,
        stride2offset(n, stride_mask),
        y,
        stride_y,
        stride2offset(n, stride_y),
        f,
    )
}

/// [`strided_mskunary`] with explicit starting offsets.
#[allow(clippy::too_many_arguments)]
pub fn strided_mskunary_ndarray<T, U, F>(
    n: usize,
    x: &[T],
    stride_x: isize,
    offset_x: usize,
    mask: &[u8],
    stride_mask: isize,
    offset_mask: usize,
    y: &mut [U],
    stride_y: isize,
    offset_y: usize,
    mut f: F,
) -> Result<()>
where
    T: Element,
    U: Element,
    F: FnMut(T) -> U,
{
    if n == 0 {
        return Ok(());
    }
    let xv = NdArray::new(x, &[n], &[stride_x], offset_x, Order::RowMajor)?;
    let mv = NdArray::new(mask, &[n], &[stride_mask], offset_mask, Order::RowMajor)?;
    let mut yv = NdArray::new(y, &[n], &[stride_y], offset_y, Order::RowMajor)?;

    let dtypes = [xv.dtype(), mv.dtype(), yv.dtype()];
    let (xd, xl) = xv.parts()?;
    let (md, ml) = mv.parts()?;
    let (yd, yl) = yv.parts_mut()?;
    for_each_index([xl, ml, yl], dtypes, |[ix, im, iy]| {
        // SAFETY: all three descriptors were validated above.
        unsafe {
            if md.get_unchecked(im) == 0 {
                yd.set_unchecked(iy, f(xd.get_unchecked(ix)));
            }
        }
    })
}
