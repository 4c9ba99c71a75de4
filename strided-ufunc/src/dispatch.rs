//! Element-wise dispatch: path selection and the public apply functions.

use std::array;

use log::trace;

use crate::accessor::{Accessor, AccessorMut};
use crate::block::block_size;
use crate::dtype::DType;
use crate::kernel::{blocked, interchange, interchange_2d, interchange_dyn, loop_1d};
use crate::order::{interchange_order, iteration_order, stride_order};
use crate::simd;
use crate::view::{numel, Layout, NdArray};
use crate::{Result, UfuncError};

/// Check that every layout has the shape of the first one.
fn ensure_same_shape(layouts: &[&Layout]) -> Result<()> {
    let first = layouts[0];
    for layout in &layouts[1..] {
        if layout.ndim() != first.ndim() {
            return Err(UfuncError::RankMismatch(first.ndim(), layout.ndim()));
        }
        if layout.shape() != first.shape() {
            return Err(UfuncError::ShapeMismatch(
                first.shape().to_vec(),
                layout.shape().to_vec(),
            ));
        }
    }
    Ok(())
}

/// Permute shape and per-array strides into the given loop order.
fn permute<const K: usize>(
    shape: &[usize],
    layouts: &[&Layout; K],
    loop_order: &[usize],
) -> (Vec<usize>, Vec<[isize; K]>) {
    let shape = loop_order.iter().map(|&d| shape[d]).collect();
    let strides = loop_order
        .iter()
        .map(|&d| array::from_fn(|k| layouts[k].strides()[d]))
        .collect();
    (shape, strides)
}

/// Visit every element of `K` equally shaped arrays, passing the `K` linear
/// buffer indices of each element to `body`.
///
/// Indices are derived from the layouts alone. Callers that dereference them
/// must have validated the layouts against their buffers.
pub(crate) fn for_each_index<const K: usize, F>(
    layouts: [&Layout; K],
    dtypes: [DType; K],
    mut body: F,
) -> Result<()>
where
    F: FnMut([usize; K]),
{
    ensure_same_shape(&layouts)?;

    let offsets: [isize; K] = array::from_fn(|k| layouts[k].offset() as isize);
    let rank = layouts[0].ndim();
    if rank == 0 {
        body(array::from_fn(|k| layouts[k].offset()));
        return Ok(());
    }

    let shape = layouts[0].shape();
    let len = numel(shape);
    if len == 0 {
        return Ok(());
    }
    if rank == 1 {
        let strides = array::from_fn(|k| layouts[k].strides()[0]);
        loop_1d(len, offsets, strides, &mut body);
        return Ok(());
    }

    // Exactly one non-singleton dimension: squeeze to 1-D
    let mut non_singleton = shape.iter().enumerate().filter(|&(_, &d)| d != 1);
    match (non_singleton.next(), non_singleton.next()) {
        (None, _) => {
            body(array::from_fn(|k| layouts[k].offset()));
            return Ok(());
        }
        (Some((dim, _)), None) => {
            trace!("ufunc: squeeze rank {} to dimension {}", rank, dim);
            let strides = array::from_fn(|k| layouts[k].strides()[dim]);
            loop_1d(len, offsets, strides, &mut body);
            return Ok(());
        }
        _ => {}
    }

    let directions: [i8; K] = array::from_fn(|k| iteration_order(layouts[k].strides()));
    let order = layouts[0].order();
    let same_order = layouts.iter().all(|l| l.order() == order);

    if same_order && directions.iter().all(|&d| d != 0) {
        if layouts.iter().all(|l| l.is_contiguous()) {
            trace!("ufunc: flatten {} elements", len);
            let strides = array::from_fn(|k| directions[k] as isize);
            simd::dispatch_if_large(len, || loop_1d(len, offsets, strides, &mut body));
            return Ok(());
        }

        let loop_order = interchange_order(rank, order);
        let (shape, strides) = permute(shape, &layouts, &loop_order);
        trace!("ufunc: loop interchange, rank {} ({})", rank, order);
        run_interchange(&shape, &strides, offsets, &mut body);
        return Ok(());
    }

    let loop_order = stride_order(layouts[0].strides());
    let (shape, strides) = permute(shape, &layouts, &loop_order);
    let block = block_size(&dtypes);
    trace!("ufunc: blocked, rank {} tile {}", rank, block);
    blocked(&shape, &strides, block, offsets, &mut body);
    Ok(())
}

/// Select the loop nest for `shape.len()`.
fn run_interchange<const K: usize, F>(
    shape: &[usize],
    strides: &[[isize; K]],
    offsets: [isize; K],
    body: &mut F,
) where
    F: FnMut([usize; K]),
{
    fn arr<T: Copy, const D: usize>(v: &[T]) -> [T; D] {
        array::from_fn(|i| v[i])
    }

    match shape.len() {
        2 => interchange_2d(arr(shape), arr(strides), offsets, body),
        3 => interchange::<3, K, F>(arr(shape), arr(strides), offsets, body),
        4 => interchange::<4, K, F>(arr(shape), arr(strides), offsets, body),
        5 => interchange::<5, K, F>(arr(shape), arr(strides), offsets, body),
        6 => interchange::<6, K, F>(arr(shape), arr(strides), offsets, body),
        7 => interchange::<7, K, F>(arr(shape), arr(strides), offsets, body),
        8 => interchange::<8, K, F>(arr(shape), arr(strides), offsets, body),
        9 => interchange::<9, K, F>(arr(shape), arr(strides), offsets, body),
        10 => interchange::<10, K, F>(arr(shape), arr(strides), offsets, body),
        _ => interchange_dyn(shape, strides, offsets, body),
    }
}

// ============================================================================
// Public apply functions
// ============================================================================

/// Apply `f` to every element of `x`, writing the result into `y`.
///
/// `x` and `y` must have identical shapes; their strides, offsets and
/// declared orders are independent.
///
/// # Example
///
/// ```rust
/// use strided_ufunc::{unary, NdArray, Order};
///
/// let x = [1.0f64, 4.0, 9.0, 16.0];
/// let mut y = [0.0f64; 4];
/// let xv = NdArray::from_shape(&x[..], &[2, 2], Order::RowMajor).unwrap();
/// // Write in reverse memory order
/// let mut yv = NdArray::new(&mut y[..], &[2, 2], &[-2, -1], 3, Order::RowMajor).unwrap();
/// unary(&xv, &mut yv, f64::sqrt).unwrap();
/// assert_eq!(y, [4.0, 3.0, 2.0, 1.0]);
/// ```
pub fn unary<X, Y, F>(x: &NdArray<X>, y: &mut NdArray<Y>, mut f: F) -> Result<()>
where
    X: Accessor,
    Y: AccessorMut,
    F: FnMut(X::Elem) -> Y::Elem,
{
    let (xd, xl) = x.parts()?;
    let (yd, yl) = y.parts_mut()?;
    let dtypes = [xd.dtype(), yd.dtype()];
    for_each_index([xl, yl], dtypes, |[ix, iy]| {
        // SAFETY: both layouts were validated against their buffers when
        // the descriptors were built, and the shapes match.
        unsafe { yd.set_unchecked(iy, f(xd.get_unchecked(ix))) }
    })
}

/// Apply `f` to every pair of elements of `x` and `y`, writing into `z`.
pub fn binary<X, Y, Z, F>(x: &NdArray<X>, y: &NdArray<Y>, z: &mut NdArray<Z>, mut f: F) -> Result<()>
where
    X: Accessor,
    Y: Accessor,
    Z: AccessorMut,
    F: FnMut(X::Elem, Y::Elem) -> Z::Elem,
{
    let (xd, xl) = x.parts()?;
    let (yd, yl) = y.parts()?;
    let (zd, zl) = z.parts_mut()?;
    let dtypes = [xd.dtype(), yd.dtype(), zd.dtype()];
    for_each_index([xl, yl, zl], dtypes, |[ix, iy, iz]| {
        // SAFETY: validated layouts with matching shapes.
        unsafe { zd.set_unchecked(iz, f(xd.get_unchecked(ix), yd.get_unchecked(iy))) }
    })
}

/// Apply `f` to every element of `x`, writing its two results into `y1`
/// and `y2`.
///
/// For callbacks that produce a pair per element, such as a simultaneous
/// sine and cosine. Each call returns its pair by value.
pub fn unary2<X, Y1, Y2, F>(
    x: &NdArray<X>,
    y1: &mut NdArray<Y1>,
    y2: &mut NdArray<Y2>,
    mut f: F,
) -> Result<()>
where
    X: Accessor,
    Y1: AccessorMut,
    Y2: AccessorMut,
    F: FnMut(X::Elem) -> (Y1::Elem, Y2::Elem),
{
    let (xd, xl) = x.parts()?;
    let (y1d, y1l) = y1.parts_mut()?;
    let (y2d, y2l) = y2.parts_mut()?;
    let dtypes = [xd.dtype(), y1d.dtype(), y2d.dtype()];
    for_each_index([xl, y1l, y2l], dtypes, |[ix, i1, i2]| {
        // SAFETY: validated layouts with matching shapes.
        unsafe {
            let (a, b) = f(xd.get_unchecked(ix));
            y1d.set_unchecked(i1, a);
            y2d.set_unchecked(i2, b);
        }
    })
}
