//! Ndarray descriptors.
//!
//! An [`NdArray`] pairs an element accessor (the buffer) with a [`Layout`]:
//!
//! - `shape`: extent of each dimension
//! - `strides`: signed element step of each dimension
//! - `offset`: linear index of the element at the all-zeros index
//! - `order`: declared storage order, which drives loop interchange
//!
//! Descriptors built with [`NdArray::new`] are bounds-validated once, so the
//! traversal kernels can read and write without per-element checks.

use std::sync::Arc;

use crate::accessor::{Accessor, AccessorMut};
use crate::dtype::DType;
use crate::order::Order;
use crate::{Result, UfuncError};

// ============================================================================
// Validation helpers
// ============================================================================

/// Validate that all accessed indices stay within `[0, len)`.
fn validate_bounds(len: usize, shape: &[usize], strides: &[isize], offset: usize) -> Result<()> {
    if shape.len() != strides.len() {
        return Err(UfuncError::StrideLengthMismatch);
    }
    // Empty array - no access needed
    if shape.iter().any(|&d| d == 0) {
        return Ok(());
    }
    let (min_index, max_index) = index_range(shape, strides, offset)?;
    if min_index < 0 || max_index as usize >= len {
        return Err(UfuncError::OutOfBounds {
            min: min_index,
            max: max_index,
            len,
        });
    }
    Ok(())
}

/// Smallest and largest linear index reachable through `shape`/`strides`.
fn index_range(shape: &[usize], strides: &[isize], offset: usize) -> Result<(isize, isize)> {
    let offset = isize::try_from(offset).map_err(|_| UfuncError::OffsetOverflow)?;
    let mut min_index = offset;
    let mut max_index = offset;
    for (&dim, &stride) in shape.iter().zip(strides.iter()) {
        if dim > 1 {
            let end = stride
                .checked_mul(dim as isize - 1)
                .ok_or(UfuncError::OffsetOverflow)?;
            if end >= 0 {
                max_index = max_index
                    .checked_add(end)
                    .ok_or(UfuncError::OffsetOverflow)?;
            } else {
                min_index = min_index
                    .checked_add(end)
                    .ok_or(UfuncError::OffsetOverflow)?;
            }
        }
    }
    Ok((min_index, max_index))
}

/// Number of elements described by `shape` (1 for a 0-d array).
pub fn numel(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Compute column-major strides (first index varies fastest).
pub fn col_major_strides(shape: &[usize]) -> Vec<isize> {
    let rank = shape.len();
    let mut strides = vec![1isize; rank];
    for i in 1..rank {
        strides[i] = strides[i - 1] * shape[i - 1] as isize;
    }
    strides
}

/// Compute row-major strides (last index varies fastest).
pub fn row_major_strides(shape: &[usize]) -> Vec<isize> {
    let rank = shape.len();
    let mut strides = vec![1isize; rank];
    for i in (0..rank.saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1] as isize;
    }
    strides
}

/// Contiguous strides for `shape` in the given storage order.
pub fn shape2strides(shape: &[usize], order: Order) -> Vec<isize> {
    match order {
        Order::RowMajor => row_major_strides(shape),
        Order::ColumnMajor => col_major_strides(shape),
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Shape, strides, offset and declared order of an ndarray.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    shape: Arc<[usize]>,
    strides: Arc<[isize]>,
    offset: usize,
    order: Order,
}

impl Layout {
    /// Create a layout. Only the rank agreement is checked here.
    pub fn new(shape: &[usize], strides: &[isize], offset: usize, order: Order) -> Result<Self> {
        if shape.len() != strides.len() {
            return Err(UfuncError::StrideLengthMismatch);
        }
        Ok(Self {
            shape: Arc::from(shape),
            strides: Arc::from(strides),
            offset,
            order,
        })
    }

    /// Contiguous layout starting at index 0.
    pub fn contiguous(shape: &[usize], order: Order) -> Self {
        Self {
            shape: Arc::from(shape),
            strides: Arc::from(shape2strides(shape, order)),
            offset: 0,
            order,
        }
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        numel(&self.shape)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear buffer index of a multi-dimensional index, or `None` when the
    /// index has the wrong rank or is out of range.
    pub fn linear_index(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.shape.len() {
            return None;
        }
        let mut idx = self.offset as isize;
        for ((&i, &dim), &stride) in indices.iter().zip(self.shape.iter()).zip(self.strides.iter())
        {
            if i >= dim {
                return None;
            }
            idx += i as isize * stride;
        }
        usize::try_from(idx).ok()
    }

    /// Whether the elements occupy one gap-free run of memory that is walked
    /// monotonically (in either direction) by the declared storage order.
    ///
    /// Singleton dimensions are ignored since their stride is never applied.
    pub fn is_contiguous(&self) -> bool {
        let canonical = shape2strides(&self.shape, self.order);
        let direction = match crate::order::iteration_order(&self.strides) {
            0 => return false,
            d => d as isize,
        };
        self.shape
            .iter()
            .zip(self.strides.iter().zip(canonical.iter()))
            .all(|(&dim, (&s, &c))| dim <= 1 || s == direction * c)
    }
}

// ============================================================================
// NdArray
// ============================================================================

/// Ndarray descriptor: an element accessor plus its [`Layout`].
///
/// `B` is the buffer, e.g. `&[f64]`, `&mut [f64]`, `Vec<i32>` or
/// [`ComplexBuffer`](crate::ComplexBuffer).
#[derive(Debug, Clone)]
pub struct NdArray<B> {
    data: B,
    layout: Layout,
}

impl<B: Accessor> NdArray<B> {
    /// Create a descriptor, validating that every reachable index lies
    /// inside the buffer.
    pub fn new(
        data: B,
        shape: &[usize],
        strides: &[isize],
        offset: usize,
        order: Order,
    ) -> Result<Self> {
        validate_bounds(data.len(), shape, strides, offset)?;
        let layout = Layout::new(shape, strides, offset, order)?;
        Ok(Self { data, layout })
    }

    /// Create a descriptor without bounds validation.
    ///
    /// # Safety
    /// `strides.len() == shape.len()` and every index
    /// `offset + sum(i_k * strides[k])` with `i_k < shape[k]` must be less
    /// than `data.len()`.
    pub unsafe fn new_unchecked(
        data: B,
        shape: &[usize],
        strides: &[isize],
        offset: usize,
        order: Order,
    ) -> Self {
        debug_assert!(validate_bounds(data.len(), shape, strides, offset).is_ok());
        Self {
            data,
            layout: Layout {
                shape: Arc::from(shape),
                strides: Arc::from(strides),
                offset,
                order,
            },
        }
    }

    /// Contiguous descriptor over the whole buffer.
    pub fn from_shape(data: B, shape: &[usize], order: Order) -> Result<Self> {
        let strides = shape2strides(shape, order);
        Self::new(data, shape, &strides, 0, order)
    }

    /// Descriptor from an existing layout, validated against the buffer.
    pub fn with_layout(data: B, layout: Layout) -> Result<Self> {
        validate_bounds(data.len(), layout.shape(), layout.strides(), layout.offset())?;
        Ok(Self { data, layout })
    }

    #[inline]
    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    pub fn data(&self) -> &B {
        &self.data
    }

    #[inline]
    pub fn into_data(self) -> B {
        self.data
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.layout.offset()
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.layout.order()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    /// Get an element by multi-dimensional index.
    ///
    /// # Panics
    /// Panics on a rank mismatch or an out-of-range index.
    pub fn get(&self, indices: &[usize]) -> B::Elem {
        let idx = self.checked_index(indices);
        unsafe { self.data.get_unchecked(idx) }
    }

    fn checked_index(&self, indices: &[usize]) -> usize {
        assert_eq!(indices.len(), self.ndim(), "wrong number of indices");
        match self.layout.linear_index(indices) {
            Some(idx) if idx < self.data.len() => idx,
            _ => panic!(
                "index {:?} out of bounds for shape {:?}",
                indices,
                self.shape()
            ),
        }
    }

    /// Re-validate the layout against the buffer's current length.
    pub fn check_bounds(&self) -> Result<()> {
        validate_bounds(
            self.data.len(),
            self.layout.shape(),
            self.layout.strides(),
            self.layout.offset(),
        )
    }

    /// Split into the buffer and the layout, borrowed separately, after
    /// checking the layout against the buffer's current length.
    #[inline]
    pub(crate) fn parts(&self) -> Result<(&B, &Layout)> {
        self.check_bounds()?;
        Ok((&self.data, &self.layout))
    }
}

impl<B: AccessorMut> NdArray<B> {
    /// Set an element by multi-dimensional index.
    ///
    /// # Panics
    /// Panics on a rank mismatch or an out-of-range index.
    pub fn set(&mut self, indices: &[usize], value: B::Elem) {
        let idx = self.checked_index(indices);
        unsafe { self.data.set_unchecked(idx, value) }
    }

    /// Split into the buffer and the layout for writing, after checking
    /// the layout against the buffer's current length.
    #[inline]
    pub(crate) fn parts_mut(&mut self) -> Result<(&mut B, &Layout)> {
        self.check_bounds()?;
        Ok((&mut self.data, &self.layout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_bounds() {
        let data = [0.0f64; 6];
        assert!(NdArray::new(&data[..], &[2, 3], &[3, 1], 0, Order::RowMajor).is_ok());
        assert!(NdArray::new(&data[..], &[2, 3], &[3, 1], 1, Order::RowMajor).is_err());
        // Negative stride walks down from offset
        assert!(NdArray::new(&data[..], &[2, 3], &[-3, 1], 3, Order::RowMajor).is_ok());
        assert!(NdArray::new(&data[..], &[2, 3], &[-3, 1], 2, Order::RowMajor).is_err());
        // Empty arrays never touch memory
        assert!(NdArray::new(&data[..], &[0, 100], &[100, 1], 50, Order::RowMajor).is_ok());
        assert!(matches!(
            NdArray::new(&data[..], &[2, 3], &[1], 0, Order::RowMajor),
            Err(UfuncError::StrideLengthMismatch)
        ));
    }

    #[test]
    fn test_strides_helpers() {
        assert_eq!(row_major_strides(&[2, 3, 4]), vec![12, 4, 1]);
        assert_eq!(col_major_strides(&[2, 3, 4]), vec![1, 2, 6]);
        assert_eq!(shape2strides(&[], Order::RowMajor), Vec::<isize>::new());
        assert_eq!(numel(&[]), 1);
        assert_eq!(numel(&[3, 0]), 0);
    }

    #[test]
    fn test_get_set() {
        let mut data = vec![0.0f64; 6];
        let mut arr = NdArray::new(&mut data[..], &[2, 3], &[1, 2], 0, Order::ColumnMajor).unwrap();
        arr.set(&[1, 2], 5.0);
        assert_eq!(arr.get(&[1, 2]), 5.0);
        assert_eq!(arr.dtype(), DType::Float64);
        assert_eq!(data[5], 5.0);
    }

    #[test]
    fn test_shrunk_buffer_rejected_before_writing() {
        let x = vec![1.0f64; 64 * 64];
        let xv = NdArray::from_shape(x, &[64, 64], Order::RowMajor).unwrap();
        let mut yv = NdArray::from_shape(vec![0.0f64; 64 * 64], &[64, 64], Order::RowMajor).unwrap();

        yv.data.truncate(1);
        yv.data.shrink_to_fit();
        let err = crate::unary(&xv, &mut yv, |v| v + 1.0).unwrap_err();
        assert!(matches!(err, UfuncError::OutOfBounds { max: 4095, len: 1, .. }));
        assert_eq!(yv.data(), &vec![0.0]);
        assert!(yv.check_bounds().is_err());
        assert!(xv.check_bounds().is_ok());
    }

    #[test]
    fn test_rebuilt_buffer_is_revalidated() {
        let arr = NdArray::from_shape(vec![0.0f64; 12], &[3, 4], Order::ColumnMajor).unwrap();
        let layout = arr.layout().clone();
        let mut data = arr.into_data();
        data.truncate(11);
        assert!(matches!(
            NdArray::with_layout(data, layout),
            Err(UfuncError::OutOfBounds { max: 11, len: 11, .. })
        ));
    }

    #[test]
    #[should_panic]
    fn test_get_past_shrunk_buffer() {
        let mut arr = NdArray::from_shape(vec![1i32, 2, 3], &[3], Order::RowMajor).unwrap();
        arr.data.truncate(2);
        arr.get(&[2]);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_range() {
        let data = [1i32, 2, 3];
        let arr = NdArray::from_shape(&data[..], &[3], Order::RowMajor).unwrap();
        arr.get(&[3]);
    }

    #[test]
    fn test_is_contiguous() {
        let l = Layout::contiguous(&[2, 3], Order::RowMajor);
        assert!(l.is_contiguous());
        let l = Layout::new(&[2, 3], &[-3, -1], 5, Order::RowMajor).unwrap();
        assert!(l.is_contiguous());
        // Transposed view declared row-major is not walked contiguously
        let l = Layout::new(&[3, 2], &[1, 3], 0, Order::RowMajor).unwrap();
        assert!(!l.is_contiguous());
        // Singleton dimensions are ignored
        let l = Layout::new(&[1, 4], &[99, 1], 0, Order::RowMajor).unwrap();
        assert!(l.is_contiguous());
        let l = Layout::new(&[2, 3], &[6, 2], 0, Order::RowMajor).unwrap();
        assert!(!l.is_contiguous());
    }

    #[test]
    fn test_linear_index() {
        let l = Layout::new(&[2, 3], &[-3, 1], 3, Order::RowMajor).unwrap();
        assert_eq!(l.linear_index(&[0, 0]), Some(3));
        assert_eq!(l.linear_index(&[1, 2]), Some(2));
        assert_eq!(l.linear_index(&[2, 0]), None);
        assert_eq!(l.linear_index(&[0]), None);
    }
}
