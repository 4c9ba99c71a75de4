//! Element accessors for ndarray buffers.
//!
//! The dispatcher never indexes a buffer directly. It goes through
//! [`Accessor::get_unchecked`] / [`AccessorMut::set_unchecked`], so a
//! buffer whose logical elements are not its storage units (interleaved
//! complex pairs, for instance) plugs in without a copy.

use num_complex::Complex;

use crate::dtype::{DType, Element};

/// Read access to the logical elements of a buffer.
///
/// # Safety
/// Implementors must keep [`Accessor::len`] truthful and stable: every
/// `index < len()` must stay readable for as long as the value lives, and
/// `len()` must not change without `&mut` access to the value.
pub unsafe trait Accessor {
    type Elem: Copy;

    /// Data type tag of the logical elements.
    fn dtype(&self) -> DType;

    /// Number of logical elements.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read element `index`.
    ///
    /// # Safety
    /// `index` must be less than [`Accessor::len`].
    unsafe fn get_unchecked(&self, index: usize) -> Self::Elem;

    /// Bounds-checked read.
    fn get(&self, index: usize) -> Option<Self::Elem> {
        if index < self.len() {
            Some(unsafe { self.get_unchecked(index) })
        } else {
            None
        }
    }
}

/// Write access to the logical elements of a buffer.
///
/// # Safety
/// Every `index < len()` must be writable, under the same contract as
/// [`Accessor`].
pub unsafe trait AccessorMut: Accessor {
    /// Write element `index`.
    ///
    /// # Safety
    /// `index` must be less than [`Accessor::len`].
    unsafe fn set_unchecked(&mut self, index: usize, value: Self::Elem);

    /// Bounds-checked write. Returns `false` if `index` is out of range.
    fn set(&mut self, index: usize, value: Self::Elem) -> bool {
        if index < self.len() {
            unsafe { self.set_unchecked(index, value) };
            true
        } else {
            false
        }
    }
}

// ============================================================================
// Plain slices and vectors
// ============================================================================

unsafe impl<T: Element> Accessor for &[T] {
    type Elem = T;

    #[inline]
    fn dtype(&self) -> DType {
        T::DTYPE
    }

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline(always)]
    unsafe fn get_unchecked(&self, index: usize) -> T {
        debug_assert!(index < <[T]>::len(self));
        *<[T]>::get_unchecked(self, index)
    }
}

unsafe impl<T: Element> Accessor for &mut [T] {
    type Elem = T;

    #[inline]
    fn dtype(&self) -> DType {
        T::DTYPE
    }

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline(always)]
    unsafe fn get_unchecked(&self, index: usize) -> T {
        debug_assert!(index < <[T]>::len(self));
        *<[T]>::get_unchecked(self, index)
    }
}

unsafe impl<T: Element> AccessorMut for &mut [T] {
    #[inline(always)]
    unsafe fn set_unchecked(&mut self, index: usize, value: T) {
        debug_assert!(index < <[T]>::len(self));
        *<[T]>::get_unchecked_mut(self, index) = value;
    }
}

unsafe impl<T: Element> Accessor for Vec<T> {
    type Elem = T;

    #[inline]
    fn dtype(&self) -> DType {
        T::DTYPE
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline(always)]
    unsafe fn get_unchecked(&self, index: usize) -> T {
        debug_assert!(index < Vec::len(self));
        *self.as_slice().get_unchecked(index)
    }
}

unsafe impl<T: Element> AccessorMut for Vec<T> {
    #[inline(always)]
    unsafe fn set_unchecked(&mut self, index: usize, value: T) {
        debug_assert!(index < Vec::len(self));
        *self.as_mut_slice().get_unchecked_mut(index) = value;
    }
}

// ============================================================================
// Interleaved complex buffers
// ============================================================================

/// Read-only view of a real buffer holding interleaved `(re, im)` pairs.
///
/// Logical element `i` is `Complex::new(data[2*i], data[2*i + 1])`.
#[derive(Debug, Clone, Copy)]
pub struct ComplexBuffer<'a, T> {
    data: &'a [T],
}

impl<'a, T> ComplexBuffer<'a, T> {
    pub fn new(data: &'a [T]) -> Self {
        Self { data }
    }

    pub fn as_real(&self) -> &'a [T] {
        self.data
    }
}

unsafe impl<T: Copy> Accessor for ComplexBuffer<'_, T>
where
    Complex<T>: Element,
{
    type Elem = Complex<T>;

    #[inline]
    fn dtype(&self) -> DType {
        <Complex<T> as Element>::DTYPE
    }

    #[inline]
    fn len(&self) -> usize {
        self.data.len() / 2
    }

    #[inline(always)]
    unsafe fn get_unchecked(&self, index: usize) -> Complex<T> {
        let i = 2 * index;
        debug_assert!(i + 1 < self.data.len());
        Complex::new(*self.data.get_unchecked(i), *self.data.get_unchecked(i + 1))
    }
}

/// Mutable view of a real buffer holding interleaved `(re, im)` pairs.
#[derive(Debug)]
pub struct ComplexBufferMut<'a, T> {
    data: &'a mut [T],
}

impl<'a, T> ComplexBufferMut<'a, T> {
    pub fn new(data: &'a mut [T]) -> Self {
        Self { data }
    }

    pub fn as_real(&self) -> &[T] {
        self.data
    }
}

unsafe impl<T: Copy> Accessor for ComplexBufferMut<'_, T>
where
    Complex<T>: Element,
{
    type Elem = Complex<T>;

    #[inline]
    fn dtype(&self) -> DType {
        <Complex<T> as Element>::DTYPE
    }

    #[inline]
    fn len(&self) -> usize {
        self.data.len() / 2
    }

    #[inline(always)]
    unsafe fn get_unchecked(&self, index: usize) -> Complex<T> {
        let i = 2 * index;
        debug_assert!(i + 1 < self.data.len());
        Complex::new(*self.data.get_unchecked(i), *self.data.get_unchecked(i + 1))
    }
}

unsafe impl<T: Copy> AccessorMut for ComplexBufferMut<'_, T>
where
    Complex<T>: Element,
{
    #[inline(always)]
    unsafe fn set_unchecked(&mut self, index: usize, value: Complex<T>) {
        let i = 2 * index;
        debug_assert!(i + 1 < self.data.len());
        *self.data.get_unchecked_mut(i) = value.re;
        *self.data.get_unchecked_mut(i + 1) = value.im;
    }
}
