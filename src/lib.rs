//! Strided numeric kernels.
//!
//! This crate bundles the workspace members behind one dependency:
//!
//! - [`blas`] ([`strided_blas`]): 1-D kernels over `(buffer, stride[, offset])`
//!   views: reversal, cumulative sums, masked extrema, sorting, shifted sums
//!   and level-1 BLAS
//! - [`ufunc`] ([`strided_ufunc`]): the n-dimensional element-wise dispatcher
//!   ([`unary`], [`binary`], [`unary2`]) over [`NdArray`] descriptors, plus
//!   the 1-D strided front ends built on it
//! - [`incr`] ([`strided_incr`]): streaming accumulators
//! - [`random`] ([`strided_random`]): distributions bound to arrays
//!
//! # Conventions
//!
//! Strides are signed element counts. A conventional 1-D entry point
//! starts a negative-stride view at the far end of the buffer, so a
//! negative stride walks the same elements in reverse; the `_ndarray`
//! variants take the starting offset explicitly. `n == 0` is always a
//! no-op. NaN is data and propagates.
//!
//! # Example
//!
//! ```rust
//! use strided_numerics::{blas, unary, NdArray, Order};
//!
//! // Reverse every other element in place
//! let mut x = [1.0, -2.0, 3.0, -4.0, 5.0, -6.0];
//! blas::grev(3, &mut x, 2);
//! assert_eq!(x, [5.0, -2.0, 3.0, -4.0, 1.0, -6.0]);
//!
//! // Square a column-major 2x3 array into a row-major one
//! let src = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let mut dst = [0.0; 6];
//! let a = NdArray::from_shape(&src[..], &[2, 3], Order::ColumnMajor).unwrap();
//! let mut b = NdArray::from_shape(&mut dst[..], &[2, 3], Order::RowMajor).unwrap();
//! unary(&a, &mut b, |v| v * v).unwrap();
//! assert_eq!(dst, [1.0, 9.0, 25.0, 4.0, 16.0, 36.0]);
//! ```

pub use strided_blas as blas;
pub use strided_incr as incr;
pub use strided_random as random;
pub use strided_ufunc as ufunc;

pub use num_complex::Complex;
pub use strided_incr::Accumulator;
pub use strided_ufunc::{
    binary, unary, unary2, Accessor, AccessorMut, ComplexBuffer, ComplexBufferMut, DType, Layout,
    NdArray, Order, UfuncError,
};

/// Re-exports of the workspace members under one path.
pub mod prelude {
    pub use strided_blas::*;
    pub use strided_incr::{
        Accumulator, IncrCovariance, IncrEwMean, IncrEwStdev, IncrEwVariance, IncrMCovariance,
        IncrMPcorr, IncrMeanVar, IncrPcorr, IncrStdev, IncrVariance,
    };
    pub use strided_random::{
        BinaryRandom, DiscreteUniform, Exponential, LogNormal, Minstd, MinstdShuffle, Normal, Prng,
        RandomOptions, TypedArray, UnaryRandom, Uniform,
    };
    pub use strided_ufunc::{
        binary, strided_binary, strided_mskunary, strided_unary, unary, unary2, DType, NdArray,
        Order,
    };
}
