//! Element-wise ufunc dispatch over strided n-dimensional arrays.
//!
//! An [`NdArray`] describes a buffer through `shape`, `strides`, `offset`
//! and a declared storage [`Order`]. The dispatcher applies a callback to
//! every element of one or two input arrays and writes the result into one
//! or two outputs, choosing a traversal per call:
//!
//! - 0-d arrays: the callback runs once
//! - one non-singleton dimension: a single strided loop
//! - contiguous arrays sharing an order: flattened into one loop
//! - arrays sharing an order and a stride direction: loop interchange with
//!   per-level increment tables, specialized for ranks 2 through 10
//! - everything else: cache-line sized tiles, loops sorted by input stride
//!
//! Every path visits each element exactly once, so results equal a naive
//! nested loop bit for bit.
//!
//! # Example
//!
//! ```rust
//! use strided_ufunc::{unary, NdArray, Order};
//!
//! let x = vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let mut y = vec![0.0f64; 6];
//!
//! // Walk x transposed into y
//! let xv = NdArray::new(&x[..], &[3, 2], &[1, 3], 0, Order::ColumnMajor).unwrap();
//! let mut yv = NdArray::from_shape(&mut y[..], &[3, 2], Order::RowMajor).unwrap();
//! unary(&xv, &mut yv, |v| v * 10.0).unwrap();
//!
//! assert_eq!(y, vec![10.0, 40.0, 20.0, 50.0, 30.0, 60.0]);
//! ```

pub mod accessor;
mod block;
mod dispatch;
pub mod dtype;
mod kernel;
pub mod order;
mod simd;
pub mod strided;
pub mod view;

pub use accessor::{Accessor, AccessorMut, ComplexBuffer, ComplexBufferMut};
pub use dispatch::{binary, unary, unary2};
pub use dtype::{DType, Element};
pub use order::{iteration_order, Order};
pub use strided::{
    strided_binary, strided_binary_ndarray, strided_mskunary, strided_mskunary_ndarray,
    strided_unary, strided_unary_ndarray,
};
pub use view::{col_major_strides, numel, row_major_strides, shape2strides, Layout, NdArray};

/// Tile row length in bytes for blocked iteration (one cache line).
pub const BLOCK_SIZE_IN_BYTES: usize = 64;

/// Tile edge length when no element size is known (`generic` dtype).
pub const BLOCK_SIZE_IN_ELEMENTS: usize = 8;

/// Highest rank with a dedicated loop nest. Higher ranks use a
/// dynamically sized increment table.
pub const MAX_SPECIALIZED_RANK: usize = 10;

/// Errors raised by descriptor construction and dispatch.
#[derive(Debug, thiserror::Error)]
pub enum UfuncError {
    /// Array ranks do not match.
    #[error("rank mismatch: {0} vs {1}")]
    RankMismatch(usize, usize),

    /// Array shapes differ.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// Stride array length doesn't match the shape.
    #[error("stride and shape length mismatch")]
    StrideLengthMismatch,

    /// Integer overflow while computing a linear index.
    #[error("offset overflow while computing linear index")]
    OffsetOverflow,

    /// Reachable indices fall outside the buffer.
    #[error("indices {min}..={max} out of bounds for buffer of length {len}")]
    OutOfBounds { min: isize, max: isize, len: usize },

    /// Unrecognized storage order string.
    #[error("invalid order: {0:?}")]
    InvalidOrder(String),

    /// Unrecognized dtype tag.
    #[error("invalid dtype: {0:?}")]
    InvalidDType(String),
}

/// Result type for ufunc operations.
pub type Result<T> = std::result::Result<T, UfuncError>;
