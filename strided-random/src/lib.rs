//! Pseudorandom generators bound to strided arrays.
//!
//! A scalar distribution ([`Uniform`], [`Normal`], [`Exponential`], ...)
//! draws from a uniform [`Prng`]. The adapters [`BinaryRandom`] and
//! [`UnaryRandom`] bind a distribution and a generator to arrays:
//!
//! - `generate` allocates a new [`TypedArray`] of the configured dtype
//! - `assign` overwrites a caller-provided buffer
//! - `fill` / `fill_ndarray` write strided views with strided parameters
//!
//! The adapters proxy the seed and state of the base generators
//! ([`Minstd`], [`MinstdShuffle`]); custom uniform sources are opaque.
//!
//! # Example
//!
//! ```rust
//! use strided_random::{BinaryRandom, Normal, RandomOptions};
//!
//! let mut normal = BinaryRandom::new(Normal, RandomOptions::new().seed(7)).unwrap();
//! let state = normal.state().unwrap();
//!
//! let mut a = [0.0f64; 4];
//! normal.assign(0.0, 1.0, &mut a).unwrap();
//!
//! // Replay the same draws into every other element
//! normal.set_state(&state).unwrap();
//! let mut b = [0.0f64; 8];
//! normal.fill(4, &[0.0], 0, &[1.0], 0, &mut b, 2).unwrap();
//! assert_eq!([b[0], b[2], b[4], b[6]], a);
//! ```

mod adapter;
mod array;
pub mod base;
pub mod distributions;
mod prng;

pub use adapter::{BinaryRandom, UnaryRandom};
pub use array::{RandomElement, RandomOptions, Scalar, TypedArray};
pub use base::{Minstd, MinstdShuffle, PrngState};
pub use distributions::{
    BinaryDistribution, DiscreteUniform, Exponential, LogNormal, Normal, UnaryDistribution,
    Uniform,
};
pub use prng::Prng;
pub use strided_ufunc::DType;

use strided_ufunc::UfuncError;

/// Errors raised by generator and adapter construction.
#[derive(Debug, thiserror::Error)]
pub enum RandomError {
    /// The requested output dtype cannot hold real samples.
    #[error("unsupported output dtype: {0}")]
    UnsupportedDtype(DType),

    /// A generator state snapshot is malformed or of the wrong kind.
    #[error("invalid generator state: {0}")]
    InvalidState(String),

    /// The uniform source has no inspectable state.
    #[error("the underlying uniform source has no seed or state")]
    StatelessPrng,

    /// Error from the strided fill path.
    #[error(transparent)]
    Ufunc(#[from] UfuncError),
}

/// Result type for random adapters.
pub type Result<T> = std::result::Result<T, RandomError>;
