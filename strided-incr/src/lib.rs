//! Incremental (streaming) statistics.
//!
//! Each accumulator is a plain struct holding the running state of one
//! statistic. Observations are fed one at a time through
//! [`Accumulator::update`], which returns the updated statistic;
//! [`Accumulator::current`] reads it back without changing anything and
//! yields `None` until the first observation arrives.
//!
//! Constructor parameters are validated eagerly. Observations are not:
//! NaN and infinities are data and propagate through the recurrences.
//!
//! # Example
//!
//! ```rust
//! use strided_incr::{Accumulator, IncrEwStdev, IncrPcorr};
//!
//! let mut ew = IncrEwStdev::new(0.5).unwrap();
//! assert_eq!(ew.current(), None);
//! ew.update(2.0);
//! assert_eq!(ew.update(3.0), 0.5);
//!
//! let mut r = IncrPcorr::new();
//! for (x, y) in [(1.0, 4.0), (2.0, 3.0), (3.0, 2.0), (4.0, 1.0)] {
//!     r.update((x, y));
//! }
//! assert!((r.current().unwrap() + 1.0).abs() < 1e-12);
//! ```

mod ew;
mod meanvar;
mod moments;
mod moving;
mod pcorr;

pub use ew::{IncrEwMean, IncrEwStdev, IncrEwVariance};
pub use meanvar::{IncrMeanVar, IncrStdev, IncrVariance};
pub use moving::{IncrMCovariance, IncrMPcorr};
pub use pcorr::{IncrCovariance, IncrPcorr};

/// A statistic updated one observation at a time.
pub trait Accumulator {
    /// One observation (a scalar, or a pair for bivariate statistics).
    type Input;
    /// The statistic reported after each observation.
    type Output;

    /// Feed one observation and return the updated statistic.
    fn update(&mut self, input: Self::Input) -> Self::Output;

    /// The statistic as of the last observation, `None` before the first.
    fn current(&self) -> Option<Self::Output>;

    /// Feed every observation of `inputs`, returning the final statistic.
    fn extend<I>(&mut self, inputs: I) -> Option<Self::Output>
    where
        I: IntoIterator<Item = Self::Input>,
        Self: Sized,
    {
        for input in inputs {
            self.update(input);
        }
        self.current()
    }
}

/// Errors raised by accumulator constructors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IncrError {
    /// A parameter could not be interpreted as a number.
    #[error("invalid argument: {name} must be a number")]
    InvalidType { name: &'static str },

    /// A numeric parameter lies outside its admissible range.
    #[error("invalid argument: {name} must be on the interval [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A moving window must hold at least one observation.
    #[error("invalid argument: window size must be a positive integer, got {0}")]
    InvalidWindow(usize),
}

/// Result type for accumulator construction.
pub type Result<T> = std::result::Result<T, IncrError>;
