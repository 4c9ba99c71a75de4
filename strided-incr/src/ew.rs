//! Exponentially weighted mean, variance and standard deviation.
//!
//! With smoothing factor `alpha`, the first observation seeds
//! `mean = x, variance = 0`; every later one applies
//!
//! ```text
//! r = x - mean
//! incr = alpha * r
//! mean += incr
//! variance = (1 - alpha) * (variance + r * incr)
//! ```

use num_traits::ToPrimitive;

use crate::{Accumulator, IncrError, Result};

fn check_alpha<A: ToPrimitive>(alpha: A) -> Result<f64> {
    let value = alpha
        .to_f64()
        .ok_or(IncrError::InvalidType { name: "alpha" })?;
    if !(0.0..=1.0).contains(&value) {
        return Err(IncrError::OutOfRange {
            name: "alpha",
            value,
            min: 0.0,
            max: 1.0,
        });
    }
    Ok(value)
}

/// Shared recurrence state.
#[derive(Debug, Clone, Copy)]
struct EwState {
    alpha: f64,
    mean: f64,
    variance: f64,
    seeded: bool,
}

impl EwState {
    fn new(alpha: f64) -> Self {
        Self {
            alpha,
            mean: 0.0,
            variance: 0.0,
            seeded: false,
        }
    }

    #[inline]
    fn push(&mut self, x: f64) {
        if !self.seeded {
            self.mean = x;
            self.variance = 0.0;
            self.seeded = true;
            return;
        }
        let r = x - self.mean;
        let incr = self.alpha * r;
        self.mean += incr;
        self.variance = (1.0 - self.alpha) * (self.variance + r * incr);
    }
}

macro_rules! ew_accumulator {
    ($(#[$doc:meta])* $name:ident, |$s:ident| $out:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name {
            state: EwState,
        }

        impl $name {
            /// Create an accumulator with smoothing factor `alpha`.
            ///
            /// Fails with [`IncrError::InvalidType`] when `alpha` has no
            /// numeric value and [`IncrError::OutOfRange`] when it lies
            /// outside `[0, 1]`.
            pub fn new<A: ToPrimitive>(alpha: A) -> Result<Self> {
                let alpha = check_alpha(alpha)?;
                log::debug!(concat!(stringify!($name), ": alpha={}"), alpha);
                Ok(Self {
                    state: EwState::new(alpha),
                })
            }

            /// The smoothing factor.
            pub fn alpha(&self) -> f64 {
                self.state.alpha
            }
        }

        impl Accumulator for $name {
            type Input = f64;
            type Output = f64;

            fn update(&mut self, x: f64) -> f64 {
                self.state.push(x);
                let $s = &self.state;
                $out
            }

            fn current(&self) -> Option<f64> {
                let $s = &self.state;
                $s.seeded.then(|| $out)
            }
        }
    };
}

ew_accumulator!(
    /// Exponentially weighted moving mean.
    IncrEwMean,
    |s| s.mean
);

ew_accumulator!(
    /// Exponentially weighted moving variance.
    IncrEwVariance,
    |s| s.variance
);

ew_accumulator!(
    /// Exponentially weighted moving standard deviation.
    ///
    /// ```rust
    /// use strided_incr::{Accumulator, IncrEwStdev};
    ///
    /// let mut acc = IncrEwStdev::new(0.5).unwrap();
    /// assert_eq!(acc.update(2.0), 0.0);
    /// assert_eq!(acc.update(3.0), 0.5);
    /// ```
    IncrEwStdev,
    |s| s.variance.sqrt()
);
