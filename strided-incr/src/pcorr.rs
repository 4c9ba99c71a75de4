//! Pearson correlation and covariance over an unbounded stream.

use crate::moments::Moments;
use crate::Accumulator;

/// Sample Pearson product-moment correlation coefficient.
///
/// Without known means this is the Bessel-corrected sample estimate: the
/// first observation reports `0.0` (or NaN if it contained one), later ones
/// `(C/(N-1)) / (sx*sy)`. With [`IncrPcorr::with_means`] the population
/// formula `(C/N) / (sx*sy)` with `sx = sqrt(M2x/N)` is used instead.
#[derive(Debug, Clone, Copy)]
pub struct IncrPcorr {
    moments: Moments,
}

impl IncrPcorr {
    pub fn new() -> Self {
        log::debug!("IncrPcorr: sample means");
        Self {
            moments: Moments::sample(),
        }
    }

    /// Correlation about fixed, known means.
    pub fn with_means(mean_x: f64, mean_y: f64) -> Self {
        log::debug!("IncrPcorr: known means ({mean_x}, {mean_y})");
        Self {
            moments: Moments::with_means(mean_x, mean_y),
        }
    }

    /// Number of observations seen.
    pub fn len(&self) -> usize {
        self.moments.n
    }

    pub fn is_empty(&self) -> bool {
        self.moments.n == 0
    }
}

impl Default for IncrPcorr {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator for IncrPcorr {
    type Input = (f64, f64);
    type Output = f64;

    fn update(&mut self, (x, y): (f64, f64)) -> f64 {
        self.moments.push(x, y);
        self.moments.correlation().unwrap_or(f64::NAN)
    }

    fn current(&self) -> Option<f64> {
        self.moments.correlation()
    }
}

/// Sample covariance (`C/(N-1)`), or population covariance (`C/N`) about
/// known means.
#[derive(Debug, Clone, Copy)]
pub struct IncrCovariance {
    moments: Moments,
}

impl IncrCovariance {
    pub fn new() -> Self {
        log::debug!("IncrCovariance: sample means");
        Self {
            moments: Moments::sample(),
        }
    }

    pub fn with_means(mean_x: f64, mean_y: f64) -> Self {
        log::debug!("IncrCovariance: known means ({mean_x}, {mean_y})");
        Self {
            moments: Moments::with_means(mean_x, mean_y),
        }
    }
}

impl Default for IncrCovariance {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator for IncrCovariance {
    type Input = (f64, f64);
    type Output = f64;

    fn update(&mut self, (x, y): (f64, f64)) -> f64 {
        self.moments.push(x, y);
        self.moments.covariance().unwrap_or(f64::NAN)
    }

    fn current(&self) -> Option<f64> {
        self.moments.covariance()
    }
}
