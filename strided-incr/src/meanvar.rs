//! Running mean and variance (Welford).

use crate::Accumulator;

#[derive(Debug, Clone, Copy, Default)]
struct Welford {
    n: usize,
    mean: f64,
    m2: f64,
    known_mean: Option<f64>,
}

impl Welford {
    fn with_mean(mean: f64) -> Self {
        Self {
            mean,
            known_mean: Some(mean),
            ..Self::default()
        }
    }

    #[inline]
    fn push(&mut self, x: f64) {
        self.n += 1;
        match self.known_mean {
            Some(mu) => {
                let d = x - mu;
                self.m2 += d * d;
            }
            None => {
                let delta = x - self.mean;
                self.mean += delta / self.n as f64;
                self.m2 += delta * (x - self.mean);
            }
        }
    }

    /// Unbiased variance, or the population variance about a known mean.
    fn variance(&self) -> Option<f64> {
        match (self.n, self.known_mean) {
            (0, _) => None,
            (n, Some(_)) => Some(self.m2 / n as f64),
            (1, None) => Some(0.0),
            (n, None) => Some(self.m2 / (n - 1) as f64),
        }
    }
}

/// Running arithmetic mean together with the unbiased sample variance.
///
/// ```rust
/// use strided_incr::{Accumulator, IncrMeanVar};
///
/// let mut acc = IncrMeanVar::new();
/// acc.extend([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
/// let (mean, var) = acc.current().unwrap();
/// assert!((mean - 5.0).abs() < 1e-12);
/// assert!((var - 32.0 / 7.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IncrMeanVar {
    state: Welford,
}

impl IncrMeanVar {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for IncrMeanVar {
    type Input = f64;
    type Output = (f64, f64);

    fn update(&mut self, x: f64) -> (f64, f64) {
        self.state.push(x);
        (self.state.mean, self.state.variance().unwrap_or(f64::NAN))
    }

    fn current(&self) -> Option<(f64, f64)> {
        self.state.variance().map(|v| (self.state.mean, v))
    }
}

/// Running unbiased sample variance.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncrVariance {
    state: Welford,
}

impl IncrVariance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Population variance about a fixed, known mean.
    pub fn with_mean(mean: f64) -> Self {
        log::debug!("IncrVariance: known mean {mean}");
        Self {
            state: Welford::with_mean(mean),
        }
    }
}

impl Accumulator for IncrVariance {
    type Input = f64;
    type Output = f64;

    fn update(&mut self, x: f64) -> f64 {
        self.state.push(x);
        self.state.variance().unwrap_or(f64::NAN)
    }

    fn current(&self) -> Option<f64> {
        self.state.variance()
    }
}

/// Running corrected sample standard deviation.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncrStdev {
    inner: IncrVariance,
}

impl IncrStdev {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mean(mean: f64) -> Self {
        Self {
            inner: IncrVariance::with_mean(mean),
        }
    }
}

impl Accumulator for IncrStdev {
    type Input = f64;
    type Output = f64;

    fn update(&mut self, x: f64) -> f64 {
        self.inner.update(x).sqrt()
    }

    fn current(&self) -> Option<f64> {
        self.inner.current().map(f64::sqrt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_empty_and_single() {
        let mut v = IncrVariance::new();
        assert_eq!(v.current(), None);
        assert_eq!(v.update(3.0), 0.0);
        assert_eq!(IncrMeanVar::new().update(3.0), (3.0, 0.0));
    }

    #[test]
    fn test_known_mean() {
        let mut s = IncrStdev::with_mean(0.0);
        s.update(3.0);
        assert_eq!(s.update(-4.0), (25.0f64 / 2.0).sqrt());
    }

    #[test]
    fn test_stdev() {
        let mut s = IncrStdev::new();
        let sd = s.extend([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_relative_eq!(sd, 2.138089935299395, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn prop_matches_two_pass(data in proptest::collection::vec(-1e3f64..1e3, 2..100)) {
            let n = data.len() as f64;
            let mean = data.iter().sum::<f64>() / n;
            let var = data.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (n - 1.0);
            let (m, v) = IncrMeanVar::new().extend(data.iter().copied()).unwrap();
            prop_assert!((m - mean).abs() <= 1e-9 * (1.0 + mean.abs()));
            prop_assert!((v - var).abs() <= 1e-8 * (1.0 + var));
        }
    }
}
