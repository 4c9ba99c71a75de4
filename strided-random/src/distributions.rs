//! Scalar distributions driven by a [`Prng`].
//!
//! Parameters are supplied per draw and the sampler is built from
//! `rand_distr` for each one. Out-of-domain parameters (a non-positive rate
//! or scale, an empty or unbounded interval, NaN) yield a NaN sample rather
//! than an error.

use rand_distr::{self as rd, Distribution};

use crate::prng::Prng;

/// A distribution with one parameter.
pub trait UnaryDistribution {
    const NAME: &'static str;

    /// Whether samples are whole numbers.
    const INTEGER: bool = false;

    fn sample(&self, prng: &mut Prng, p1: f64) -> f64;
}

/// A distribution with two parameters.
pub trait BinaryDistribution {
    const NAME: &'static str;

    const INTEGER: bool = false;

    fn sample(&self, prng: &mut Prng, p1: f64, p2: f64) -> f64;
}

/// Exponential distribution with rate `lambda > 0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exponential;

impl UnaryDistribution for Exponential {
    const NAME: &'static str = "exponential";

    fn sample(&self, prng: &mut Prng, lambda: f64) -> f64 {
        if lambda.is_nan() || lambda <= 0.0 {
            return f64::NAN;
        }
        rd::Exp::new(lambda).map_or(f64::NAN, |d| d.sample(prng))
    }
}

/// Continuous uniform distribution on `[a, b)` with finite `a < b`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform;

impl BinaryDistribution for Uniform {
    const NAME: &'static str = "uniform";

    fn sample(&self, prng: &mut Prng, a: f64, b: f64) -> f64 {
        // rand's uniform sampler asserts on these instead of failing
        if !(a < b && (b - a).is_finite()) {
            return f64::NAN;
        }
        rd::Uniform::new(a, b).sample(prng)
    }
}

/// Normal distribution with mean `mu` and standard deviation `sigma > 0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normal;

impl BinaryDistribution for Normal {
    const NAME: &'static str = "normal";

    fn sample(&self, prng: &mut Prng, mu: f64, sigma: f64) -> f64 {
        if mu.is_nan() || sigma.is_nan() || sigma <= 0.0 {
            return f64::NAN;
        }
        rd::Normal::new(mu, sigma).map_or(f64::NAN, |d| d.sample(prng))
    }
}

/// Log-normal distribution: `exp(N(mu, sigma))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNormal;

impl BinaryDistribution for LogNormal {
    const NAME: &'static str = "lognormal";

    fn sample(&self, prng: &mut Prng, mu: f64, sigma: f64) -> f64 {
        if mu.is_nan() || sigma.is_nan() || sigma <= 0.0 {
            return f64::NAN;
        }
        rd::LogNormal::new(mu, sigma).map_or(f64::NAN, |d| d.sample(prng))
    }
}

/// Largest magnitude at which every integer is exact in an `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Discrete uniform distribution on the integers `[a, b]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscreteUniform;

impl BinaryDistribution for DiscreteUniform {
    const NAME: &'static str = "discrete-uniform";
    const INTEGER: bool = true;

    fn sample(&self, prng: &mut Prng, a: f64, b: f64) -> f64 {
        let exact = |v: f64| v.fract() == 0.0 && v.abs() <= MAX_EXACT_INTEGER;
        if !(exact(a) && exact(b) && a <= b) {
            return f64::NAN;
        }
        rd::Uniform::new_inclusive(a as i64, b as i64).sample(prng) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::MinstdShuffle;
    use approx::assert_relative_eq;

    fn prng() -> Prng {
        Prng::from(MinstdShuffle::new(1234))
    }

    #[test]
    fn test_out_of_domain_is_nan() {
        let mut p = prng();
        assert!(Exponential.sample(&mut p, 0.0).is_nan());
        assert!(Exponential.sample(&mut p, f64::NAN).is_nan());
        assert!(Uniform.sample(&mut p, 1.0, 1.0).is_nan());
        assert!(Normal.sample(&mut p, 0.0, -1.0).is_nan());
        assert!(LogNormal.sample(&mut p, f64::NAN, 1.0).is_nan());
        assert!(DiscreteUniform.sample(&mut p, 0.5, 3.0).is_nan());
        assert!(DiscreteUniform.sample(&mut p, 3.0, 1.0).is_nan());
    }

    #[test]
    fn test_fixed_uniform_source() {
        let mut p = Prng::custom(|| 0.5);
        assert_relative_eq!(Uniform.sample(&mut p, 2.0, 4.0), 3.0, max_relative = 1e-12);
        // Ziggurat samplers accept their first candidate for a centred source
        assert_eq!(Normal.sample(&mut p, 1.5, 2.0), 1.5);
        assert!(Exponential.sample(&mut p, 2.0) > 0.0);
        let d = DiscreteUniform.sample(&mut p, 1.0, 4.0);
        assert!((1.0..=4.0).contains(&d) && d.fract() == 0.0);
    }

    #[test]
    fn test_same_state_same_samples() {
        let mut a = prng();
        let mut b = prng();
        for _ in 0..100 {
            assert_eq!(
                Normal.sample(&mut a, 0.0, 1.0).to_bits(),
                Normal.sample(&mut b, 0.0, 1.0).to_bits()
            );
            assert_eq!(
                Exponential.sample(&mut a, 3.0).to_bits(),
                Exponential.sample(&mut b, 3.0).to_bits()
            );
        }
    }

    #[test]
    fn test_unbounded_interval_is_nan() {
        let mut p = prng();
        assert!(Uniform.sample(&mut p, f64::NEG_INFINITY, 0.0).is_nan());
        assert!(Uniform.sample(&mut p, -f64::MAX, f64::MAX).is_nan());
        assert!(DiscreteUniform.sample(&mut p, 0.0, 1e300).is_nan());
        assert_eq!(DiscreteUniform.sample(&mut p, 7.0, 7.0), 7.0);
    }

    #[test]
    fn test_support_and_moments() {
        let mut p = prng();
        let n = 20_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let v = DiscreteUniform.sample(&mut p, -2.0, 2.0);
            assert!((-2.0..=2.0).contains(&v) && v.fract() == 0.0);
            let u = Uniform.sample(&mut p, -1.0, 3.0);
            assert!((-1.0..3.0).contains(&u));
            sum += Normal.sample(&mut p, 5.0, 2.0);
            assert!(LogNormal.sample(&mut p, 0.0, 1.0) > 0.0);
        }
        assert!((sum / n as f64 - 5.0).abs() < 0.1);
    }
}
