//! Distributions bound to arrays.
//!
//! An adapter pairs a distribution with a [`Prng`] and an output dtype. It
//! fills strided views through the ufunc front ends, treating the parameter
//! arrays as ordinary strided inputs (stride 0 broadcasts a single value),
//! and generates whole arrays of the configured dtype.

use strided_ufunc::{
    strided_binary, strided_binary_ndarray, strided_unary, strided_unary_ndarray, DType,
};

use crate::array::{RandomElement, RandomOptions, Scalar, TypedArray};
use crate::base::PrngState;
use crate::distributions::{BinaryDistribution, UnaryDistribution};
use crate::prng::Prng;
use crate::{RandomError, Result};

/// Allocate a dtype-tagged array of `len` samples. Typed dtypes go through
/// the strided fill path; `generic` boxes one sample at a time.
macro_rules! generate_typed {
    ($self:ident, $len:expr, $integer:expr, ($($p:expr),*)) => {
        Ok(match $self.dtype {
            DType::Int8 => TypedArray::Int8($self.filled($len, $($p),*)?),
            DType::Int16 => TypedArray::Int16($self.filled($len, $($p),*)?),
            DType::Int32 => TypedArray::Int32($self.filled($len, $($p),*)?),
            DType::Uint8 => TypedArray::Uint8($self.filled($len, $($p),*)?),
            DType::Uint8c => TypedArray::Uint8c(
                $self
                    .filled::<f64>($len, $($p),*)?
                    .iter()
                    .map(|v| v.round() as u8)
                    .collect(),
            ),
            DType::Uint16 => TypedArray::Uint16($self.filled($len, $($p),*)?),
            DType::Uint32 => TypedArray::Uint32($self.filled($len, $($p),*)?),
            DType::Float32 => TypedArray::Float32($self.filled($len, $($p),*)?),
            DType::Float64 => TypedArray::Float64($self.filled($len, $($p),*)?),
            DType::Generic => TypedArray::Generic(
                (0..$len)
                    .map(|_| Scalar::from_sample($self.sample($($p),*), $integer))
                    .collect(),
            ),
            other => return Err(RandomError::UnsupportedDtype(other)),
        })
    };
}

macro_rules! state_proxies {
    () => {
        /// Output dtype of [`Self::generate`].
        pub fn dtype(&self) -> DType {
            self.dtype
        }

        /// Seed of the underlying generator; `None` for custom sources.
        pub fn seed(&self) -> Option<u32> {
            self.prng.seed()
        }

        /// State of the underlying generator; `None` for custom sources.
        pub fn state(&self) -> Option<PrngState> {
            self.prng.state()
        }

        /// Restore the underlying generator. Custom sources reject this with
        /// [`RandomError::StatelessPrng`](crate::RandomError::StatelessPrng).
        pub fn set_state(&mut self, state: &PrngState) -> Result<()> {
            self.prng.set_state(state)
        }

        pub fn prng(&self) -> &Prng {
            &self.prng
        }

        pub fn prng_mut(&mut self) -> &mut Prng {
            &mut self.prng
        }
    };
}

// ============================================================================
// Binary
// ============================================================================

/// A two-parameter distribution bound to arrays.
///
/// ```rust
/// use strided_random::{BinaryRandom, DType, RandomOptions, Uniform};
///
/// let mut rand = BinaryRandom::new(Uniform, RandomOptions::new().seed(42)).unwrap();
/// let out = rand.generate(5, 2.0, 3.0).unwrap();
/// assert_eq!(out.dtype(), DType::Float64);
/// assert!(out.to_f64_vec().iter().all(|v| (2.0..3.0).contains(v)));
/// ```
#[derive(Debug)]
pub struct BinaryRandom<D> {
    dist: D,
    prng: Prng,
    dtype: DType,
}

impl<D: BinaryDistribution> BinaryRandom<D> {
    pub fn new(dist: D, options: RandomOptions) -> Result<Self> {
        let (dtype, prng) = options.resolve()?;
        log::debug!("{}: dtype={}, prng={}", D::NAME, dtype, prng.name());
        Ok(Self { dist, prng, dtype })
    }

    state_proxies!();

    /// One sample.
    pub fn sample(&mut self, p1: f64, p2: f64) -> f64 {
        self.dist.sample(&mut self.prng, p1, p2)
    }

    /// A new array of `len` samples in the configured dtype.
    pub fn generate(&mut self, len: usize, p1: f64, p2: f64) -> Result<TypedArray> {
        generate_typed!(self, len, D::INTEGER, (p1, p2))
    }

    fn filled<T: RandomElement>(&mut self, len: usize, p1: f64, p2: f64) -> Result<Vec<T>> {
        let mut buf = vec![T::default(); len];
        self.assign(p1, p2, &mut buf)?;
        Ok(buf)
    }

    /// Overwrite every element of `out` with a sample.
    pub fn assign<T: RandomElement>(&mut self, p1: f64, p2: f64, out: &mut [T]) -> Result<()> {
        let n = out.len();
        self.fill(n, &[p1], 0, &[p2], 0, out, 1)
    }

    /// Fill `n` strided elements of `out`, drawing element `i` with the
    /// `i`-th strided parameters.
    #[allow(clippy::too_many_arguments)]
    pub fn fill<T: RandomElement>(
        &mut self,
        n: usize,
        p1: &[f64],
        stride_p1: isize,
        p2: &[f64],
        stride_p2: isize,
        out: &mut [T],
        stride_out: isize,
    ) -> Result<()> {
        let (dist, prng) = (&self.dist, &mut self.prng);
        strided_binary(n, p1, stride_p1, p2, stride_p2, out, stride_out, |a, b| {
            T::from_sample(dist.sample(prng, a, b))
        })?;
        Ok(())
    }

    /// [`BinaryRandom::fill`] with explicit starting offsets.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_ndarray<T: RandomElement>(
        &mut self,
        n: usize,
        p1: &[f64],
        stride_p1: isize,
        offset_p1: usize,
        p2: &[f64],
        stride_p2: isize,
        offset_p2: usize,
        out: &mut [T],
        stride_out: isize,
        offset_out: usize,
    ) -> Result<()> {
        let (dist, prng) = (&self.dist, &mut self.prng);
        strided_binary_ndarray(
            n,
            p1,
            stride_p1,
            offset_p1,
            p2,
            stride_p2,
            offset_p2,
            out,
            stride_out,
            offset_out,
            |a, b| T::from_sample(dist.sample(prng, a, b)),
        )?;
        Ok(())
    }
}

// ============================================================================
// Unary
// ============================================================================

/// A one-parameter distribution bound to arrays.
#[derive(Debug)]
pub struct UnaryRandom<D> {
    dist: D,
    prng: Prng,
    dtype: DType,
}

impl<D: UnaryDistribution> UnaryRandom<D> {
    pub fn new(dist: D, options: RandomOptions) -> Result<Self> {
        let (dtype, prng) = options.resolve()?;
        log::debug!("{}: dtype={}, prng={}", D::NAME, dtype, prng.name());
        Ok(Self { dist, prng, dtype })
    }

    state_proxies!();

    pub fn sample(&mut self, p1: f64) -> f64 {
        self.dist.sample(&mut self.prng, p1)
    }

    pub fn generate(&mut self, len: usize, p1: f64) -> Result<TypedArray> {
        generate_typed!(self, len, D::INTEGER, (p1))
    }

    fn filled<T: RandomElement>(&mut self, len: usize, p1: f64) -> Result<Vec<T>> {
        let mut buf = vec![T::default(); len];
        self.assign(p1, &mut buf)?;
        Ok(buf)
    }

    pub fn assign<T: RandomElement>(&mut self, p1: f64, out: &mut [T]) -> Result<()> {
        let n = out.len();
        self.fill(n, &[p1], 0, out, 1)
    }

    pub fn fill<T: RandomElement>(
        &mut self,
        n: usize,
        p1: &[f64],
        stride_p1: isize,
        out: &mut [T],
        stride_out: isize,
    ) -> Result<()> {
        let (dist, prng) = (&self.dist, &mut self.prng);
        strided_unary(n, p1, stride_p1, out, stride_out, |a| {
            T::from_sample(dist.sample(prng, a))
        })?;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn fill_ndarray<T: RandomElement>(
        &mut self,
        n: usize,
        p1: &[f64],
        stride_p1: isize,
        offset_p1: usize,
        out: &mut [T],
        stride_out: isize,
        offset_out: usize,
    ) -> Result<()> {
        let (dist, prng) = (&self.dist, &mut self.prng);
        strided_unary_ndarray(
            n,
            p1,
            stride_p1,
            offset_p1,
            out,
            stride_out,
            offset_out,
            |a| T::from_sample(dist.sample(prng, a)),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Minstd;
    use crate::distributions::{DiscreteUniform, Exponential, Normal, Uniform};

    fn seeded(dtype: DType) -> RandomOptions {
        RandomOptions::new().dtype(dtype).seed(1234)
    }

    #[test]
    fn test_typed_and_generic_agree() {
        // Same seed, same draws: the typed path and the generic fallback
        // visit elements in the same order
        let mut typed = BinaryRandom::new(Uniform, seeded(DType::Float64)).unwrap();
        let mut generic = BinaryRandom::new(Uniform, seeded(DType::Generic)).unwrap();
        let a = typed.generate(50, -1.0, 1.0).unwrap();
        let b = generic.generate(50, -1.0, 1.0).unwrap();
        assert_eq!(b.dtype(), DType::Generic);
        assert_eq!(a.to_f64_vec(), b.to_f64_vec());
    }

    #[test]
    fn test_integer_dtypes() {
        let mut rand = BinaryRandom::new(DiscreteUniform, seeded(DType::Int8)).unwrap();
        match rand.generate(100, -3.0, 3.0).unwrap() {
            TypedArray::Int8(v) => assert!(v.iter().all(|x| (-3..=3).contains(x))),
            other => panic!("unexpected {:?}", other.dtype()),
        }
        let mut rand = BinaryRandom::new(DiscreteUniform, seeded(DType::Generic)).unwrap();
        match rand.generate(3, 0.0, 9.0).unwrap() {
            TypedArray::Generic(v) => assert!(v.iter().all(|s| matches!(s, Scalar::Integer(_)))),
            other => panic!("unexpected {:?}", other.dtype()),
        }
        let mut rand = BinaryRandom::new(Uniform, seeded(DType::Uint8c)).unwrap();
        let out = rand.generate(10, 0.0, 400.0).unwrap();
        assert_eq!(out.dtype(), DType::Uint8c);
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn test_unsupported_dtype() {
        assert!(matches!(
            BinaryRandom::new(Normal, seeded(DType::Complex128)),
            Err(RandomError::UnsupportedDtype(DType::Complex128))
        ));
    }

    #[test]
    fn test_strided_fill_leaves_gaps() {
        let mut rand = UnaryRandom::new(Exponential, seeded(DType::Float64)).unwrap();
        let lambdas = [1.0, 2.0, 4.0];
        let mut out = [-1.0f64; 6];
        rand.fill(3, &lambdas, 1, &mut out, -2).unwrap();
        for (i, v) in out.iter().enumerate() {
            if i % 2 == 0 {
                assert!(*v >= 0.0);
            } else {
                assert_eq!(*v, -1.0);
            }
        }

        let mut out = [0.0f32; 4];
        rand.fill_ndarray(2, &[1.0], 0, 0, &mut out, 1, 2).unwrap();
        assert_eq!(&out[..2], &[0.0, 0.0]);
        assert!(out[2] > 0.0 && out[3] > 0.0);
    }

    #[test]
    fn test_bad_parameters_give_nan() {
        let mut rand = BinaryRandom::new(Normal, seeded(DType::Float64)).unwrap();
        let mut out = [0.0f64; 4];
        rand.fill(2, &[0.0], 0, &[1.0, -1.0], 1, &mut out, 1).unwrap();
        assert!(out[0].is_finite());
        assert!(out[1].is_nan());
        assert_eq!(&out[2..], &[0.0, 0.0]);

        rand.assign(0.0, f64::NAN, &mut out).unwrap();
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_state_proxy() {
        let mut rand = BinaryRandom::new(Uniform, seeded(DType::Float64)).unwrap();
        assert_eq!(rand.seed(), Some(1234));
        let snap = rand.state().unwrap();
        let first = rand.generate(8, 0.0, 1.0).unwrap();
        rand.set_state(&snap).unwrap();
        assert_eq!(rand.generate(8, 0.0, 1.0).unwrap(), first);

        let opts = RandomOptions::new().prng(Prng::from(Minstd::new(5)));
        let rand = BinaryRandom::new(Uniform, opts).unwrap();
        assert_eq!(rand.prng().name(), "minstd");
        assert_eq!(rand.seed(), Some(5));
    }

    #[test]
    fn test_custom_prng_is_stateless() {
        let opts = RandomOptions::new().prng(Prng::custom(|| 0.5));
        let mut rand = BinaryRandom::new(Uniform, opts).unwrap();
        assert_eq!(rand.seed(), None);
        assert_eq!(rand.state(), None);
        assert!(matches!(
            rand.set_state(&PrngState::Minstd { state: 1 }),
            Err(RandomError::StatelessPrng)
        ));
        let out = rand.generate(3, 0.0, 2.0).unwrap();
        assert_eq!(out, TypedArray::Float64(vec![1.0, 1.0, 1.0]));
    }
}
