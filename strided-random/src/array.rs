//! Output buffers and adapter options.

use std::fmt;

use strided_ufunc::{DType, Element};

use crate::base::{MinstdShuffle, PrngState, MAX};
use crate::prng::Prng;
use crate::{RandomError, Result};

/// One element of a `generic` output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Float(f64),
    Integer(i64),
}

impl Scalar {
    /// Box a sample, keeping whole-number distributions integral when the
    /// value is representable.
    pub fn from_sample(v: f64, integer: bool) -> Self {
        if integer && v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
            Scalar::Integer(v as i64)
        } else {
            Scalar::Float(v)
        }
    }

    pub fn to_f64(self) -> f64 {
        match self {
            Scalar::Float(v) => v,
            Scalar::Integer(v) => v as f64,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Integer(v) => write!(f, "{v}"),
        }
    }
}

/// Elements a sample can be stored into.
///
/// Conversion from `f64` uses Rust's saturating float-to-int casts (NaN
/// becomes 0).
pub trait RandomElement: Element + Default {
    fn from_sample(v: f64) -> Self;
}

macro_rules! impl_random_element {
    ($($t:ty),*) => {
        $(impl RandomElement for $t {
            #[inline]
            fn from_sample(v: f64) -> Self {
                v as $t
            }
        })*
    };
}

impl_random_element!(i8, i16, i32, u8, u16, u32, f32, f64);

/// A freshly generated array, typed by its dtype.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArray {
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Uint8(Vec<u8>),
    /// Clamped: samples are rounded before saturating into `0..=255`.
    Uint8c(Vec<u8>),
    Uint16(Vec<u16>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Generic(Vec<Scalar>),
}

impl TypedArray {
    pub fn dtype(&self) -> DType {
        match self {
            TypedArray::Int8(_) => DType::Int8,
            TypedArray::Int16(_) => DType::Int16,
            TypedArray::Int32(_) => DType::Int32,
            TypedArray::Uint8(_) => DType::Uint8,
            TypedArray::Uint8c(_) => DType::Uint8c,
            TypedArray::Uint16(_) => DType::Uint16,
            TypedArray::Uint32(_) => DType::Uint32,
            TypedArray::Float32(_) => DType::Float32,
            TypedArray::Float64(_) => DType::Float64,
            TypedArray::Generic(_) => DType::Generic,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TypedArray::Int8(v) => v.len(),
            TypedArray::Int16(v) => v.len(),
            TypedArray::Int32(v) => v.len(),
            TypedArray::Uint8(v) | TypedArray::Uint8c(v) => v.len(),
            TypedArray::Uint16(v) => v.len(),
            TypedArray::Uint32(v) => v.len(),
            TypedArray::Float32(v) => v.len(),
            TypedArray::Float64(v) => v.len(),
            TypedArray::Generic(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element `i` widened to `f64`.
    pub fn get(&self, i: usize) -> Option<f64> {
        match self {
            TypedArray::Int8(v) => v.get(i).map(|&x| x as f64),
            TypedArray::Int16(v) => v.get(i).map(|&x| x as f64),
            TypedArray::Int32(v) => v.get(i).map(|&x| x as f64),
            TypedArray::Uint8(v) | TypedArray::Uint8c(v) => v.get(i).map(|&x| x as f64),
            TypedArray::Uint16(v) => v.get(i).map(|&x| x as f64),
            TypedArray::Uint32(v) => v.get(i).map(|&x| x as f64),
            TypedArray::Float32(v) => v.get(i).map(|&x| x as f64),
            TypedArray::Float64(v) => v.get(i).copied(),
            TypedArray::Generic(v) => v.get(i).map(|x| x.to_f64()),
        }
    }

    /// All elements widened to `f64`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        (0..self.len()).filter_map(|i| self.get(i)).collect()
    }
}

/// Check that `dtype` can hold generated samples.
pub(crate) fn check_dtype(dtype: DType) -> Result<DType> {
    if dtype.is_complex() {
        return Err(RandomError::UnsupportedDtype(dtype));
    }
    Ok(dtype)
}

/// Adapter configuration.
///
/// Without an explicit `prng`, a [`MinstdShuffle`] is created from `seed`
/// (or from entropy) and then restored to `state` if one is given. An
/// explicit `prng` is used as-is and `seed`/`state` are ignored.
///
/// ```rust
/// use strided_random::{RandomOptions, DType};
///
/// let opts = RandomOptions::new().dtype(DType::Float32).seed(1234);
/// assert_eq!(opts.get_dtype(), DType::Float32);
/// ```
#[derive(Debug)]
pub struct RandomOptions {
    dtype: DType,
    prng: Option<Prng>,
    seed: Option<u32>,
    state: Option<PrngState>,
}

impl Default for RandomOptions {
    fn default() -> Self {
        Self {
            dtype: DType::Float64,
            prng: None,
            seed: None,
            state: None,
        }
    }
}

impl RandomOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dtype(mut self, dtype: DType) -> Self {
        self.dtype = dtype;
        self
    }

    pub fn prng(mut self, prng: Prng) -> Self {
        self.prng = Some(prng);
        self
    }

    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn state(mut self, state: PrngState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn get_dtype(&self) -> DType {
        self.dtype
    }

    /// Validate the dtype and build the uniform source.
    pub(crate) fn resolve(self) -> Result<(DType, Prng)> {
        let dtype = check_dtype(self.dtype)?;
        if let Some(prng) = self.prng {
            if self.seed.is_some() || self.state.is_some() {
                log::debug!("explicit prng supplied; ignoring seed/state options");
            }
            return Ok((dtype, prng));
        }
        let seed = match self.seed {
            Some(seed) => seed,
            None => rand::Rng::gen_range(&mut rand::thread_rng(), 1..MAX),
        };
        let mut prng = Prng::from(MinstdShuffle::new(seed));
        if let Some(state) = &self.state {
            prng.set_state(state)?;
        }
        Ok((dtype, prng))
    }
}
