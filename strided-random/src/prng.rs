//! The uniform source behind every distribution.

use std::fmt;

use rand::{Error, Rng, RngCore};

use crate::base::{Minstd, MinstdShuffle, PrngState};
use crate::{RandomError, Result};

/// A uniform `[0, 1)` source.
///
/// The base generators own inspectable state that can be read and
/// restored. A custom function or an arbitrary [`RngCore`] is opaque: its
/// seed and state read as `None` and restoring a state is an error.
pub enum Prng {
    Minstd(Minstd),
    MinstdShuffle(MinstdShuffle),
    /// A user-supplied function returning values on `[0, 1)`.
    Custom(Box<dyn FnMut() -> f64>),
    /// Any `rand` generator.
    Rng(Box<dyn RngCore>),
}

impl Prng {
    /// Wrap a uniform function.
    pub fn custom<F>(f: F) -> Self
    where
        F: FnMut() -> f64 + 'static,
    {
        Prng::Custom(Box::new(f))
    }

    /// Wrap a `rand` generator.
    pub fn from_rng<R: RngCore + 'static>(rng: R) -> Self {
        Prng::Rng(Box::new(rng))
    }

    /// Next uniform value on `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        match self {
            Prng::Minstd(g) => g.normalized(),
            Prng::MinstdShuffle(g) => g.normalized(),
            Prng::Custom(f) => f(),
            Prng::Rng(r) => r.gen::<f64>(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Prng::Minstd(_) => "minstd",
            Prng::MinstdShuffle(_) => "minstd-shuffle",
            Prng::Custom(_) => "custom",
            Prng::Rng(_) => "rng",
        }
    }

    /// Whether seed and state can be inspected and restored.
    pub fn is_stateful(&self) -> bool {
        matches!(self, Prng::Minstd(_) | Prng::MinstdShuffle(_))
    }

    pub fn seed(&self) -> Option<u32> {
        match self {
            Prng::Minstd(g) => Some(g.seed()),
            Prng::MinstdShuffle(g) => Some(g.seed()),
            _ => None,
        }
    }

    pub fn state(&self) -> Option<PrngState> {
        match self {
            Prng::Minstd(g) => Some(g.state()),
            Prng::MinstdShuffle(g) => Some(g.state()),
            _ => None,
        }
    }

    pub fn set_state(&mut self, state: &PrngState) -> Result<()> {
        match self {
            Prng::Minstd(g) => g.set_state(state),
            Prng::MinstdShuffle(g) => g.set_state(state),
            _ => Err(RandomError::StatelessPrng),
        }
    }
}

impl fmt::Debug for Prng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prng::Minstd(g) => f.debug_tuple("Minstd").field(g).finish(),
            Prng::MinstdShuffle(g) => f.debug_tuple("MinstdShuffle").field(g).finish(),
            Prng::Custom(_) => f.write_str("Custom(..)"),
            Prng::Rng(_) => f.write_str("Rng(..)"),
        }
    }
}

/// Bits whose `rand` float conversion (`(bits >> 11) * 2^-53`) gives back
/// `u`, after clamping `u` into `[0, 1)`.
#[inline]
fn uniform_to_bits(u: f64) -> u64 {
    const SCALE: f64 = (1u64 << 53) as f64;
    let m = (u * SCALE) as u64; // saturating: NaN and negatives map to 0
    m.min((1u64 << 53) - 1) << 11
}

/// Lets `rand_distr` samplers draw from any source.
impl RngCore for Prng {
    fn next_u32(&mut self) -> u32 {
        match self {
            Prng::Minstd(g) => g.next_u32(),
            Prng::MinstdShuffle(g) => g.next_u32(),
            Prng::Custom(f) => (uniform_to_bits(f()) >> 32) as u32,
            Prng::Rng(r) => r.next_u32(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self {
            Prng::Minstd(g) => g.next_u64(),
            Prng::MinstdShuffle(g) => g.next_u64(),
            Prng::Custom(f) => uniform_to_bits(f()),
            Prng::Rng(r) => r.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl From<Minstd> for Prng {
    fn from(g: Minstd) -> Self {
        Prng::Minstd(g)
    }
}

impl From<MinstdShuffle> for Prng {
    fn from(g: MinstdShuffle) -> Self {
        Prng::MinstdShuffle(g)
    }
}
