//! Park-Miller minimal standard generators with inspectable state.
//!
//! Both generators produce integers on `[1, 2^31 - 2]` through the Lehmer
//! recurrence `s = 16807 * s mod (2^31 - 1)`. [`MinstdShuffle`] passes the
//! stream through a 32-entry Bays-Durham shuffle table to break up the
//! serial correlation of the plain recurrence.

use rand::{Error, RngCore, SeedableRng};

use crate::{RandomError, Result};

/// Multiplier of the Lehmer recurrence.
pub const A: u64 = 16807;

/// Modulus `2^31 - 1`.
pub const MAX: u32 = 2_147_483_647;

/// Length of the shuffle table.
pub const TABLE_LENGTH: usize = 32;

/// Draws discarded before the shuffle table is filled.
const NUM_WARMUPS: usize = 8;

#[inline]
fn lehmer(s: u32) -> u32 {
    ((A * s as u64) % MAX as u64) as u32
}

/// Map an arbitrary `u32` onto a valid seed in `[1, MAX - 1]`.
pub fn normalize_seed(seed: u32) -> u32 {
    match seed {
        0 => 1,
        MAX => MAX - 1,
        s => (s % MAX).max(1),
    }
}

#[inline]
fn check_word(v: u32) -> Result<u32> {
    if v == 0 || v >= MAX {
        return Err(RandomError::InvalidState(format!(
            "state word {v} is outside [1, {}]",
            MAX - 1
        )));
    }
    Ok(v)
}

/// Normalize a raw generator output to `[0, 1)`.
#[inline]
pub(crate) fn normalize(v: u32) -> f64 {
    (v - 1) as f64 / (MAX - 1) as f64
}

/// Snapshot of a base generator, restorable with `set_state`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrngState {
    Minstd {
        state: u32,
    },
    MinstdShuffle {
        state: u32,
        shuffle: u32,
        table: [u32; TABLE_LENGTH],
    },
}

impl PrngState {
    fn kind(&self) -> &'static str {
        match self {
            PrngState::Minstd { .. } => "minstd",
            PrngState::MinstdShuffle { .. } => "minstd-shuffle",
        }
    }
}

// ============================================================================
// MINSTD
// ============================================================================

/// Park-Miller "minimal standard" linear congruential generator.
///
/// ```rust
/// use strided_random::Minstd;
///
/// let mut rng = Minstd::new(1);
/// assert_eq!(rng.next_int(), 16807);
/// assert_eq!(rng.next_int(), 282_475_249);
/// ```
#[derive(Debug, Clone)]
pub struct Minstd {
    seed: u32,
    state: u32,
}

impl Minstd {
    pub fn new(seed: u32) -> Self {
        let seed = normalize_seed(seed);
        Self { seed, state: seed }
    }

    /// The (normalized) seed the generator started from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn state(&self) -> PrngState {
        PrngState::Minstd { state: self.state }
    }

    /// Restore a snapshot taken with [`Minstd::state`].
    pub fn set_state(&mut self, state: &PrngState) -> Result<()> {
        match state {
            PrngState::Minstd { state } => {
                self.state = check_word(*state)?;
                Ok(())
            }
            other => Err(RandomError::InvalidState(format!(
                "expected minstd state, got {}",
                other.kind()
            ))),
        }
    }

    /// Next integer on `[1, MAX - 1]`.
    #[inline]
    pub fn next_int(&mut self) -> u32 {
        self.state = lehmer(self.state);
        self.state
    }

    /// Next value on `[0, 1)`.
    #[inline]
    pub fn normalized(&mut self) -> f64 {
        normalize(self.next_int())
    }
}

// ============================================================================
// MINSTD with shuffle table
// ============================================================================

/// Minimal standard generator with a Bays-Durham shuffle.
#[derive(Debug, Clone)]
pub struct MinstdShuffle {
    seed: u32,
    state: u32,
    shuffle: u32,
    table: [u32; TABLE_LENGTH],
}

impl MinstdShuffle {
    pub fn new(seed: u32) -> Self {
        let seed = normalize_seed(seed);
        let mut state = seed;
        for _ in 0..NUM_WARMUPS {
            state = lehmer(state);
        }
        let mut table = [0u32; TABLE_LENGTH];
        for slot in table.iter_mut().rev() {
            state = lehmer(state);
            *slot = state;
        }
        Self {
            seed,
            state,
            shuffle: table[0],
            table,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn state(&self) -> PrngState {
        PrngState::MinstdShuffle {
            state: self.state,
            shuffle: self.shuffle,
            table: self.table,
        }
    }

    /// Restore a snapshot taken with [`MinstdShuffle::state`]. Every word of
    /// the snapshot must be a valid generator output.
    pub fn set_state(&mut self, state: &PrngState) -> Result<()> {
        match state {
            PrngState::MinstdShuffle {
                state,
                shuffle,
                table,
            } => {
                for &v in table {
                    check_word(v)?;
                }
                self.state = check_word(*state)?;
                self.shuffle = check_word(*shuffle)?;
                self.table = *table;
                Ok(())
            }
            other => Err(RandomError::InvalidState(format!(
                "expected minstd-shuffle state, got {}",
                other.kind()
            ))),
        }
    }

    #[inline]
    pub fn next_int(&mut self) -> u32 {
        let i = (TABLE_LENGTH as u64 * self.shuffle as u64 / MAX as u64) as usize;
        self.shuffle = self.table[i];
        self.state = lehmer(self.state);
        self.table[i] = self.state;
        self.shuffle
    }

    #[inline]
    pub fn normalized(&mut self) -> f64 {
        normalize(self.next_int())
    }
}

// ============================================================================
// rand integration
// ============================================================================

macro_rules! impl_rand {
    ($t:ty) => {
        impl RngCore for $t {
            /// Two draws contribute their high 16 bits each.
            fn next_u32(&mut self) -> u32 {
                let hi = (self.next_int() >> 15) & 0xFFFF;
                let lo = (self.next_int() >> 15) & 0xFFFF;
                (hi << 16) | lo
            }

            fn next_u64(&mut self) -> u64 {
                ((self.next_u32() as u64) << 32) | self.next_u32() as u64
            }

            fn fill_bytes(&mut self, dest: &mut [u8]) {
                for chunk in dest.chunks_mut(4) {
                    let bytes = self.next_u32().to_le_bytes();
                    chunk.copy_from_slice(&bytes[..chunk.len()]);
                }
            }

            fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), Error> {
                self.fill_bytes(dest);
                Ok(())
            }
        }

        impl SeedableRng for $t {
            type Seed = [u8; 4];

            fn from_seed(seed: Self::Seed) -> Self {
                Self::new(u32::from_le_bytes(seed))
            }

            fn seed_from_u64(state: u64) -> Self {
                Self::new((state % MAX as u64) as u32)
            }
        }
    };
}

impl_rand!(Minstd);
impl_rand!(MinstdShuffle);
