//! Deterministic random number generation.
//!
//! One seedable stream per match covers every random decision the rules
//! make: player-order shuffle, deck shuffles, defused-kitten reinsertion,
//! auto-cancel opponent pick, and random steals. Same seed, same match.
//!
//! Uses ChaCha8 for speed with high-quality randomness. `shuffle` is the
//! `rand` Fisher-Yates implementation, uniform over permutations.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic match RNG.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Generate a random usize in the given inclusive range.
    pub fn gen_range_inclusive(&mut self, range: std::ops::RangeInclusive<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place (uniform Fisher-Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}
