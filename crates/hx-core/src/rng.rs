//! Deterministic RNG for encounter rolls.
//!
//! A single seeded `SmallRng` per travel session: the same seed and the same
//! sequence of playback ticks always reproduce the same encounters, which
//! keeps session replays and tests exact.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Session-level deterministic RNG.
pub struct TravelRng(SmallRng);

impl TravelRng {
    pub fn new(seed: u64) -> Self {
        TravelRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// One "1-in-N" die: draw uniformly in `[1, n]` and report whether the
    /// draw came up 1.  `n == 0` never triggers.
    #[inline]
    pub fn roll_1_in(&mut self, n: u32) -> bool {
        n > 0 && self.0.gen_range(1..=n) == 1
    }
}
