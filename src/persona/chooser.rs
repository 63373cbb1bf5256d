//! Injectable random choice for persona action draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks one index out of `len` candidates. `len` is never zero.
pub trait ActionChooser {
    fn choose(&mut self, len: usize) -> usize;
}

/// Uniform draw backed by a seedable generator.
pub struct RandomChooser {
    rng: StdRng,
}

impl RandomChooser {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence of draws for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomChooser {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionChooser for RandomChooser {
    fn choose(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Closures pin the draw in tests: `|_| 0` always takes the first candidate.
impl<F> ActionChooser for F
where
    F: FnMut(usize) -> usize,
{
    fn choose(&mut self, len: usize) -> usize {
        self(len) % len
    }
}
