//! Deterministic random number generation.
//!
//! Used by game setup (random start stations) and by the random agent.
//! Same seed, same sequence; `fork` hands out independent but reproducible
//! streams, one per seated random agent.
//!
//! ```
//! use yard_engine::core::GameRng;
//!
//! let stations = [1, 2, 3, 4, 5, 6];
//! let mut rng = GameRng::new(42);
//! let mut agent_rng = rng.fork();
//!
//! let mut rng2 = GameRng::new(42);
//! let mut agent_rng2 = rng2.fork();
//! assert_eq!(agent_rng.choose(&stations), agent_rng2.choose(&stations));
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seedable, forkable RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork this RNG to create an independent stream.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Pick `amount` elements from distinct positions of the slice.
    ///
    /// Returns `None` if the slice holds fewer than `amount` elements.
    pub fn sample_distinct<T: Clone>(&mut self, slice: &[T], amount: usize) -> Option<Vec<T>> {
        if slice.len() < amount {
            return None;
        }
        Some(slice.choose_multiple(&mut self.inner, amount).cloned().collect())
    }
}
