use std::fmt;

use parking_lot::Mutex;
use rand::{RngExt as _, SeedableRng as _, rngs::StdRng};

/// Source of uniform random draws used for fault injection decisions.
///
/// Implementations are shared by all in-flight requests,
/// so each draw has to be safe to make concurrently.
pub trait RandomSource: fmt::Debug + Send + Sync + 'static {
    /// Uniform draw in `[0, 1)`.
    fn next_unit(&self) -> f64;

    /// Uniform draw in `[low, high)`, `low` for an empty range.
    fn next_in_range(&self, low: u64, high: u64) -> u64;
}

/// [`RandomSource`] backed by a seedable [`StdRng`].
///
/// The same seed yields the same sequence of draws.
#[derive(Debug)]
pub struct StdRandomSource {
    rng: Mutex<StdRng>,
}

impl StdRandomSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }
}

impl Default for StdRandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandomSource {
    fn next_unit(&self) -> f64 {
        self.rng.lock().random::<f64>()
    }

    fn next_in_range(&self, low: u64, high: u64) -> u64 {
        if low >= high {
            return low;
        }
        self.rng.lock().random_range(low..high)
    }
}

#[cfg(test)]
pub use self::fixed::FixedRandomSource;
