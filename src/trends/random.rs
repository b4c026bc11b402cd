// src/trends/random.rs
//! Injectable randomness for seed selection and synthetic scores.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

pub trait RandomSource: Send + Sync {
    /// Uniform value in `low..high`. Returns `low` when the range is empty.
    fn range(&self, low: u32, high: u32) -> u32;

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    fn index(&self, len: usize) -> usize {
        self.range(0, len as u32) as usize
    }
}

/// Thread-local RNG, used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn range(&self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        rand::rng().random_range(low..high)
    }
}

/// Deterministic RNG for reproducible runs.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn range(&self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        rng.random_range(low..high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_random_is_reproducible() {
        let a = SeededRandom::new(7);
        let b = SeededRandom::new(7);
        let draws_a: Vec<u32> = (0..10).map(|_| a.range(0, 100)).collect();
        let draws_b: Vec<u32> = (0..10).map(|_| b.range(0, 100)).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_range_stays_in_bounds() {
        let random = ThreadRandom;
        for _ in 0..200 {
            let value = random.range(75, 95);
            assert!((75..95).contains(&value));
        }
        assert_eq!(random.range(5, 5), 5);
        assert!(random.index(3) < 3);
    }
}
