//! Deterministic random number generation.
//!
//! RULE: Nothing in the generator may call any platform RNG.
//! Every draw flows through a single PortfolioRng seeded from the
//! caller's seed, so the same (n_clients, seed, region) always yields
//! the same portfolio within this implementation.

use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rand_pcg::Pcg64Mcg;

use crate::types::Seed;

pub struct PortfolioRng {
    inner: Pcg64Mcg,
}

impl PortfolioRng {
    pub fn new(seed: Seed) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::Rng;
        assert!(n > 0, "n must be > 0");
        self.inner.gen_range(0..n)
    }

    /// Uniform float in [low, high).
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// Gaussian draw. A non-finite or negative std_dev collapses to the mean.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        match Normal::new(mean, std_dev) {
            Ok(dist) => dist.sample(&mut self.inner),
            Err(_) => mean,
        }
    }

    /// Uniform index into a collection of `len` items.
    pub fn choose_index(&mut self, len: usize) -> usize {
        self.next_u64_below(len as u64) as usize
    }

    /// Integer uniformly drawn from [low, high], both ends inclusive.
    pub fn int_inclusive(&mut self, low: u32, high: u32) -> u32 {
        assert!(high >= low, "empty integer range");
        low + self.next_u64_below(u64::from(high - low) + 1) as u32
    }

    /// Index drawn with the given weights (cumulative roll).
    /// Falls through to the last index when rounding leaves a gap.
    pub fn weighted_index(&mut self, weights: &[f64]) -> usize {
        assert!(!weights.is_empty(), "weights must not be empty");
        let roll = self.next_f64();
        let mut cumulative = 0.0;
        for (i, w) in weights.iter().enumerate() {
            cumulative += w;
            if roll < cumulative {
                return i;
            }
        }
        weights.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = PortfolioRng::new(42);
        let mut b = PortfolioRng::new(42);
        for _ in 0..64 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn uniform_stays_in_range() {
        let mut rng = PortfolioRng::new(7);
        for _ in 0..1_000 {
            let x = rng.uniform(0.04, 0.32);
            assert!((0.04..0.32).contains(&x), "out of range: {x}");
        }
    }

    #[test]
    fn int_inclusive_hits_both_ends() {
        let mut rng = PortfolioRng::new(11);
        let draws: Vec<u32> = (0..2_000).map(|_| rng.int_inclusive(1, 14)).collect();
        assert!(draws.iter().all(|d| (1..=14).contains(d)));
        assert!(draws.contains(&1));
        assert!(draws.contains(&14));
    }

    #[test]
    fn weighted_index_follows_weights() {
        let mut rng = PortfolioRng::new(3);
        let mut counts = [0usize; 3];
        for _ in 0..10_000 {
            counts[rng.weighted_index(&[0.5, 0.2, 0.3])] += 1;
        }
        // Loose bounds: 10k draws, expected 5000/2000/3000.
        assert!((4_700..5_300).contains(&counts[0]), "{counts:?}");
        assert!((1_800..2_200).contains(&counts[1]), "{counts:?}");
        assert!((2_700..3_300).contains(&counts[2]), "{counts:?}");
    }

    #[test]
    fn degenerate_normal_returns_mean() {
        let mut rng = PortfolioRng::new(1);
        assert_eq!(rng.normal(0.9, -1.0), 0.9);
    }
}
