//! Random sources
//!
//! Selection accepts any [`rand::Rng`]. These helpers build the ChaCha8
//! generator used by default.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic generator for reproducible selections
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Generator seeded from the operating system
pub fn entropy_rng() -> ChaCha8Rng {
    ChaCha8Rng::from_entropy()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_seed_reproducibility() {
        let mut rng1 = seeded_rng(42);
        let mut rng2 = seeded_rng(42);

        for _ in 0..10 {
            assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
        }
    }
}
