// General distribution functions and utilities.
// These are the sampling primitives shared by parameter spaces and
// strategies. All of them draw from a caller supplied ChaCha8Rng so that
// a seeded source always reproduces the same draws.

use rand::{Rng, RngCore};
use rand_chacha::ChaCha8Rng;

/// Flip a coin that comes up true with probability `p`.
///
/// `p <= 0` (and NaN) never yields true, `p >= 1` never yields false.
pub fn biased_coin(random: &mut ChaCha8Rng, p: f64) -> bool {
    let truthy = (p * (u64::MAX as f64 + 1.0)).floor() as u64;
    let probe = random.next_u64();
    match truthy {
        0 => false,
        u64::MAX => true,
        _ => probe > u64::MAX - truthy,
    }
}

/// Uniform float in `[lower, upper)`.
pub fn uniform_float(random: &mut ChaCha8Rng, lower: f64, upper: f64) -> f64 {
    lower + (upper - lower) * random.gen::<f64>()
}

/// Uniform index in `[0, size)`. `size` must be positive.
pub fn uniform_index(random: &mut ChaCha8Rng, size: usize) -> usize {
    assert!(size > 0, "cannot choose an index from an empty range");
    random.gen_range(0..size)
}

/// Choose a non-empty subset of `0..size`.
///
/// Each index is kept independently with `activation_chance`. If nothing was
/// kept a single uniformly chosen index is used instead.
pub fn non_empty_subset(
    random: &mut ChaCha8Rng,
    size: usize,
    activation_chance: f64,
) -> Vec<usize> {
    let mut chosen: Vec<usize> = (0..size)
        .filter(|_| biased_coin(random, activation_chance))
        .collect();
    if chosen.is_empty() {
        chosen.push(uniform_index(random, size));
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn extreme_biases_are_deterministic() {
        let mut random = ChaCha8Rng::seed_from_u64(0);
        for _ in 0..1000 {
            assert!(!biased_coin(&mut random, 0.0));
            assert!(biased_coin(&mut random, 1.0));
        }
    }

    #[test]
    fn out_of_range_biases_clamp() {
        let mut random = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(!biased_coin(&mut random, -0.5));
            assert!(!biased_coin(&mut random, f64::NAN));
            assert!(biased_coin(&mut random, 1.5));
        }
    }

    #[test]
    fn fair_coin_produces_both_sides() {
        let mut random = ChaCha8Rng::seed_from_u64(2);
        let heads = (0..1000).filter(|_| biased_coin(&mut random, 0.5)).count();
        assert!(heads > 100 && heads < 900, "heads = {}", heads);
    }

    #[test]
    fn uniform_float_stays_in_range() {
        let mut random = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1000 {
            let x = uniform_float(&mut random, 0.0, 1.0);
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn subsets_are_never_empty() {
        let mut random = ChaCha8Rng::seed_from_u64(4);
        for size in 1..20 {
            for _ in 0..50 {
                let subset = non_empty_subset(&mut random, size, 0.01);
                assert!(!subset.is_empty());
                assert!(subset.iter().all(|&i| i < size));
                assert!(subset.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
