use crate::types::{Rank, RoundConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generate one rank's private batch of work items.
///
/// Batch length is drawn from `[0, max_batch)` and each item from
/// `[0, max_degrees]`. With a seed set, every rank draws from its own
/// deterministic stream so whole runs replay exactly; without one,
/// streams come from system entropy.
pub fn generate_batch(config: &RoundConfig, rank: Rank) -> Vec<i32> {
    if config.max_batch == 0 {
        return Vec::new();
    }
    let top = config.max_degrees.max(0);
    let mut rng = rank_rng(config.seed, rank);
    let len = rng.gen_range(0..config.max_batch);
    (0..len).map(|_| rng.gen_range(0..=top)).collect()
}

fn rank_rng(seed: Option<u64>, rank: Rank) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(rank as u64)),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_batches_replay() {
        let config = RoundConfig {
            pool: 4,
            max_batch: 10,
            max_degrees: 180,
            seed: Some(99),
        };
        assert_eq!(generate_batch(&config, 2), generate_batch(&config, 2));
    }

    #[test]
    fn test_batches_respect_bounds() {
        let config = RoundConfig {
            pool: 1,
            max_batch: 8,
            max_degrees: 45,
            seed: Some(5),
        };
        for rank in 0..32 {
            let batch = generate_batch(&config, rank);
            assert!(batch.len() < 8);
            assert!(batch.iter().all(|item| (0..=45).contains(item)));
        }
    }

    #[test]
    fn test_zero_max_batch_yields_empty() {
        let config = RoundConfig {
            pool: 1,
            max_batch: 0,
            max_degrees: 180,
            seed: Some(1),
        };
        assert!(generate_batch(&config, 0).is_empty());
    }
}
