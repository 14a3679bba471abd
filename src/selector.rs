//! Weighted prize selection.
//!
//! Pure function of (pool, pity, buffs, rng); no side effects. Priority order
//! is strict: pity override first, then the guaranteed-rare buff, then the
//! standard weighted scan.

use crate::engine::DrawError;
use crate::prizes::{Prize, PrizePool, Rarity};
use crate::session::{BuffState, PityState};
use rand::Rng;

/// Outcome of one selector call.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub prize: Prize,
    pub index: usize,
    pub pity_fired: bool,
}

/// Picks one prize from the pool.
///
/// 1. Pity due and a legendary exists: uniform pick among legendaries.
/// 2. Guaranteed-rare buff set and a non-common exists: uniform pick among them.
/// 3. Weighted scan over the full pool, first-fit in slot order.
pub fn select(
    pool: &PrizePool,
    pity: PityState,
    buffs: &BuffState,
    rng: &mut impl Rng,
) -> Result<Selection, DrawError> {
    if pool.is_empty() {
        return Err(DrawError::EmptyPool);
    }

    // 1. Pity override. If no legendary is configured, pity is skipped for
    // this draw rather than erroring.
    if pity.due() {
        let legendaries = pool.indices_where(Prize::is_legendary);
        if !legendaries.is_empty() {
            let index = legendaries[rng.gen_range(0..legendaries.len())];
            return Ok(selection_at(pool, index, true));
        }
    }

    // 2. Guaranteed-rare buff, only consulted when pity did not fire.
    if buffs.guaranteed_rare {
        let better = pool.indices_where(|p| p.rarity != Rarity::Common);
        if !better.is_empty() {
            let index = better[rng.gen_range(0..better.len())];
            return Ok(selection_at(pool, index, false));
        }
    }

    // 3. Standard weighted scan. Ties at floating-point boundaries resolve to
    // the first slot in iteration order.
    let total: f64 = pool.slots().iter().map(Prize::effective_weight).sum();
    if total <= 0.0 {
        // Pathological config (all weights negative): defined fallback, not
        // an error.
        return Ok(selection_at(pool, 0, false));
    }

    let mut roll = rng.gen::<f64>() * total;
    for (index, prize) in pool.slots().iter().enumerate() {
        let weight = prize.effective_weight();
        if roll < weight {
            return Ok(selection_at(pool, index, false));
        }
        roll -= weight;
    }

    Ok(selection_at(pool, 0, false))
}

fn selection_at(pool: &PrizePool, index: usize, pity_fired: bool) -> Selection {
    Selection {
        prize: pool.slots()[index].clone(),
        index,
        pity_fired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prizes::default_catalog;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    fn pool() -> PrizePool {
        PrizePool::from_catalog(&default_catalog())
    }

    fn no_buffs() -> BuffState {
        BuffState::default()
    }

    fn pity(counter: u32, threshold: u32) -> PityState {
        PityState { counter, threshold }
    }

    #[test]
    fn test_empty_pool_refused() {
        let empty = PrizePool::from_catalog(&[]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = select(&empty, pity(0, 50), &no_buffs(), &mut rng);
        assert_eq!(result.unwrap_err(), DrawError::EmptyPool);
    }

    #[test]
    fn test_weighted_distribution_converges() {
        let pool = pool();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let total: f64 = pool.slots().iter().map(Prize::effective_weight).sum();

        let n = 100_000;
        let mut counts: HashMap<usize, u32> = HashMap::new();
        for _ in 0..n {
            let sel = select(&pool, pity(0, 0), &no_buffs(), &mut rng).unwrap();
            *counts.entry(sel.index).or_insert(0) += 1;
        }

        // Each slot's hit rate should be within one percentage point of its
        // declared probability at this sample size.
        for (index, prize) in pool.slots().iter().enumerate() {
            let expected = prize.effective_weight() / total;
            let observed = counts.get(&index).copied().unwrap_or(0) as f64 / n as f64;
            assert!(
                (observed - expected).abs() < 0.01,
                "slot {} observed {:.4}, expected {:.4}",
                index,
                observed,
                expected
            );
        }
    }

    #[test]
    fn test_pity_forces_legendary() {
        let pool = pool();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..500 {
            let sel = select(&pool, pity(49, 50), &no_buffs(), &mut rng).unwrap();
            assert!(sel.pity_fired);
            assert_eq!(sel.prize.rarity, Rarity::Legendary);
        }
    }

    #[test]
    fn test_pity_uniform_over_legendaries() {
        // Weights must not influence the pity pick: slots 0, 4 and 8 carry
        // weights 2, 5 and 1 but should land roughly equally often.
        let pool = pool();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut counts: HashMap<usize, u32> = HashMap::new();

        let n = 30_000;
        for _ in 0..n {
            let sel = select(&pool, pity(49, 50), &no_buffs(), &mut rng).unwrap();
            *counts.entry(sel.index).or_insert(0) += 1;
        }

        for index in [0usize, 4, 8] {
            let observed = counts.get(&index).copied().unwrap_or(0) as f64 / n as f64;
            assert!(
                (observed - 1.0 / 3.0).abs() < 0.02,
                "slot {} observed {:.4}",
                index,
                observed
            );
        }
    }

    #[test]
    fn test_pity_skipped_without_legendary() {
        let catalog: Vec<_> = default_catalog()
            .into_iter()
            .filter(|p| !p.is_legendary())
            .collect();
        let pool = PrizePool::from_catalog(&catalog);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..200 {
            let sel = select(&pool, pity(99, 50), &no_buffs(), &mut rng).unwrap();
            assert!(!sel.pity_fired);
        }
    }

    #[test]
    fn test_threshold_zero_never_engages() {
        let pool = pool();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        for counter in [0u32, 50, 1_000_000] {
            let sel = select(&pool, pity(counter, 0), &no_buffs(), &mut rng).unwrap();
            assert!(!sel.pity_fired);
        }
    }

    #[test]
    fn test_guaranteed_rare_excludes_common() {
        let pool = pool();
        let buffs = BuffState {
            guaranteed_rare: true,
            pity_booster: false,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        for _ in 0..500 {
            let sel = select(&pool, pity(0, 50), &buffs, &mut rng).unwrap();
            assert!(!sel.pity_fired);
            assert!(sel.prize.rarity >= Rarity::Rare);
        }
    }

    #[test]
    fn test_pity_outranks_buff() {
        let pool = pool();
        let buffs = BuffState {
            guaranteed_rare: true,
            pity_booster: false,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(13);

        for _ in 0..200 {
            let sel = select(&pool, pity(49, 50), &buffs, &mut rng).unwrap();
            assert!(sel.pity_fired);
            assert_eq!(sel.prize.rarity, Rarity::Legendary);
        }
    }

    #[test]
    fn test_buff_with_all_common_pool_falls_through() {
        let catalog: Vec<_> = default_catalog()
            .into_iter()
            .filter(|p| p.rarity == Rarity::Common)
            .collect();
        let pool = PrizePool::from_catalog(&catalog);
        let buffs = BuffState {
            guaranteed_rare: true,
            pity_booster: false,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(17);

        let sel = select(&pool, pity(0, 0), &buffs, &mut rng).unwrap();
        assert_eq!(sel.prize.rarity, Rarity::Common);
    }

    #[test]
    fn test_negative_total_weight_falls_back_to_slot_zero() {
        let mut catalog = default_catalog();
        for prize in &mut catalog {
            prize.weight = -1.0;
        }
        let pool = PrizePool::from_catalog(&catalog);
        let mut rng = ChaCha8Rng::seed_from_u64(19);

        let sel = select(&pool, pity(0, 0), &no_buffs(), &mut rng).unwrap();
        assert_eq!(sel.index, 0);
        assert!(!sel.pity_fired);
    }

    #[test]
    fn test_single_entry_pool_always_selected() {
        let pool = PrizePool::from_catalog(&default_catalog()[..1]);
        let mut rng = ChaCha8Rng::seed_from_u64(23);

        let sel = select(&pool, pity(0, 50), &no_buffs(), &mut rng).unwrap();
        assert_eq!(sel.index, 0);
        assert_eq!(sel.prize.id, "p1");
    }
}
