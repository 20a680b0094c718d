//! # Constraint-Aware Generator
//!
//! Builds random combinations that contain every forced (include) number,
//! none of the excluded numbers, and are otherwise drawn uniformly without
//! replacement from what is left.
//!
//! ```text
//! pool      = {1..45} \ exclude
//! forced    = include
//! slots     = size - |forced|          (< 0 → OverconstrainedSelection)
//! fill      = draw(slots, pool \ forced)
//! result    = sort(forced ∪ fill)
//! ```
//!
//! All functions are pure apart from the injected `Rng`, so tests seed a
//! `StdRng` and get reproducible output.

use log::{debug, warn};
use rand::Rng;
use std::collections::BTreeSet;

use crate::core::error::Rejection;
use crate::core::number::LottoNumber;
use crate::core::selection::SelectionStore;

/// A generated combination plus the size it was aiming for.
///
/// When the legal pool is smaller than the target the result comes back
/// short. Callers check [`Generated::is_complete`] and warn the user instead
/// of accepting it silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub numbers: Vec<LottoNumber>,
    pub target: usize,
}

impl Generated {
    pub fn is_complete(&self) -> bool {
        self.numbers.len() == self.target
    }

    /// How many numbers are missing from a short result.
    pub fn shortfall(&self) -> usize {
        self.target.saturating_sub(self.numbers.len())
    }

    pub fn to_raw(&self) -> Vec<u8> {
        self.numbers.iter().map(|n| n.get()).collect()
    }
}

/// Swap-and-pop sampling: each draw picks a uniform index among the
/// remaining candidates and removes it. Stops early if candidates run out.
pub fn draw_without_replacement<R: Rng>(
    candidates: &mut Vec<LottoNumber>,
    count: usize,
    rng: &mut R,
) -> Vec<LottoNumber> {
    let mut drawn = Vec::with_capacity(count.min(candidates.len()));
    while drawn.len() < count && !candidates.is_empty() {
        let index = rng.random_range(0..candidates.len());
        drawn.push(candidates.swap_remove(index));
    }
    drawn
}

/// Generates one combination of `size` numbers honouring include/exclude.
pub fn generate_combination<R: Rng>(
    include: &BTreeSet<LottoNumber>,
    exclude: &BTreeSet<LottoNumber>,
    size: usize,
    rng: &mut R,
) -> Result<Generated, Rejection> {
    let forced = include.len();
    let Some(slots) = size.checked_sub(forced) else {
        return Err(Rejection::OverconstrainedSelection { forced, size });
    };

    let mut candidates: Vec<LottoNumber> = LottoNumber::all()
        .filter(|n| !exclude.contains(n) && !include.contains(n))
        .collect();

    let mut numbers: Vec<LottoNumber> = include.iter().copied().collect();
    numbers.extend(draw_without_replacement(&mut candidates, slots, rng));
    numbers.sort_unstable();

    let generated = Generated { numbers, target: size };
    if generated.is_complete() {
        debug!("Generated combination {:?}", generated.to_raw());
    } else {
        warn!(
            "Constraints too tight: generated {} of {} numbers",
            generated.numbers.len(),
            size
        );
    }
    Ok(generated)
}

/// Generates `count` independent combinations. Each starts from a fresh
/// pool, so combinations may share numbers.
pub fn generate_all<R: Rng>(
    include: &BTreeSet<LottoNumber>,
    exclude: &BTreeSet<LottoNumber>,
    size: usize,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Generated>, Rejection> {
    (0..count)
        .map(|_| generate_combination(include, exclude, size, rng))
        .collect()
}

/// Generates from the store's current include/exclude sets.
pub fn generate_for_store<R: Rng>(store: &SelectionStore, rng: &mut R) -> Result<Generated, Rejection> {
    generate_combination(
        store.include_set(),
        store.exclude_set(),
        store.max_numbers_per_combination(),
        rng,
    )
}

/// Plain random pick from all 45 numbers, ignoring include/exclude. This
/// is what the per-combination dice button does for manual entries.
pub fn generate_unconstrained<R: Rng>(size: usize, rng: &mut R) -> Generated {
    let mut candidates: Vec<LottoNumber> = LottoNumber::all().collect();
    let mut numbers = draw_without_replacement(&mut candidates, size, rng);
    numbers.sort_unstable();
    Generated { numbers, target: size }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn set(values: &[i64]) -> BTreeSet<LottoNumber> {
        values.iter().map(|&v| LottoNumber::new(v).unwrap()).collect()
    }

    #[test]
    fn test_single_forced_number_is_included() {
        let mut rng = StdRng::seed_from_u64(7);
        let include = set(&[7]);
        for _ in 0..200 {
            let g = generate_combination(&include, &BTreeSet::new(), 6, &mut rng).unwrap();
            assert!(g.is_complete());
            assert!(g.numbers.contains(&LottoNumber::new(7).unwrap()));
        }
    }

    #[test]
    fn test_full_include_needs_no_fill() {
        let mut rng = StdRng::seed_from_u64(1);
        let include = set(&[1, 2, 3, 4, 5, 6]);
        let g = generate_combination(&include, &BTreeSet::new(), 6, &mut rng).unwrap();
        assert_eq!(g.to_raw(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_too_many_forced_numbers() {
        let mut rng = StdRng::seed_from_u64(1);
        let include = set(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(
            generate_combination(&include, &BTreeSet::new(), 6, &mut rng),
            Err(Rejection::OverconstrainedSelection { forced: 7, size: 6 })
        );
    }

    #[test]
    fn test_excluded_numbers_never_appear() {
        let mut rng = StdRng::seed_from_u64(99);
        let exclude: BTreeSet<LottoNumber> = (1..=30).map(|v| LottoNumber::new(v).unwrap()).collect();
        for _ in 0..200 {
            let g = generate_combination(&BTreeSet::new(), &exclude, 6, &mut rng).unwrap();
            assert!(g.is_complete());
            assert!(g.numbers.iter().all(|n| n.get() > 30));
        }
    }

    #[test]
    fn test_result_is_sorted_and_unique() {
        let mut rng = StdRng::seed_from_u64(3);
        let include = set(&[44, 2]);
        for _ in 0..100 {
            let g = generate_combination(&include, &set(&[10]), 6, &mut rng).unwrap();
            let mut sorted = g.numbers.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted, g.numbers);
        }
    }

    #[test]
    fn test_exhausted_pool_returns_short_result() {
        let mut rng = StdRng::seed_from_u64(5);
        let exclude: BTreeSet<LottoNumber> = (1..=42).map(|v| LottoNumber::new(v).unwrap()).collect();
        let g = generate_combination(&set(&[43]), &exclude, 6, &mut rng).unwrap();
        assert_eq!(g.to_raw(), vec![43, 44, 45]);
        assert!(!g.is_complete());
        assert_eq!(g.shortfall(), 3);
    }

    #[test]
    fn test_same_seed_same_output() {
        let a = generate_combination(&set(&[5]), &set(&[6]), 6, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate_combination(&set(&[5]), &set(&[6]), 6, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_all_uses_fresh_pool_each_time() {
        let mut rng = StdRng::seed_from_u64(11);
        // Only 6 legal numbers: every combination must be all of them.
        let exclude: BTreeSet<LottoNumber> = (7..=45).map(|v| LottoNumber::new(v).unwrap()).collect();
        let all = generate_all(&BTreeSet::new(), &exclude, 6, 4, &mut rng).unwrap();
        assert_eq!(all.len(), 4);
        for g in all {
            assert_eq!(g.to_raw(), vec![1, 2, 3, 4, 5, 6]);
        }
    }

    #[test]
    fn test_draw_covers_every_candidate_position() {
        // Each candidate should come up first at least once over many seeds.
        let mut seen = BTreeSet::new();
        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut candidates: Vec<LottoNumber> = (1..=5).map(|v| LottoNumber::new(v).unwrap()).collect();
            let drawn = draw_without_replacement(&mut candidates, 1, &mut rng);
            seen.insert(drawn[0].get());
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_unconstrained_ignores_sets() {
        let mut rng = StdRng::seed_from_u64(8);
        let g = generate_unconstrained(6, &mut rng);
        assert!(g.is_complete());
        assert_eq!(g.numbers.windows(2).filter(|w| w[0] >= w[1]).count(), 0);
    }
}
