use std::collections::BTreeSet;

use lotto::core::generator::{generate_combination, generate_unconstrained};
use lotto::core::number::{LottoNumber, NUMBERS_PER_COMBINATION};
use lotto::core::selection::{MAX_INCLUDE, Mode, Preferences, SelectionStore, Toggle};
use lotto::core::{Action, update};
use lotto::core::settings::CombinationSettings;
use lotto::core::state::App;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ============================================================================
// Helpers
// ============================================================================

const SEEDS: u64 = 64;
const STEPS: usize = 400;

fn random_mode(rng: &mut StdRng) -> Mode {
    match rng.random_range(0..3) {
        0 => Mode::Include,
        1 => Mode::Exclude,
        _ => Mode::Combination,
    }
}

/// Mostly in-range numbers with the odd out-of-range value mixed in.
fn random_number(rng: &mut StdRng) -> i64 {
    if rng.random_range(0..10) == 0 {
        rng.random_range(-5..60)
    } else {
        rng.random_range(1..=45)
    }
}

fn assert_store_invariants(store: &SelectionStore) {
    let include = store.include_set();
    let exclude = store.exclude_set();
    assert!(include.is_disjoint(exclude), "include and exclude overlap");
    assert!(include.len() <= MAX_INCLUDE);
    for combination in store.combinations() {
        assert!(combination.len() <= store.max_numbers_per_combination());
        let raw = combination.to_raw();
        assert!(raw.windows(2).all(|w| w[0] < w[1]), "not ascending: {raw:?}");
    }
    assert!(
        store.combinations().len() <= store.max_combinations(),
        "{} combinations over cap {}",
        store.combinations().len(),
        store.max_combinations()
    );
    if store.max_combinations() == 0 {
        assert!(store.combinations().is_empty());
        assert_eq!(store.current_index(), 0);
    }
    if !store.combinations().is_empty() {
        assert!(store.current_index() < store.combinations().len());
    }
}

// ============================================================================
// Store invariants under random tap sequences
// ============================================================================

#[test]
fn random_taps_keep_store_invariants() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut store = SelectionStore::default();

        for _ in 0..STEPS {
            match rng.random_range(0..11) {
                0..=5 => {
                    let mode = random_mode(&mut rng);
                    let _ = store.toggle_number(random_number(&mut rng), mode);
                }
                6 => {
                    let _ = store.add_combination();
                }
                7 => {
                    let index = rng.random_range(0..6);
                    let _ = store.remove_combination(index);
                }
                8 => {
                    let index = rng.random_range(0..6);
                    let _ = store.select_combination(index);
                }
                9 => {
                    store.set_max_combinations(rng.random_range(-2..6));
                }
                _ => {
                    let mode = random_mode(&mut rng);
                    let index = Some(rng.random_range(0..6));
                    let _ = store.remove_from_set(random_number(&mut rng), mode, index);
                }
            }
            assert_store_invariants(&store);
        }
    }
}

#[test]
fn toggle_twice_restores_state() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut store = SelectionStore::default();
        for _ in 0..20 {
            let mode = if rng.random_bool(0.5) { Mode::Include } else { Mode::Exclude };
            let _ = store.toggle_number(rng.random_range(1..=45), mode);
        }

        let n = rng.random_range(1..=45);
        let mode = if rng.random_bool(0.5) { Mode::Include } else { Mode::Exclude };
        let before = (store.include(), store.exclude());
        if let Ok(first) = store.toggle_number(n, mode) {
            let second = store.toggle_number(n, mode).unwrap();
            assert_ne!(first, second);
            assert_eq!((store.include(), store.exclude()), before);
        } else {
            assert_eq!((store.include(), store.exclude()), before);
        }
    }
}

#[test]
fn removing_absent_number_is_noop() {
    let mut store = SelectionStore::default();
    store.toggle_number(7, Mode::Include).unwrap();
    store.toggle_number(8, Mode::Exclude).unwrap();

    for _ in 0..2 {
        store.remove_from_set(30, Mode::Include, None).unwrap();
        store.remove_from_set(30, Mode::Exclude, None).unwrap();
    }
    assert_eq!(store.include_set().len(), 1);
    assert_eq!(store.exclude_set().len(), 1);

    store.remove_from_set(7, Mode::Include, None).unwrap();
    store.remove_from_set(7, Mode::Include, None).unwrap();
    assert!(store.include_set().is_empty());
}

// ============================================================================
// Generator properties
// ============================================================================

#[test]
fn generated_combinations_honour_constraints() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut include = BTreeSet::new();
        let mut exclude = BTreeSet::new();
        for _ in 0..rng.random_range(0..=MAX_INCLUDE) {
            include.insert(LottoNumber::new(rng.random_range(1..=45)).unwrap());
        }
        for _ in 0..rng.random_range(0..30) {
            let n = LottoNumber::new(rng.random_range(1..=45)).unwrap();
            if !include.contains(&n) {
                exclude.insert(n);
            }
        }

        let generated =
            generate_combination(&include, &exclude, NUMBERS_PER_COMBINATION, &mut rng).unwrap();
        let numbers: BTreeSet<_> = generated.numbers.iter().copied().collect();

        assert_eq!(numbers.len(), generated.numbers.len(), "duplicate drawn");
        assert!(include.is_subset(&numbers));
        assert!(numbers.is_disjoint(&exclude));
        assert!(generated.numbers.windows(2).all(|w| w[0] < w[1]));

        let pool = 45 - exclude.len();
        assert_eq!(generated.numbers.len(), NUMBERS_PER_COMBINATION.min(pool));
    }
}

#[test]
fn exhausted_pool_yields_short_combination() {
    let mut rng = StdRng::seed_from_u64(9);
    let include: BTreeSet<_> = [1, 2].into_iter().map(|n| LottoNumber::new(n).unwrap()).collect();
    let exclude: BTreeSet<_> = (4..=45).map(|n| LottoNumber::new(n).unwrap()).collect();

    let generated = generate_combination(&include, &exclude, 6, &mut rng).unwrap();
    assert_eq!(generated.to_raw(), vec![1, 2, 3]);
    assert!(!generated.is_complete());
    assert_eq!(generated.shortfall(), 3);
}

#[test]
fn unconstrained_draws_are_distinct() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let generated = generate_unconstrained(NUMBERS_PER_COMBINATION, &mut rng);
        let unique: BTreeSet<_> = generated.numbers.iter().collect();
        assert_eq!(unique.len(), NUMBERS_PER_COMBINATION);
    }
}

// ============================================================================
// Reducer scenarios
// ============================================================================

fn seeded_app(total: i64, manual: i64) -> App {
    App::new(CombinationSettings::new(total, manual), StdRng::seed_from_u64(2024))
}

#[test]
fn manual_count_changes_keep_list_within_cap() {
    for seed in 0..SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut app = seeded_app(20, rng.random_range(0..=20));
        for _ in 0..60 {
            match rng.random_range(0..4) {
                0 => update(&mut app, Action::SetManualCount(rng.random_range(-2..22))),
                1 => update(&mut app, Action::SetAutoCount(rng.random_range(-2..22))),
                2 => update(&mut app, Action::FillAllCombinations),
                _ => update(&mut app, Action::AddCombination),
            };
            assert_store_invariants(&app.store);
            assert_eq!(app.store.max_combinations(), app.settings.manual_count);
        }
    }
}

#[test]
fn manual_count_drop_to_zero_resets_combinations() {
    let mut app = seeded_app(5, 3);
    update(&mut app, Action::FillAllCombinations);
    assert_eq!(app.store.combinations().len(), 3);

    update(&mut app, Action::SetManualCount(0));
    assert!(app.store.combinations().is_empty());
    assert_eq!(app.store.current_index(), 0);
    assert_eq!(app.settings.auto_count, 5);
}

#[test]
fn include_then_exclude_is_rejected_inline() {
    let mut app = seeded_app(5, 0);
    update(&mut app, Action::ToggleNumber { number: 7, mode: Mode::Include });
    update(&mut app, Action::ToggleNumber { number: 7, mode: Mode::Exclude });

    assert!(app.error.is_some());
    assert_eq!(app.store.include().len(), 1);
    assert!(app.store.exclude().is_empty());
}

#[test]
fn sixth_include_is_rejected() {
    let mut store = SelectionStore::default();
    for n in 1..=5 {
        assert_eq!(store.toggle_number(n, Mode::Include), Ok(Toggle::Added));
    }
    assert!(store.toggle_number(6, Mode::Include).is_err());
    assert_eq!(store.include_set().len(), 5);
}

#[test]
fn preferences_round_trip_through_store() {
    let mut store = SelectionStore::default();
    let prefs = Preferences {
        include_numbers: vec![40, 3],
        exclude_numbers: vec![11],
    };
    store.load_preferences(&prefs).unwrap();

    let snapshot = store.preferences();
    assert_eq!(snapshot.include_numbers, vec![3, 40]);
    assert_eq!(snapshot.exclude_numbers, vec![11]);
}

#[test]
fn submit_requires_complete_manual_combinations() {
    let mut app = seeded_app(5, 2);
    update(&mut app, Action::Submit);
    assert_eq!(app.error.as_deref(), Some("수동 조합을 추가해주세요."));

    update(&mut app, Action::FillAllCombinations);
    update(&mut app, Action::SelectCombination(1));
    let first = app.store.combinations()[1].to_raw()[0] as i64;
    update(&mut app, Action::ToggleNumber { number: first, mode: Mode::Combination });
    update(&mut app, Action::Submit);
    assert_eq!(
        app.error.as_deref(),
        Some("조합 2에 정확히 6개의 번호를 선택해주세요.")
    );
}

#[test]
fn same_seed_same_fill() {
    let mut a = seeded_app(5, 4);
    let mut b = seeded_app(5, 4);
    update(&mut a, Action::FillAllCombinations);
    update(&mut b, Action::FillAllCombinations);
    assert_eq!(a.store.combinations(), b.store.combinations());
}
