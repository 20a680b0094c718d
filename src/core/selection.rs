//! # Selection Store
//!
//! Single source of truth for the include set, the exclude set and the
//! list of manual combinations. Every mutation funnels through this type,
//! so the cross-set invariants are checked in exactly one place.
//!
//! ```text
//! SelectionStore
//! ├── include: BTreeSet<LottoNumber>      // forced numbers, at most 5
//! ├── exclude: BTreeSet<LottoNumber>      // banned numbers, unbounded
//! ├── combinations: Vec<Combination>      // manual entries, at most max_combinations
//! ├── mode: Mode                          // which collection a tap edits
//! ├── current_index: usize                // combination edited in combination mode
//! ├── max_combinations: usize             // driven by the manual count setting
//! └── max_numbers_per_combination: usize  // 6 for a standard draw
//! ```
//!
//! Invariants after every call:
//! - include ∩ exclude = ∅
//! - |include| ≤ 5
//! - every combination has at most `max_numbers_per_combination` numbers
//! - |combinations| ≤ `max_combinations`
//! - `max_combinations == 0` implies an empty list and `current_index == 0`
//!
//! A rejected call leaves the store untouched.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::core::error::{Limit, Rejection};
use crate::core::number::{LottoNumber, NUMBERS_PER_COMBINATION};

/// Maximum size of the include set.
pub const MAX_INCLUDE: usize = 5;
/// Default cap on the number of manual combinations.
pub const DEFAULT_MAX_COMBINATIONS: usize = 5;

/// Which collection receives number taps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Include,
    Exclude,
    Combination,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Include => write!(f, "include"),
            Mode::Exclude => write!(f, "exclude"),
            Mode::Combination => write!(f, "combination"),
        }
    }
}

/// What a successful toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// One lottery entry: unique numbers, always iterated ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination(BTreeSet<LottoNumber>);

impl Combination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a combination from externally supplied numbers, rejecting
    /// duplicates and anything longer than `cap`.
    pub fn from_numbers(numbers: &[LottoNumber], cap: usize) -> Result<Self, Rejection> {
        let mut set = BTreeSet::new();
        for &n in numbers {
            if !set.insert(n) {
                return Err(Rejection::DuplicateNumber(n.get()));
            }
        }
        if set.len() > cap {
            return Err(Rejection::LimitExceeded(Limit::Combination(cap)));
        }
        Ok(Self(set))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, n: LottoNumber) -> bool {
        self.0.contains(&n)
    }

    pub fn numbers(&self) -> Vec<LottoNumber> {
        self.0.iter().copied().collect()
    }

    /// Plain integers, ascending. This is the shape the backend expects.
    pub fn to_raw(&self) -> Vec<u8> {
        self.0.iter().map(|n| n.get()).collect()
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|n| format!("{:>2}", n.get())).collect();
        write!(f, "[{}]", parts.join(" "))
    }
}

/// Include/exclude numbers in the shape the preferences service uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub include_numbers: Vec<i64>,
    #[serde(default)]
    pub exclude_numbers: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionStore {
    include: BTreeSet<LottoNumber>,
    exclude: BTreeSet<LottoNumber>,
    combinations: Vec<Combination>,
    mode: Mode,
    current_index: usize,
    max_combinations: usize,
    max_numbers_per_combination: usize,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_COMBINATIONS as i64, NUMBERS_PER_COMBINATION)
    }
}

impl SelectionStore {
    /// Creates an empty store. A negative cap clamps to zero.
    pub fn new(max_combinations: i64, max_numbers_per_combination: usize) -> Self {
        Self {
            include: BTreeSet::new(),
            exclude: BTreeSet::new(),
            combinations: Vec::new(),
            mode: Mode::default(),
            current_index: 0,
            max_combinations: clamp_count(max_combinations),
            max_numbers_per_combination,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn include(&self) -> Vec<LottoNumber> {
        self.include.iter().copied().collect()
    }

    pub fn exclude(&self) -> Vec<LottoNumber> {
        self.exclude.iter().copied().collect()
    }

    pub fn include_set(&self) -> &BTreeSet<LottoNumber> {
        &self.include
    }

    pub fn exclude_set(&self) -> &BTreeSet<LottoNumber> {
        &self.exclude
    }

    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn max_combinations(&self) -> usize {
        self.max_combinations
    }

    pub fn max_numbers_per_combination(&self) -> usize {
        self.max_numbers_per_combination
    }

    // ── Mode ────────────────────────────────────────────────────────────────

    pub fn set_mode(&mut self, mode: Mode) {
        debug!("Mode {} -> {}", self.mode, mode);
        self.mode = mode;
    }

    // ── Number taps ─────────────────────────────────────────────────────────

    /// Applies a tap on `n` under `mode`. Removal is always legal; adding
    /// is checked against the caps and the opposite set.
    pub fn toggle_number(&mut self, n: i64, mode: Mode) -> Result<Toggle, Rejection> {
        let n = LottoNumber::new(n)?;
        let result = match mode {
            Mode::Include => {
                if self.include.remove(&n) {
                    Ok(Toggle::Removed)
                } else if self.include.len() >= MAX_INCLUDE {
                    Err(Rejection::LimitExceeded(Limit::Include(MAX_INCLUDE)))
                } else if self.exclude.contains(&n) {
                    Err(Rejection::ConflictsWithExclude(n.get()))
                } else {
                    self.include.insert(n);
                    Ok(Toggle::Added)
                }
            }
            Mode::Exclude => {
                if self.exclude.remove(&n) {
                    Ok(Toggle::Removed)
                } else if self.include.contains(&n) {
                    Err(Rejection::ConflictsWithInclude(n.get()))
                } else {
                    self.exclude.insert(n);
                    Ok(Toggle::Added)
                }
            }
            Mode::Combination => {
                let cap = self.max_numbers_per_combination;
                let index = self.current_index;
                let combination = self
                    .combinations
                    .get_mut(index)
                    .ok_or(Rejection::NoSuchCombination(index))?;
                if combination.0.remove(&n) {
                    Ok(Toggle::Removed)
                } else if combination.len() >= cap {
                    Err(Rejection::LimitExceeded(Limit::Combination(cap)))
                } else {
                    combination.0.insert(n);
                    Ok(Toggle::Added)
                }
            }
        };
        match &result {
            Ok(t) => debug!("Toggle {} in {} mode: {:?}", n, mode, t),
            Err(r) => debug!("Toggle {} in {} mode rejected: {:?}", n, mode, r),
        }
        result
    }

    /// Explicit removal (the "×" control). Removing an absent number is a
    /// no-op. In combination mode without an index nothing happens.
    pub fn remove_from_set(
        &mut self,
        n: i64,
        target: Mode,
        combination_index: Option<usize>,
    ) -> Result<(), Rejection> {
        let n = LottoNumber::new(n)?;
        match target {
            Mode::Include => {
                self.include.remove(&n);
            }
            Mode::Exclude => {
                self.exclude.remove(&n);
            }
            Mode::Combination => {
                if let Some(index) = combination_index {
                    let combination = self
                        .combinations
                        .get_mut(index)
                        .ok_or(Rejection::NoSuchCombination(index))?;
                    combination.0.remove(&n);
                }
            }
        }
        Ok(())
    }

    // ── Combination list ────────────────────────────────────────────────────

    /// Appends an empty combination and makes it current.
    pub fn add_combination(&mut self) -> Result<usize, Rejection> {
        if self.combinations.len() >= self.max_combinations {
            return Err(Rejection::LimitExceeded(Limit::CombinationList(
                self.max_combinations,
            )));
        }
        self.combinations.push(Combination::new());
        self.current_index = self.combinations.len() - 1;
        debug!("Added combination #{}", self.current_index + 1);
        Ok(self.current_index)
    }

    /// Removes the combination at `index`, clamping the current index.
    pub fn remove_combination(&mut self, index: usize) -> Result<Combination, Rejection> {
        if index >= self.combinations.len() {
            return Err(Rejection::NoSuchCombination(index));
        }
        let removed = self.combinations.remove(index);
        if self.current_index >= self.combinations.len() {
            self.current_index = self.combinations.len().saturating_sub(1);
        }
        debug!(
            "Removed combination #{}, {} left",
            index + 1,
            self.combinations.len()
        );
        Ok(removed)
    }

    /// Empties the combination list. Include/exclude are a separate concern.
    pub fn clear_combinations(&mut self) {
        self.combinations.clear();
        self.current_index = 0;
    }

    /// Empties everything: include, exclude and combinations.
    pub fn clear_all(&mut self) {
        self.include.clear();
        self.exclude.clear();
        self.clear_combinations();
    }

    pub fn select_combination(&mut self, index: usize) -> Result<(), Rejection> {
        if index >= self.combinations.len() {
            return Err(Rejection::NoSuchCombination(index));
        }
        self.current_index = index;
        Ok(())
    }

    /// Overwrites the combination at `index`, e.g. with generator output.
    pub fn set_combination(&mut self, index: usize, numbers: &[LottoNumber]) -> Result<(), Rejection> {
        let combination = Combination::from_numbers(numbers, self.max_numbers_per_combination)?;
        let slot = self
            .combinations
            .get_mut(index)
            .ok_or(Rejection::NoSuchCombination(index))?;
        *slot = combination;
        Ok(())
    }

    /// Applies a new cap from the manual count setting. Negative values
    /// clamp to zero. A cap below the current list length drops the
    /// trailing combinations; returns how many were dropped.
    pub fn set_max_combinations(&mut self, max: i64) -> usize {
        let max = clamp_count(max);
        let previous = self.max_combinations;
        self.max_combinations = max;
        let dropped = self.combinations.len().saturating_sub(max);
        if dropped > 0 {
            info!(
                "Manual count {} -> {}, dropping {} combinations",
                previous, max, dropped
            );
            self.combinations.truncate(max);
        }
        if self.current_index >= self.combinations.len() {
            self.current_index = self.combinations.len().saturating_sub(1);
        }
        dropped
    }

    // ── Preferences bridge ──────────────────────────────────────────────────

    /// Replaces include/exclude with values from the preferences service.
    /// Invalid input is rejected as a whole.
    pub fn load_preferences(&mut self, prefs: &Preferences) -> Result<(), Rejection> {
        let include = collect_unique(&prefs.include_numbers)?;
        let exclude = collect_unique(&prefs.exclude_numbers)?;
        if include.len() > MAX_INCLUDE {
            return Err(Rejection::LimitExceeded(Limit::Include(MAX_INCLUDE)));
        }
        if let Some(n) = include.intersection(&exclude).next() {
            return Err(Rejection::ConflictsWithExclude(n.get()));
        }
        info!(
            "Loaded preferences: {} included, {} excluded",
            include.len(),
            exclude.len()
        );
        self.include = include;
        self.exclude = exclude;
        Ok(())
    }

    /// Snapshot of include/exclude in the preferences shape.
    pub fn preferences(&self) -> Preferences {
        Preferences {
            include_numbers: self.include.iter().map(|n| n.get() as i64).collect(),
            exclude_numbers: self.exclude.iter().map(|n| n.get() as i64).collect(),
        }
    }
}

fn clamp_count(value: i64) -> usize {
    usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}

fn collect_unique(raw: &[i64]) -> Result<BTreeSet<LottoNumber>, Rejection> {
    let mut set = BTreeSet::new();
    for &value in raw {
        let n = LottoNumber::new(value)?;
        if !set.insert(n) {
            return Err(Rejection::DuplicateNumber(n.get()));
        }
    }
    Ok(set)
}
