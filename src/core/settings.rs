//! # Combination Settings
//!
//! How many combinations to request in total, and how many of those the
//! user builds by hand. The other two fields are rebalanced whenever one
//! changes, so `manual + auto == total` always holds.

use serde::{Deserialize, Serialize};

pub const MIN_TOTAL_COUNT: i64 = 1;
pub const MAX_TOTAL_COUNT: i64 = 20;
pub const DEFAULT_TOTAL_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationSettings {
    pub total_count: usize,
    pub manual_count: usize,
    pub auto_count: usize,
}

impl Default for CombinationSettings {
    fn default() -> Self {
        Self {
            total_count: DEFAULT_TOTAL_COUNT,
            manual_count: 0,
            auto_count: DEFAULT_TOTAL_COUNT,
        }
    }
}

impl CombinationSettings {
    /// Builds settings from possibly out-of-range input, clamping as the
    /// setters do.
    pub fn new(total: i64, manual: i64) -> Self {
        let mut settings = Self::default();
        settings.set_total(total);
        settings.set_manual(manual);
        settings
    }

    /// Total is clamped to 1..=20; manual shrinks to fit.
    pub fn set_total(&mut self, total: i64) {
        let total = total.clamp(MIN_TOTAL_COUNT, MAX_TOTAL_COUNT) as usize;
        self.total_count = total;
        self.manual_count = self.manual_count.min(total);
        self.auto_count = total - self.manual_count;
    }

    pub fn set_manual(&mut self, manual: i64) {
        let manual = clamp_to(manual, self.total_count);
        self.manual_count = manual;
        self.auto_count = self.total_count - manual;
    }

    pub fn set_auto(&mut self, auto: i64) {
        let auto = clamp_to(auto, self.total_count);
        self.auto_count = auto;
        self.manual_count = self.total_count - auto;
    }
}

fn clamp_to(value: i64, max: usize) -> usize {
    (value.max(0) as u64).min(max as u64) as usize
}
