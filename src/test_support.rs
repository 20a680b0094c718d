//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::core::settings::CombinationSettings;
use crate::core::state::App;

/// Creates a test App with default settings and a fixed seed.
pub fn test_app() -> App {
    App::new(CombinationSettings::default(), StdRng::seed_from_u64(0xC0FFEE))
}
