//! # Submission
//!
//! Turns the current selection into a recommendation request. Manual
//! combinations must be complete before anything is sent; an incomplete one
//! blocks submission with a message naming the combination.

use log::info;

use crate::api::types::{ManualCombination, RecommendationRequest};
use crate::core::error::Rejection;
use crate::core::number::NUMBERS_PER_COMBINATION;
use crate::core::selection::SelectionStore;
use crate::core::settings::CombinationSettings;

/// Checks the manual combinations against the settings.
///
/// With `manual_count == 0` there is nothing to check.
pub fn validate(store: &SelectionStore, settings: &CombinationSettings) -> Result<(), Rejection> {
    if settings.manual_count == 0 {
        return Ok(());
    }
    let combinations = store.combinations();
    if combinations.is_empty() {
        return Err(Rejection::MissingManualCombinations);
    }
    for (index, combination) in combinations.iter().enumerate() {
        if combination.len() != NUMBERS_PER_COMBINATION {
            return Err(Rejection::IncompleteCombination {
                index,
                count: combination.len(),
                required: NUMBERS_PER_COMBINATION,
            });
        }
    }
    Ok(())
}

/// Validates and builds the request body for the recommendation service.
pub fn build_request(
    store: &SelectionStore,
    settings: &CombinationSettings,
    session_id: &str,
) -> Result<RecommendationRequest, Rejection> {
    validate(store, settings)?;

    let manual_combinations = if settings.manual_count == 0 {
        Vec::new()
    } else {
        store
            .combinations()
            .iter()
            .map(|c| ManualCombination { numbers: c.to_raw() })
            .collect()
    };

    info!(
        "Built recommendation request: total={}, manual={}, include={}, exclude={}",
        settings.total_count,
        manual_combinations.len(),
        store.include_set().len(),
        store.exclude_set().len()
    );

    Ok(RecommendationRequest {
        session_id: session_id.to_string(),
        total_count: settings.total_count,
        manual_combinations,
        preferences: store.preferences(),
        target_draw: None,
    })
}
