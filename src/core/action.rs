//! # Actions
//!
//! Everything that can happen in the number picker becomes an `Action`.
//! User taps 7 in include mode? That's `Action::ToggleNumber { number: 7, mode: Mode::Include }`.
//! Preferences save fails? That's `Action::PreferencesSaveFailed(msg)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O the caller should
//! perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Rejections never abort anything: they land in `app.error` as the inline
//! message and the selection stays as it was.

use log::{debug, info, warn};

use crate::api::types::{Preferences, RecommendationRequest, RecommendationResult};
use crate::core::error::Rejection;
use crate::core::generator::{self, Generated};
use crate::core::selection::{Mode, Toggle};
use crate::core::state::App;
use crate::core::submission;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetMode(Mode),
    /// A tap on the number grid. The mode is explicit, never inferred.
    ToggleNumber { number: i64, mode: Mode },
    /// The "×" control next to a selected number.
    RemoveNumber { number: i64, mode: Mode, combination: Option<usize> },
    AddCombination,
    RemoveCombination(usize),
    SelectCombination(usize),
    ClearCombinations,
    ClearAll,
    /// Dice button for one manual combination.
    RandomCombination { index: usize, respect_constraints: bool },
    /// Fill every manual slot (up to the manual count) with generated combinations.
    FillAllCombinations,
    SetTotalCount(i64),
    SetManualCount(i64),
    SetAutoCount(i64),
    LoadPreferences(Preferences),
    SavePreferences,
    PreferencesSaved,
    PreferencesSaveFailed(String),
    Submit,
    RecommendationsReceived(RecommendationResult),
    RecommendationsFailed(String),
    DismissError,
}

/// I/O the caller should perform after `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Fire-and-forget save. Report back with `PreferencesSaved` or `PreferencesSaveFailed`.
    SavePreferences(Preferences),
    /// Send to the recommendation service. Report back with `RecommendationsReceived` or `RecommendationsFailed`.
    Submit(RecommendationRequest),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("Action: {:?}", action);
    match action {
        Action::SetMode(mode) => {
            app.store.set_mode(mode);
            app.error = None;
        }
        Action::ToggleNumber { number, mode } => {
            let result = app.store.toggle_number(number, mode);
            if let Some(toggle) = settle(app, result)
                && mode != Mode::Combination
            {
                app.preferences_dirty = true;
                app.status_message = match toggle {
                    Toggle::Added => format!("{number}번을 {}에 추가했습니다.", mode_label(mode)),
                    Toggle::Removed => format!("{number}번을 {}에서 뺐습니다.", mode_label(mode)),
                };
            }
        }
        Action::RemoveNumber { number, mode, combination } => {
            let result = app.store.remove_from_set(number, mode, combination);
            if settle(app, result).is_some() && mode != Mode::Combination {
                app.preferences_dirty = true;
            }
        }
        Action::AddCombination => {
            let result = app.store.add_combination();
            if let Some(index) = settle(app, result) {
                app.status_message = format!("조합 {}을(를) 추가했습니다.", index + 1);
            }
        }
        Action::RemoveCombination(index) => {
            let result = app.store.remove_combination(index);
            settle(app, result);
        }
        Action::SelectCombination(index) => {
            let result = app.store.select_combination(index);
            settle(app, result);
        }
        Action::ClearCombinations => {
            app.store.clear_combinations();
            app.error = None;
        }
        Action::ClearAll => {
            let had_sets = !app.store.include_set().is_empty() || !app.store.exclude_set().is_empty();
            app.store.clear_all();
            app.warning = None;
            app.error = None;
            if had_sets {
                app.preferences_dirty = true;
            }
        }
        Action::RandomCombination { index, respect_constraints } => {
            let generated = if respect_constraints {
                generator::generate_for_store(&app.store, &mut app.rng)
            } else {
                Ok(generator::generate_unconstrained(
                    app.store.max_numbers_per_combination(),
                    &mut app.rng,
                ))
            };
            if let Some(generated) = settle(app, generated) {
                write_generated(app, index, &generated);
            }
        }
        Action::FillAllCombinations => fill_all(app),
        Action::SetTotalCount(total) => {
            app.settings.set_total(total);
            sync_max_combinations(app);
        }
        Action::SetManualCount(manual) => {
            app.settings.set_manual(manual);
            sync_max_combinations(app);
        }
        Action::SetAutoCount(auto) => {
            app.settings.set_auto(auto);
            sync_max_combinations(app);
        }
        Action::LoadPreferences(prefs) => {
            let result = app.store.load_preferences(&prefs);
            if settle(app, result).is_some() {
                app.preferences_dirty = false;
                app.status_message = String::from("저장된 설정을 불러왔습니다.");
            }
        }
        Action::SavePreferences => {
            app.status_message = String::from("설정을 저장하는 중...");
            return Effect::SavePreferences(app.store.preferences());
        }
        Action::PreferencesSaved => {
            app.preferences_dirty = false;
            app.save_error = None;
            app.status_message = String::from("설정을 저장했습니다.");
        }
        Action::PreferencesSaveFailed(message) => {
            // The in-memory selection stays authoritative.
            warn!("Preferences save failed: {}", message);
            app.save_error = Some(format!("설정 저장에 실패했습니다: {message}"));
        }
        Action::Submit => {
            let result = submission::build_request(&app.store, &app.settings, &app.session_id);
            if let Some(request) = settle(app, result) {
                app.status_message = String::from("추천 번호를 생성하는 중...");
                return Effect::Submit(request);
            }
        }
        Action::RecommendationsReceived(result) => {
            info!("Received {} recommended combinations", result.combinations.len());
            app.recommendations = result.combinations;
            app.status_message = String::from("추천 조합 생성 완료");
        }
        Action::RecommendationsFailed(message) => {
            warn!("Recommendation request failed: {}", message);
            app.error = Some(String::from("추천 생성에 실패했습니다."));
        }
        Action::DismissError => {
            app.error = None;
            app.warning = None;
            app.save_error = None;
        }
    }
    Effect::None
}

/// Records the outcome of a store call: clears the inline error on
/// success, sets it on rejection.
fn settle<T>(app: &mut App, result: Result<T, Rejection>) -> Option<T> {
    match result {
        Ok(value) => {
            app.error = None;
            Some(value)
        }
        Err(rejection) => {
            debug!("Rejected: {:?}", rejection);
            app.error = Some(rejection.to_string());
            None
        }
    }
}

fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Include => "포함 번호",
        Mode::Exclude => "제외 번호",
        Mode::Combination => "조합",
    }
}

fn write_generated(app: &mut App, index: usize, generated: &Generated) {
    let result = app.store.set_combination(index, &generated.numbers);
    if settle(app, result).is_some() {
        app.warning = short_warning(generated);
    }
}

fn short_warning(generated: &Generated) -> Option<String> {
    if generated.is_complete() {
        None
    } else {
        Some(format!(
            "조건이 너무 까다로워 {}개 중 {}개만 생성했습니다.",
            generated.target,
            generated.numbers.len()
        ))
    }
}

fn fill_all(app: &mut App) {
    let target = app.store.max_combinations();
    while app.store.combinations().len() < target {
        if app.store.add_combination().is_err() {
            break;
        }
    }
    let count = app.store.combinations().len();
    let batch = generator::generate_all(
        app.store.include_set(),
        app.store.exclude_set(),
        app.store.max_numbers_per_combination(),
        count,
        &mut app.rng,
    );
    let Some(batch) = settle(app, batch) else {
        return;
    };
    let mut warning = None;
    for (index, generated) in batch.iter().enumerate() {
        if let Err(rejection) = app.store.set_combination(index, &generated.numbers) {
            app.error = Some(rejection.to_string());
            return;
        }
        warning = warning.or_else(|| short_warning(generated));
    }
    app.warning = warning;
    if count > 0 {
        app.status_message = format!("조합 {count}개를 무작위로 채웠습니다.");
    }
}

/// Pushes the manual count into the store. Combinations beyond the new
/// count are dropped; dropping to zero clears the list.
fn sync_max_combinations(app: &mut App) {
    let dropped = app.store.set_max_combinations(app.settings.manual_count as i64);
    if dropped == 0 {
        return;
    }
    app.status_message = if app.store.combinations().is_empty() {
        String::from("수동 조합을 초기화했습니다.")
    } else {
        format!("수동 조합 {dropped}개를 삭제했습니다.")
    };
}
