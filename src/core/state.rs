//! # Application State
//!
//! Everything a front end needs to render the number picker, in one place.
//! Presentation lives elsewhere.
//!
//! ```text
//! App
//! ├── store: SelectionStore          // include / exclude / manual combinations
//! ├── settings: CombinationSettings  // total / manual / auto counts
//! ├── status_message: String         // status line text
//! ├── error: Option<String>          // inline, dismissable rejection message
//! ├── warning: Option<String>        // constraint-too-tight notice from the generator
//! ├── save_error: Option<String>     // failed preferences save, shown separately
//! ├── preferences_dirty: bool        // include/exclude changed since last load/save
//! ├── session_id: String             // sent with recommendation requests
//! ├── recommendations: Vec<...>      // last result from the recommendation service
//! └── rng: StdRng                    // source for the generator
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::api::types::CombinationDetail;
use crate::core::config::ResolvedConfig;
use crate::core::number::NUMBERS_PER_COMBINATION;
use crate::core::selection::SelectionStore;
use crate::core::settings::CombinationSettings;

pub struct App {
    pub store: SelectionStore,
    pub settings: CombinationSettings,
    pub status_message: String,
    pub error: Option<String>,
    pub warning: Option<String>,
    pub save_error: Option<String>,
    pub preferences_dirty: bool,
    pub session_id: String,
    pub recommendations: Vec<CombinationDetail>,
    pub rng: StdRng,
}

impl App {
    pub fn new(settings: CombinationSettings, rng: StdRng) -> Self {
        Self {
            store: SelectionStore::new(settings.manual_count as i64, NUMBERS_PER_COMBINATION),
            settings,
            status_message: String::from("번호를 선택하세요."),
            error: None,
            warning: None,
            save_error: None,
            preferences_dirty: false,
            session_id: new_session_id(),
            recommendations: Vec::new(),
            rng,
        }
    }

    /// Seeded when the config asks for it, otherwise from OS entropy.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(
            CombinationSettings::new(config.total_count as i64, config.manual_count as i64),
            rng,
        )
    }
}

/// Generate a `sess_`-prefixed UUID v4 for recommendation requests.
pub fn new_session_id() -> String {
    format!("sess_{}", uuid::Uuid::new_v4().simple())
}
