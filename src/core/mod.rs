//! # Core Selection Logic
//!
//! The number picker's business logic.
//! It knows nothing about any specific UI technology or transport.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • SelectionStore       │
//!                    │  • Generator            │
//!                    │  • App (state)          │
//!                    │  • Action → update()    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    CLI     │      │    Web     │      │  Backend   │
//!     │  Adapter   │      │  Adapter   │      │   (api)    │
//!     │  (clap)    │      │  (future)  │      │ (reqwest)  │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`number`]: `LottoNumber`, the checked 1..=45 integer
//! - [`selection`]: `SelectionStore`, include/exclude/combination state and its invariants
//! - [`generator`]: constraint-aware random combinations
//! - [`settings`]: total / manual / auto counts
//! - [`submission`]: validation and request building
//! - [`state`]: the `App` struct, all front-end state in one place
//! - [`action`]: the `Action` enum and `update()` reducer
//! - [`config`]: `~/.lotto/config.toml` loading and resolution
//! - [`error`]: `Rejection`, the typed reasons an operation can refuse

pub mod action;
pub mod config;
pub mod error;
pub mod generator;
pub mod number;
pub mod selection;
pub mod settings;
pub mod state;
pub mod submission;

pub use action::{Action, Effect, update};
pub use error::{Limit, Rejection};
pub use number::LottoNumber;
pub use selection::{Combination, Mode, Preferences, SelectionStore};
pub use state::App;
