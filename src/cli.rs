//! # CLI Adapter
//!
//! Translates subcommands into `core::Action` values, runs the resulting
//! `Effect`s against a [`Backend`], and prints plain text.
//!
//! Every state change goes through `update()`, exactly as an interactive
//! front end would drive it. A rejection recorded in `app.error` stops the
//! command with that message.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use clap::{Args, Subcommand};
use log::{info, warn};

use crate::api::{ApiError, Backend, HttpBackend};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::number::{NUMBERS_PER_COMBINATION, parse_numbers};
use crate::core::selection::{Combination, Mode};
use crate::core::state::App;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate random combinations that honour include/exclude numbers
    Generate {
        #[command(flatten)]
        selection: SelectionArgs,
        /// How many combinations to generate (1-20, defaults to total_count)
        #[arg(short, long)]
        count: Option<i64>,
    },
    /// Ask the recommendation service for combinations
    Recommend {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Total combinations to request (1-20)
        #[arg(short, long)]
        total: Option<i64>,
        /// A hand-built combination, e.g. --manual 3,12,19,27,34,41 (repeatable)
        #[arg(short, long)]
        manual: Vec<ManualArg>,
        /// Fill this many manual combinations at random instead of --manual
        #[arg(long, conflicts_with = "manual")]
        random_manual: Option<i64>,
    },
    /// Read or write the saved include/exclude numbers
    Preferences {
        #[command(subcommand)]
        action: PreferencesCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum PreferencesCommand {
    /// Show the saved include/exclude numbers
    Get,
    /// Replace the saved include/exclude numbers
    Set {
        #[command(flatten)]
        selection: SelectionArgs,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct SelectionArgs {
    /// Numbers every combination must contain (at most 5), comma separated
    #[arg(short, long, value_delimiter = ',')]
    pub include: Vec<i64>,
    /// Numbers no combination may contain, comma separated
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Vec<i64>,
}

/// One `--manual` value: comma separated integers. Out-of-range, repeated
/// or surplus numbers are rejected while parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualArg(pub Vec<i64>);

impl FromStr for ManualArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<i64>()
                    .map_err(|e| format!("invalid number '{}': {}", part.trim(), e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let numbers = parse_numbers(&raw).map_err(|e| e.to_string())?;
        Combination::from_numbers(&numbers, NUMBERS_PER_COMBINATION).map_err(|e| e.to_string())?;
        Ok(ManualArg(raw))
    }
}

#[derive(Debug)]
pub enum CliError {
    /// The engine refused an action; carries the user-facing message.
    Rejected(String),
    Api(ApiError),
    Io(io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Rejected(msg) => write!(f, "{msg}"),
            CliError::Api(e) => write!(f, "{e}"),
            CliError::Io(e) => write!(f, "output error: {e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        CliError::Api(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

/// Runs a command against the HTTP backend, printing to stdout.
pub async fn run(command: Command, config: ResolvedConfig) -> Result<(), CliError> {
    let backend = HttpBackend::new(config.api_base_url.clone(), config.api_token.clone());
    info!("Using backend {} at {}", backend.name(), config.api_base_url);
    let mut stdout = io::stdout();
    run_with(command, &config, &backend, &mut stdout).await
}

/// Runs a command against any backend, writing output to `out`.
pub async fn run_with(
    command: Command,
    config: &ResolvedConfig,
    backend: &dyn Backend,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut app = App::from_config(config);
    match command {
        Command::Generate { selection, count } => {
            apply_selection(&mut app, &selection)?;
            let count = count.unwrap_or(app.settings.total_count as i64);
            dispatch(&mut app, Action::SetTotalCount(count))?;
            dispatch(&mut app, Action::SetManualCount(count))?;
            dispatch(&mut app, Action::FillAllCombinations)?;
            print_selection(&app, out)?;
            for (index, combination) in app.store.combinations().iter().enumerate() {
                writeln!(out, "조합 {}: {}", index + 1, combination)?;
            }
            print_warning(&app, out)?;
        }
        Command::Recommend {
            selection,
            total,
            manual,
            random_manual,
        } => {
            apply_selection(&mut app, &selection)?;
            if let Some(total) = total {
                dispatch(&mut app, Action::SetTotalCount(total))?;
            }
            if !manual.is_empty() {
                dispatch(&mut app, Action::SetManualCount(manual.len() as i64))?;
                for ManualArg(numbers) in &manual {
                    dispatch(&mut app, Action::AddCombination)?;
                    for &number in numbers {
                        dispatch(
                            &mut app,
                            Action::ToggleNumber { number, mode: Mode::Combination },
                        )?;
                    }
                }
            } else if let Some(count) = random_manual {
                dispatch(&mut app, Action::SetManualCount(count))?;
                dispatch(&mut app, Action::FillAllCombinations)?;
                print_warning(&app, out)?;
            }

            if let Effect::Submit(request) = dispatch(&mut app, Action::Submit)? {
                match backend.generate_recommendations(&request).await {
                    Ok(result) => {
                        update(&mut app, Action::RecommendationsReceived(result));
                    }
                    Err(e) => {
                        update(&mut app, Action::RecommendationsFailed(e.to_string()));
                        return Err(e.into());
                    }
                }
            }
            print_recommendations(&app, out)?;
        }
        Command::Preferences { action: PreferencesCommand::Get } => {
            let prefs = backend.get_preferences().await?;
            dispatch(&mut app, Action::LoadPreferences(prefs))?;
            print_selection(&app, out)?;
        }
        Command::Preferences {
            action: PreferencesCommand::Set { selection },
        } => {
            apply_selection(&mut app, &selection)?;
            if let Effect::SavePreferences(prefs) = update(&mut app, Action::SavePreferences) {
                match backend.save_preferences(&prefs).await {
                    Ok(()) => {
                        update(&mut app, Action::PreferencesSaved);
                    }
                    Err(e) => {
                        update(&mut app, Action::PreferencesSaveFailed(e.to_string()));
                        if let Some(msg) = &app.save_error {
                            writeln!(out, "{msg}")?;
                        }
                        print_selection(&app, out)?;
                        return Err(e.into());
                    }
                }
            }
            writeln!(out, "{}", app.status_message)?;
            print_selection(&app, out)?;
        }
    }
    Ok(())
}

/// Applies an action and turns a recorded rejection into an error.
fn dispatch(app: &mut App, action: Action) -> Result<Effect, CliError> {
    let effect = update(app, action);
    match app.error.take() {
        Some(msg) => {
            warn!("Command stopped: {}", msg);
            Err(CliError::Rejected(msg))
        }
        None => Ok(effect),
    }
}

/// Taps every include number in include mode, then every exclude number
/// in exclude mode.
fn apply_selection(app: &mut App, selection: &SelectionArgs) -> Result<(), CliError> {
    dispatch(app, Action::SetMode(Mode::Include))?;
    for &number in &selection.include {
        dispatch(app, Action::ToggleNumber { number, mode: Mode::Include })?;
    }
    dispatch(app, Action::SetMode(Mode::Exclude))?;
    for &number in &selection.exclude {
        dispatch(app, Action::ToggleNumber { number, mode: Mode::Exclude })?;
    }
    Ok(())
}

fn join(numbers: &[u8]) -> String {
    if numbers.is_empty() {
        return String::from("-");
    }
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_selection(app: &App, out: &mut dyn Write) -> io::Result<()> {
    let include: Vec<u8> = app.store.include().iter().map(|n| n.get()).collect();
    let exclude: Vec<u8> = app.store.exclude().iter().map(|n| n.get()).collect();
    writeln!(out, "포함: {}", join(&include))?;
    writeln!(out, "제외: {}", join(&exclude))
}

fn print_warning(app: &App, out: &mut dyn Write) -> io::Result<()> {
    if let Some(warning) = &app.warning {
        writeln!(out, "경고: {warning}")?;
    }
    Ok(())
}

fn print_recommendations(app: &App, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", app.status_message)?;
    for (index, detail) in app.recommendations.iter().enumerate() {
        let kind = if detail.is_manual { "수동" } else { "자동" };
        match detail.confidence_score {
            Some(score) => writeln!(
                out,
                "{}. {} ({kind}, 신뢰도 {:.0}%)",
                index + 1,
                join(&detail.numbers),
                score * 100.0
            )?,
            None => writeln!(out, "{}. {} ({kind})", index + 1, join(&detail.numbers))?,
        }
    }
    Ok(())
}
