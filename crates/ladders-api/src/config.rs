//! Startup configuration read from the environment.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use ladders_board::BoardTopology;
use ladders_narrative::application::completion::{
    DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, NarratorConfig,
};
use ladders_session::application::orchestrator::Pacing;
use ladders_session::domain::players::Roster;
use tracing::info;

use crate::error::AppError;

/// Everything the server needs before it can start a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Optional YAML board table replacing the standard one.
    pub board_file: Option<PathBuf>,
    /// Display name of the human player.
    pub player_name: String,
    /// Display name of the automated opponent.
    pub opponent_name: String,
    /// Commentary service settings.
    pub narrator: NarratorConfig,
    /// Delays between the steps of a turn.
    pub pacing: Pacing,
    /// Fixed dice seed for reproducible games; OS entropy when unset.
    pub dice_seed: Option<u64>,
}

impl AppConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of
    /// a variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a numeric variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());
        let defaults = Pacing::default();
        let millis = |key: &str, default: Duration| -> Result<Duration, AppError> {
            lookup(key).map_or(Ok(default), |raw| {
                parse::<u64>(key, &raw).map(Duration::from_millis)
            })
        };

        Ok(Self {
            host: text("HOST", "0.0.0.0"),
            port: lookup("PORT").map_or(Ok(3000), |raw| parse("PORT", &raw))?,
            board_file: lookup("BOARD_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            player_name: text("PLAYER_NAME", "You"),
            opponent_name: text("OPPONENT_NAME", "Serpentina"),
            narrator: NarratorConfig {
                api_key: lookup("NARRATOR_API_KEY").filter(|key| !key.trim().is_empty()),
                base_url: text("NARRATOR_BASE_URL", DEFAULT_BASE_URL),
                model: text("NARRATOR_MODEL", DEFAULT_MODEL),
                max_tokens: lookup("NARRATOR_MAX_TOKENS").map_or(Ok(DEFAULT_MAX_TOKENS), |raw| {
                    parse("NARRATOR_MAX_TOKENS", &raw)
                })?,
            },
            pacing: Pacing {
                overshoot: millis("PACING_OVERSHOOT_MS", defaults.overshoot)?,
                narration: millis("PACING_NARRATION_MS", defaults.narration)?,
                opponent: millis("PACING_OPPONENT_MS", defaults.opponent)?,
            },
            dice_seed: lookup("DICE_SEED")
                .map(|raw| parse("DICE_SEED", &raw))
                .transpose()?,
        })
    }

    /// Builds the roster from the configured names.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the names are blank or identical.
    pub fn roster(&self) -> Result<Roster, AppError> {
        Roster::with_names(&self.player_name, &self.opponent_name)
            .map_err(|e| AppError::Config(e.to_string()))
    }
}

fn parse<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AppError::Config(format!("{key} must be a valid number: {e}")))
}

/// Loads the board table: the YAML file at `path` if given, otherwise the
/// standard table.
///
/// # Errors
///
/// Returns `AppError::Config` if the file cannot be read and
/// `AppError::Topology` if the table breaks a topology rule.
pub fn load_topology(path: Option<&Path>) -> Result<BoardTopology, AppError> {
    let Some(path) = path else {
        info!("using standard board");
        return Ok(BoardTopology::standard()?);
    };
    let document = std::fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
    let topology = BoardTopology::from_yaml_str(&document)?;
    info!(
        path = %path.display(),
        snakes = topology.snakes().len(),
        ladders = topology.ladders().len(),
        "loaded board"
    );
    Ok(topology)
}
