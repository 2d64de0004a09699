//! Application-level configuration loading: storage backend, ad cadence and team palette.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    dto::validation::is_hex_color,
    services::interstitial::DEFAULT_INTERSTITIAL_DELAY,
    state::{
        ad_gate::DEFAULT_ROUNDS_BETWEEN_ADS,
        orchestrator::DEFAULT_TEAM_TURN_LIMIT,
        team_game::{DEFAULT_MAX_ROUNDS, MAX_ROUNDS},
    },
};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "PASSWORD_PARTY_CONFIG_PATH";
/// Where the file backend keeps its document unless configured otherwise.
const DEFAULT_STORE_PATH: &str = "data/password-party.json";
/// Colors handed to teams created without one.
const DEFAULT_TEAM_COLORS: [&str; 6] = [
    "#E74C3C", "#3498DB", "#27AE60", "#F39C12", "#9B59B6", "#E67E22",
];

/// Key-value backend selected at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Volatile in-process map.
    Memory,
    /// JSON document on disk.
    File {
        /// Location of the document.
        path: PathBuf,
    },
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::File {
            path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    storage: StorageConfig,
    rounds_between_ads: u32,
    interstitial_delay: Duration,
    default_team_rounds: u32,
    team_turn_limit: Duration,
    team_colors: Vec<String>,
}

impl AppConfig {
    /// Load the configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        storage = ?app_config.storage,
                        colors = app_config.team_colors.len(),
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Same configuration with another storage backend.
    pub fn with_storage(mut self, storage: StorageConfig) -> Self {
        self.storage = storage;
        self
    }

    /// Same configuration with another interstitial delay.
    pub fn with_interstitial_delay(mut self, delay: Duration) -> Self {
        self.interstitial_delay = delay;
        self
    }

    /// Selected key-value backend.
    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Completed single-mode rounds between two interstitials.
    pub fn rounds_between_ads(&self) -> u32 {
        self.rounds_between_ads
    }

    /// How long the simulated interstitial stays up.
    pub fn interstitial_delay(&self) -> Duration {
        self.interstitial_delay
    }

    /// Rounds per team when the client does not pick a number.
    pub fn default_team_rounds(&self) -> u32 {
        self.default_team_rounds
    }

    /// Time each team gets per turn.
    pub fn team_turn_limit(&self) -> Duration {
        self.team_turn_limit
    }

    /// Return the first palette color that is not already listed in `used`.
    ///
    /// Once every palette entry is taken the palette is cycled by team count,
    /// so callers always receive a value.
    pub fn first_unused_color(&self, used: &[String]) -> String {
        self.team_colors
            .iter()
            .find(|candidate| {
                used.iter()
                    .all(|existing| !existing.eq_ignore_ascii_case(candidate))
            })
            .or_else(|| {
                used.len()
                    .checked_rem(self.team_colors.len())
                    .and_then(|index| self.team_colors.get(index))
            })
            .cloned()
            .unwrap_or_else(|| DEFAULT_TEAM_COLORS[0].to_string())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            rounds_between_ads: DEFAULT_ROUNDS_BETWEEN_ADS,
            interstitial_delay: DEFAULT_INTERSTITIAL_DELAY,
            default_team_rounds: DEFAULT_MAX_ROUNDS,
            team_turn_limit: DEFAULT_TEAM_TURN_LIMIT,
            team_colors: default_team_colors(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    storage: Option<RawStorage>,
    rounds_between_ads: Option<u32>,
    interstitial_delay_ms: Option<u64>,
    default_team_rounds: Option<u32>,
    team_turn_seconds: Option<u64>,
    team_colors: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
enum RawStorage {
    Memory,
    File { path: Option<PathBuf> },
}

impl From<RawStorage> for StorageConfig {
    fn from(value: RawStorage) -> Self {
        match value {
            RawStorage::Memory => StorageConfig::Memory,
            RawStorage::File { path } => StorageConfig::File {
                path: path.unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)),
            },
        }
    }
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();

        let default_team_rounds = match value.default_team_rounds {
            Some(rounds) if (1..=MAX_ROUNDS).contains(&rounds) => rounds,
            Some(rounds) => {
                warn!(rounds, "default_team_rounds out of range; using default");
                defaults.default_team_rounds
            }
            None => defaults.default_team_rounds,
        };

        let team_colors = value
            .team_colors
            .map(|colors| {
                colors
                    .into_iter()
                    .filter(|color| {
                        let valid = is_hex_color(color);
                        if !valid {
                            warn!(color = %color, "ignoring invalid team color");
                        }
                        valid
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|colors| !colors.is_empty())
            .unwrap_or(defaults.team_colors);

        Self {
            storage: value.storage.map(Into::into).unwrap_or(defaults.storage),
            rounds_between_ads: value
                .rounds_between_ads
                .map(|rounds| rounds.max(1))
                .unwrap_or(defaults.rounds_between_ads),
            interstitial_delay: value
                .interstitial_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.interstitial_delay),
            default_team_rounds,
            team_turn_limit: value
                .team_turn_seconds
                .filter(|seconds| *seconds > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.team_turn_limit),
            team_colors,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn default_team_colors() -> Vec<String> {
    DEFAULT_TEAM_COLORS.iter().map(|color| color.to_string()).collect()
}
