// Configuration loading and parsing (leaders.toml).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use leaders_core::fetcher::{DEFAULT_BASE_URL, REGULAR_SEASON};

/// Location of the config file when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "config/leaders.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub bot: BotConfig,
    pub http: HttpConfig,
    pub stats: StatsConfig,
}

/// Identity of the hosting bot.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BotConfig {
    pub team_id: u32,
    pub user_agent: String,
    /// Appended to the user agent as " - <purpose>".
    pub purpose: Option<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            team_id: 119,
            user_agent: "Baseballbot by /u/Fustrate".into(),
            purpose: None,
        }
    }
}

impl BotConfig {
    /// The full user agent string sent with every request.
    pub fn full_user_agent(&self) -> String {
        match self.purpose.as_deref().filter(|p| !p.is_empty()) {
            Some(purpose) => format!("{} - {purpose}", self.user_agent),
            None => self.user_agent.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 20,
            read_timeout_secs: 20,
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct StatsConfig {
    pub base_url: String,
    pub game_type: String,
    pub count: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            game_type: REGULAR_SEASON.into(),
            count: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate the config at `path`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    parse_config(&text, path)
}

/// Parse and validate config text. `path` is only used in error messages.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Load the config named on the command line, or the default location.
///
/// An explicitly named file must exist. A missing default file falls back
/// to built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => load_config_from(path),
        None => {
            let path = Path::new(DEFAULT_CONFIG_PATH);
            if path.exists() {
                load_config_from(path)
            } else {
                let config = Config::default();
                validate(&config)?;
                Ok(config)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.bot.team_id == 0 {
        return Err(ConfigError::ValidationError {
            field: "bot.team_id".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.bot.user_agent.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "bot.user_agent".into(),
            message: "must not be empty".into(),
        });
    }

    let timeouts: &[(&str, u64)] = &[
        ("http.connect_timeout_secs", config.http.connect_timeout_secs),
        ("http.read_timeout_secs", config.http.read_timeout_secs),
    ];
    for (name, val) in timeouts {
        if *val == 0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must be > 0".into(),
            });
        }
    }

    let strings: &[(&str, &str)] = &[
        ("stats.base_url", config.stats.base_url.as_str()),
        ("stats.game_type", config.stats.game_type.as_str()),
    ];
    for (name, val) in strings {
        if val.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
