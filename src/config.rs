//! Configuration file loading and validation.
//!
//! Preferences live in a TOML file at `~/.config/sunside/sunside.toml`.
//! Every field is optional; a missing file means pure defaults, while a
//! present-but-broken file is an error the user should see rather than a
//! silent fallback.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::constants::{DEFAULT_TOLERANCE_MS, MAX_TOLERANCE_MS, MIN_TOLERANCE_MS};

/// User preferences, merged over built-in defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Seek the sun (true) or the shade (false).
    #[serde(default = "default_true")]
    pub prefer_sun: bool,
    /// Whether recommendations may split a segment at solar noon.
    #[serde(default = "default_true")]
    pub seat_change_allowed: bool,
    /// Annotate sun events with local UTC offsets when endpoints disagree.
    #[serde(default)]
    pub use_local_timezones: bool,
    /// Solver convergence tolerance in milliseconds.
    #[serde(default = "default_tolerance_ms")]
    pub tolerance_ms: i64,
}

fn default_true() -> bool {
    true
}

fn default_tolerance_ms() -> i64 {
    DEFAULT_TOLERANCE_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefer_sun: true,
            seat_change_allowed: true,
            use_local_timezones: false,
            tolerance_ms: DEFAULT_TOLERANCE_MS,
        }
    }
}

impl Config {
    /// Load from the default path, or defaults when no file exists.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Default configuration file path under the platform config directory.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sunside").join("sunside.toml"))
    }

    fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(MIN_TOLERANCE_MS..=MAX_TOLERANCE_MS).contains(&self.tolerance_ms) {
            return Err(anyhow!(
                "tolerance_ms must be between {MIN_TOLERANCE_MS} and {MAX_TOLERANCE_MS}, got {}",
                self.tolerance_ms
            ));
        }
        Ok(())
    }
}
