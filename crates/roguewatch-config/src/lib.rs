//! Configuration for roguewatch.
//!
//! Layered with figment: built-in defaults, then the TOML file, then
//! `ROGUEWATCH_*` environment variables. The CLI applies its flag overrides
//! on top and converts the result into a [`MonitorConfig`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use roguewatch_core::{DEFAULT_SIMILARITY_THRESHOLD, MonitorConfig};

pub const ENV_PREFIX: &str = "ROGUEWATCH_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Seconds between detection cycles.
    pub interval_secs: u64,

    /// Upper bound, in seconds, on each OS scan query.
    pub scan_timeout_secs: u64,

    /// Look-alike SSID activation score, `0.0..=1.0`.
    pub similarity_threshold: f64,

    /// Learning mode.
    pub learn: bool,

    /// Baseline file. Defaults to the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_path: Option<PathBuf>,

    /// Per-finding notification cool-down; `0` re-alerts every cycle.
    pub alert_cooldown_secs: u64,

    /// Refresh the OS scan cache before each BSSID listing.
    pub warmup: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            scan_timeout_secs: 10,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            learn: false,
            baseline_path: None,
            alert_cooldown_secs: 0,
            warmup: true,
        }
    }
}

impl Config {
    /// Reject values the monitor cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_secs == 0 {
            return Err(ConfigError::Validation {
                field: "interval_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.scan_timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "scan_timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::Validation {
                field: "similarity_threshold".into(),
                reason: format!("{} is outside 0.0..=1.0", self.similarity_threshold),
            });
        }
        Ok(())
    }

    /// Effective baseline file location.
    pub fn baseline_path(&self) -> PathBuf {
        self.baseline_path
            .clone()
            .unwrap_or_else(default_baseline_path)
    }

    pub fn to_monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            interval: Duration::from_secs(self.interval_secs),
            scan_timeout: Duration::from_secs(self.scan_timeout_secs),
            similarity_threshold: self.similarity_threshold,
            learn: self.learn,
            alert_cooldown: Duration::from_secs(self.alert_cooldown_secs),
        }
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "roguewatch", "roguewatch")
}

fn home_fallback(sub: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(sub);
    p.push("roguewatch");
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(".config").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default baseline file in the platform data directory.
pub fn default_baseline_path() -> PathBuf {
    project_dirs().map_or_else(
        || home_fallback(".local/share").join("baseline"),
        |dirs| dirs.data_dir().join("baseline"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
}

/// Load and validate the config from `path` (or the canonical location)
/// plus the environment. A missing file is not an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    let config: Config = figment(&path).extract()?;
    config.validate()?;
    Ok(config)
}

// ── Saving ──────────────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path` (or the canonical
/// location). Returns the path written.
pub fn save_config(cfg: &Config, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(path)
}
