//! CLI configuration: thin wrapper around `roguewatch_config` that layers
//! command-line flags over the file and environment.

use std::path::PathBuf;

use roguewatch_config::ConfigError;

use crate::cli::Cli;
use crate::error::CliError;

pub use roguewatch_config::{Config, config_path, load_config, save_config};

/// Load the effective configuration: defaults, file, environment, flags.
///
/// `--setup` is deliberately not folded in; it applies to one invocation
/// and must never end up in a written config file.
pub fn resolve(cli: &Cli) -> Result<Config, CliError> {
    let path = cli.global.config.clone().unwrap_or_else(config_path);
    let mut cfg = load_config(Some(&path)).map_err(|e| CliError::config(&path, e))?;
    apply_overrides(&mut cfg, cli);
    cfg.validate().map_err(|e| match e {
        ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
        other => CliError::config(&path, other),
    })?;
    Ok(cfg)
}

fn apply_overrides(cfg: &mut Config, cli: &Cli) {
    let run = &cli.run;
    if let Some(interval) = run.interval {
        cfg.interval_secs = interval;
    }
    if let Some(ref baseline) = run.baseline {
        cfg.baseline_path = Some(baseline.clone());
    }
    if let Some(threshold) = run.threshold {
        cfg.similarity_threshold = threshold;
    }
    if let Some(cooldown) = run.cooldown {
        cfg.alert_cooldown_secs = cooldown;
    }
    if cli.source.no_warmup {
        cfg.warmup = false;
    }
}

/// Persist the effective configuration for `--write-config`.
pub fn write(cfg: &Config, cli: &Cli) -> Result<PathBuf, CliError> {
    let path = cli.global.config.clone().unwrap_or_else(config_path);
    save_config(cfg, Some(&path)).map_err(|e| CliError::config(&path, e))
}
