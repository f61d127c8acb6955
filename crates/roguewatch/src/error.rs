//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

use roguewatch_config::ConfigError;
use roguewatch_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(roguewatch::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Could not load configuration from {path}")]
    #[diagnostic(
        code(roguewatch::config),
        help(
            "Fix or remove the file, or point --config at another one.\n\
             Environment overrides use the ROGUEWATCH_ prefix, e.g. ROGUEWATCH_INTERVAL_SECS=30."
        )
    )]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },

    // ── Core ─────────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(roguewatch::core))]
    Core(#[from] CoreError),

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not encode JSON output: {0}")]
    #[diagnostic(code(roguewatch::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } => exit_code::USAGE,
            Self::Config { source, .. } => match source {
                ConfigError::Validation { .. } => exit_code::USAGE,
                _ => exit_code::CONFIG,
            },
            _ => exit_code::GENERAL,
        }
    }

    pub fn config(path: &std::path::Path, source: ConfigError) -> Self {
        Self::Config {
            path: path.display().to_string(),
            source,
        }
    }
}
