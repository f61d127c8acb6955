//! Clap derive structures for the `roguewatch` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use clap_complete::Shell;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// roguewatch -- rogue and evil-twin Wi-Fi access point detector
#[derive(Debug, Parser)]
#[command(
    name = "roguewatch",
    version,
    about = "Detect rogue and look-alike Wi-Fi access points",
    long_about = "Periodically samples nearby Wi-Fi access points and alerts when a radio\n\
        broadcasts the trusted SSID from an unknown BSSID, or when a network\n\
        with a confusingly similar SSID appears.\n\n\
        Run once with --setup --once while connected to the trusted network to\n\
        record a baseline, then run without flags to monitor."
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunOpts,

    #[command(flatten)]
    pub source: SourceOpts,

    #[command(flatten)]
    pub global: GlobalOpts,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL", hide = true)]
    pub completions: Option<Shell>,
}

// ── Run mode ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
#[command(next_help_heading = "Monitoring")]
pub struct RunOpts {
    /// Seconds between scans
    #[arg(long, short = 'i', value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Run a single scan, report, and exit
    #[arg(long)]
    pub once: bool,

    /// Learning mode; with --once, record the current network as the baseline
    #[arg(long)]
    pub setup: bool,

    /// Baseline file (overrides config)
    #[arg(long, value_name = "PATH")]
    pub baseline: Option<PathBuf>,

    /// Look-alike SSID threshold between 0.0 and 1.0
    #[arg(long, value_name = "SCORE")]
    pub threshold: Option<f64>,

    /// Suppress repeat alerts for the same finding for this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub cooldown: Option<u64>,
}

// ── Scan source ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
#[command(next_help_heading = "Scan source")]
pub struct SourceOpts {
    /// Replay a captured `netsh wlan show networks mode=bssid` dump
    #[arg(long, value_name = "PATH")]
    pub scan_file: Option<PathBuf>,

    /// Replay a captured `netsh wlan show interfaces` dump
    #[arg(long, value_name = "PATH")]
    pub interfaces_file: Option<PathBuf>,

    /// Skip the scan cache refresh before each BSSID listing
    #[arg(long)]
    pub no_warmup: bool,
}

impl SourceOpts {
    pub fn is_replay(&self) -> bool {
        self.scan_file.is_some() || self.interfaces_file.is_some()
    }
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH", env = "ROGUEWATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    pub write_config: bool,

    /// Output format
    #[arg(long, short = 'o', default_value = "text")]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto")]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable alerts and tables
    Text,
    /// JSON (one object per event while monitoring)
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}
