mod cli;
mod commands;
mod config;
mod error;
mod notify;
mod output;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use roguewatch_core::{NetshSource, ReplaySource};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Logs go to stderr so JSON output on stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "roguewatch", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::resolve(&cli)?;

    if cli.global.write_config {
        let path = config::write(&cfg, &cli)?;
        output::print_output(&format!("Wrote {}", path.display()), cli.global.quiet);
        return Ok(());
    }

    if cli.source.is_replay() {
        let source = ReplaySource::new(
            cli.source.interfaces_file.clone(),
            cli.source.scan_file.clone(),
        );
        commands::dispatch(source, &cfg, &cli).await
    } else {
        if !cfg!(windows) {
            tracing::warn!("netsh is only available on Windows; scans will come back empty");
        }
        commands::dispatch(NetshSource::new(cfg.warmup), &cfg, &cli).await
    }
}
