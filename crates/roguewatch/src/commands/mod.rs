//! Command dispatch: picks the run mode and wires the monitor to output.

pub mod once;
pub mod setup;
pub mod watch;

use roguewatch_core::{BaselineStore, Monitor, ScanSource};

use crate::cli::Cli;
use crate::config::Config;
use crate::error::CliError;

/// Build a monitor over `source` and run the mode the flags select.
pub async fn dispatch<S: ScanSource>(source: S, cfg: &Config, cli: &Cli) -> Result<(), CliError> {
    let mut monitor_cfg = cfg.to_monitor_config();
    monitor_cfg.learn |= cli.run.setup;

    let store = BaselineStore::new(cfg.baseline_path());
    let monitor = Monitor::new(source, store, monitor_cfg);

    tracing::debug!(
        once = cli.run.once,
        setup = cli.run.setup,
        baseline = %monitor.store().path().display(),
        "dispatching"
    );
    match (cli.run.setup, cli.run.once) {
        (true, true) => setup::handle(monitor, &cli.global).await,
        (false, true) => once::handle(monitor, &cli.global).await,
        _ => watch::handle(monitor, &cli.global).await,
    }
}
