//! `--setup --once`: record the visible network as the trusted baseline.

use roguewatch_core::{Monitor, ScanSource};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle<S: ScanSource>(mut monitor: Monitor<S>, global: &GlobalOpts) -> Result<(), CliError> {
    let Some(baseline) = monitor.learn_now().await else {
        eprintln!("No Wi-Fi networks visible; baseline left unchanged.");
        return Ok(());
    };

    let rendered = output::render_baseline(global.output, &baseline, monitor.store().path())?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
