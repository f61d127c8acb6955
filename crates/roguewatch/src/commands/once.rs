//! `--once`: a single detection cycle.

use roguewatch_core::{LogNotifier, Monitor, ScanSource};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::notify::TerminalNotifier;
use crate::output;

pub async fn handle<S: ScanSource>(monitor: Monitor<S>, global: &GlobalOpts) -> Result<(), CliError> {
    if !monitor.baseline().is_configured() && !monitor.config().learn {
        eprintln!("No baseline configured. Run `roguewatch --setup --once` while connected to the trusted network.");
        return Ok(());
    }

    match global.output {
        OutputFormat::Json => {
            let report = monitor.run_once(&LogNotifier).await;
            output::print_output(&output::render_json_pretty(&report)?, global.quiet);
        }
        OutputFormat::Text => {
            let notifier = TerminalNotifier::new(output::should_color(global.color), global.quiet);
            let report = monitor.run_once(&notifier).await;

            let table = output::render_events(OutputFormat::Text, &report.events)?;
            output::print_output(&table, global.quiet);
            let summary = if report.events.is_empty() {
                format!("No threats detected ({} networks scanned).", report.networks_seen)
            } else {
                format!(
                    "{} finding(s) across {} networks.",
                    report.events.len(),
                    report.networks_seen
                )
            };
            output::print_output(&summary, global.quiet);
        }
    }
    Ok(())
}
