//! Continuous monitoring until interrupted.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use roguewatch_core::{LogNotifier, Monitor, MonitorHandle, Notifier, ScanSource};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::notify::TerminalNotifier;
use crate::output;

pub async fn handle<S: ScanSource>(monitor: Monitor<S>, global: &GlobalOpts) -> Result<(), CliError> {
    if !monitor.baseline().is_configured() && !monitor.config().learn {
        warn!("no baseline configured and learning is off; nothing will be detected");
        eprintln!(
            "No baseline configured. Run `roguewatch --setup --once` first, or pass --setup to learn from the next connection."
        );
    }

    let interval = monitor.config().interval;
    if global.output == OutputFormat::Text {
        output::print_output(
            &format!("Monitoring every {}s. Press Ctrl-C to stop.", interval.as_secs()),
            global.quiet,
        );
    }

    match global.output {
        OutputFormat::Json => run(monitor, Arc::new(LogNotifier), global).await,
        OutputFormat::Text => {
            let notifier = TerminalNotifier::new(output::should_color(global.color), global.quiet);
            run(monitor, Arc::new(notifier), global).await
        }
    }
}

async fn run<S: ScanSource, N: Notifier>(
    monitor: Monitor<S>,
    notifier: Arc<N>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let handle = monitor.spawn(notifier, true);
    let stream_json = global.output == OutputFormat::Json;
    let outcome = pump(&handle, stream_json, global.quiet).await;

    let status = handle.shutdown().await?;
    info!(cycles = status.cycles, "monitoring stopped");
    if global.output == OutputFormat::Text {
        output::print_output(&format!("Stopped after {} scan(s).", status.cycles), global.quiet);
    }
    outcome
}

/// Wait for Ctrl-C, streaming events as JSON lines when asked to.
async fn pump(handle: &MonitorHandle, stream_json: bool, quiet: bool) -> Result<(), CliError> {
    let mut events = handle.events();
    loop {
        tokio::select! {
            biased;
            signal = tokio::signal::ctrl_c() => {
                signal?;
                return Ok(());
            }
            received = events.recv(), if stream_json => match received {
                Ok(event) => output::print_output(&output::render_json_compact(event.as_ref())?, quiet),
                Err(RecvError::Lagged(n)) => warn!(skipped = n, "event stream lagged"),
                Err(RecvError::Closed) => return Ok(()),
            },
        }
    }
}
