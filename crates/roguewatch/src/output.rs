//! Output formatting: text tables and JSON.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use roguewatch_core::{Baseline, DetectionEvent};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Event table ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "Kind")]
    kind: &'static str,
    #[tabled(rename = "SSID")]
    ssid: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

impl From<&DetectionEvent> for EventRow {
    fn from(event: &DetectionEvent) -> Self {
        match event {
            DetectionEvent::RogueBssid {
                ssid,
                bssid,
                source,
            } => Self {
                kind: "rogue BSSID",
                ssid: ssid.clone(),
                detail: format!("{bssid} (seen via {source})"),
            },
            DetectionEvent::SimilarSsid {
                observed,
                baseline,
                score,
            } => Self {
                kind: "similar SSID",
                ssid: observed.clone(),
                detail: format!("looks like '{baseline}' (score {score:.2})"),
            },
            _ => Self {
                kind: event.kind(),
                ssid: String::new(),
                detail: event.alert().message,
            },
        }
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

pub fn render_events(format: OutputFormat, events: &[DetectionEvent]) -> Result<String, CliError> {
    match format {
        OutputFormat::Text if events.is_empty() => Ok(String::new()),
        OutputFormat::Text => Ok(render_table(
            &events.iter().map(EventRow::from).collect::<Vec<_>>(),
        )),
        OutputFormat::Json => render_json_pretty(events),
    }
}

#[derive(Serialize)]
struct BaselineView<'a> {
    ssid: Option<&'a str>,
    bssids: Vec<String>,
    path: &'a Path,
}

pub fn render_baseline(format: OutputFormat, baseline: &Baseline, path: &Path) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => {
            let mut lines = vec![
                format!("Trusted SSID: {}", baseline.trusted_ssid().unwrap_or("-")),
                format!("Known BSSIDs: {}", baseline.bssids.len()),
            ];
            lines.extend(baseline.bssids.iter().map(|b| format!("  {b}")));
            lines.push(format!("Saved to:     {}", path.display()));
            Ok(lines.join("\n"))
        }
        OutputFormat::Json => render_json_pretty(&BaselineView {
            ssid: baseline.trusted_ssid(),
            bssids: baseline.bssids.iter().map(ToString::to_string).collect(),
            path,
        }),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn render_json_pretty<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(data)?)
}

pub fn render_json_compact<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string(data)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use roguewatch_core::{Sighting, normalize};

    fn events() -> Vec<DetectionEvent> {
        vec![
            DetectionEvent::rogue("Corp", normalize("bb:bb:bb:bb:bb:bb").unwrap(), Sighting::Scan),
            DetectionEvent::similar("C0rp", "Corp", 0.85),
        ]
    }

    #[test]
    fn text_table_lists_every_event() {
        let text = render_events(OutputFormat::Text, &events()).unwrap();
        assert!(text.contains("BB:BB:BB:BB:BB:BB (seen via scan)"));
        assert!(text.contains("looks like 'Corp' (score 0.85)"));
    }

    #[test]
    fn empty_text_is_blank() {
        assert!(render_events(OutputFormat::Text, &[]).unwrap().is_empty());
    }

    #[test]
    fn json_is_tagged_array() {
        let json: serde_json::Value =
            serde_json::from_str(&render_events(OutputFormat::Json, &events()).unwrap()).unwrap();
        assert_eq!(json[0]["kind"], "rogue_bssid");
        assert_eq!(json[0]["source"], "scan");
        assert_eq!(json[1]["kind"], "similar_ssid");
    }

    #[test]
    fn baseline_text_lists_addresses() {
        let baseline = Baseline::new("Corp", [normalize("aa:aa:aa:aa:aa:aa").unwrap()]);
        let text = render_baseline(OutputFormat::Text, &baseline, Path::new("/tmp/baseline")).unwrap();
        assert!(text.contains("Trusted SSID: Corp"));
        assert!(text.contains("  AA:AA:AA:AA:AA:AA"));
    }
}
