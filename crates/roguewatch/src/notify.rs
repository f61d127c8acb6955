//! Terminal alert notifier.

use std::io::{self, Write};

use chrono::Local;
use owo_colors::OwoColorize;

use roguewatch_core::Notifier;

/// Prints each alert as one timestamped line on stdout.
#[derive(Debug, Clone)]
pub struct TerminalNotifier {
    color: bool,
    quiet: bool,
}

impl TerminalNotifier {
    pub fn new(color: bool, quiet: bool) -> Self {
        Self { color, quiet }
    }

    fn format(&self, title: &str, message: &str) -> String {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        if self.color {
            format!(
                "{} {} {}",
                stamp.dimmed(),
                format!("{title}:").red().bold(),
                message
            )
        } else {
            format!("{stamp} {title}: {message}")
        }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, title: &str, message: &str) {
        if self.quiet {
            return;
        }
        let line = self.format(title, message);
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{line}");
        let _ = stdout.flush();
    }
}
