// ── Baseline persistence ──
//
// Plain text, one record per installation:
//
//   <trusted SSID or empty line>
//   <BSSID>
//   <BSSID>
//
// Reading never fails from the caller's point of view: a missing, unreadable
// or corrupt file is an unconfigured baseline.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{Baseline, normalize};

/// File-backed home of the trusted baseline.
#[derive(Debug, Clone)]
pub struct BaselineStore {
    path: PathBuf,
}

impl BaselineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the baseline, degrading to "unconfigured" on any failure.
    pub fn load(&self) -> Baseline {
        match self.try_load() {
            Ok(baseline) => baseline,
            Err(e) => {
                warn!(error = %e, "baseline unreadable; starting unconfigured");
                Baseline::default()
            }
        }
    }

    /// Load the baseline, reporting I/O failures. A missing file is not an
    /// error.
    pub fn try_load(&self) -> Result<Baseline, CoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => {
                let baseline = decode(&text);
                debug!(
                    path = %self.path.display(),
                    ssid = ?baseline.ssid,
                    bssids = baseline.bssids.len(),
                    "loaded baseline"
                );
                Ok(baseline)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Baseline::default()),
            Err(source) => Err(CoreError::BaselineIo {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Write the baseline, creating parent directories as needed.
    pub fn save(&self, baseline: &Baseline) -> Result<(), CoreError> {
        let io_err = |source| CoreError::BaselineIo {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(&self.path, encode(baseline)).map_err(io_err)?;
        debug!(path = %self.path.display(), "saved baseline");
        Ok(())
    }
}

/// Decode the on-disk text form. Unparsable address lines are skipped.
pub fn decode(text: &str) -> Baseline {
    let mut lines = text.lines();
    let ssid = lines
        .next()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(str::to_owned);

    let bssids = lines
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(normalize)
        .collect();

    Baseline { ssid, bssids }
}

/// Encode to the on-disk text form, addresses sorted ascending.
pub fn encode(baseline: &Baseline) -> String {
    let mut out = String::new();
    out.push_str(baseline.ssid.as_deref().unwrap_or_default());
    out.push('\n');
    for bssid in &baseline.bssids {
        out.push_str(&bssid.to_string());
        out.push('\n');
    }
    out
}
