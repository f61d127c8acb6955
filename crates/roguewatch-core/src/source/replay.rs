//! File-backed scan source for captured dumps.

use std::path::{Path, PathBuf};

use super::ScanSource;
use crate::error::CoreError;
use crate::model::ApObservation;
use crate::parse::parse_connection;

/// Replays previously captured `netsh` output from disk.
///
/// Files are re-read every cycle, so editing them while the monitor runs
/// changes what the next cycle sees. A missing path means "no data" for
/// that half of the observation.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    interfaces: Option<PathBuf>,
    scan: Option<PathBuf>,
}

impl ReplaySource {
    pub fn new(interfaces: Option<PathBuf>, scan: Option<PathBuf>) -> Self {
        Self { interfaces, scan }
    }

    async fn read(path: &Path) -> Result<String, CoreError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| CoreError::Acquisition {
                reason: format!("{}: {e}", path.display()),
            })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl ScanSource for ReplaySource {
    async fn connection(&self) -> Result<Option<ApObservation>, CoreError> {
        match &self.interfaces {
            Some(path) => Ok(parse_connection(&Self::read(path).await?)),
            None => Ok(None),
        }
    }

    async fn full_scan(&self) -> Result<String, CoreError> {
        match &self.scan {
            Some(path) => Self::read(path).await,
            None => Ok(String::new()),
        }
    }
}
