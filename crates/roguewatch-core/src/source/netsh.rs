//! Windows `netsh wlan` scan source.

use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, trace};

use super::ScanSource;
use crate::error::CoreError;
use crate::model::ApObservation;
use crate::parse::parse_connection;

const NETSH: &str = "netsh";
const WARMUP_SETTLE: Duration = Duration::from_secs(2);

/// Queries the OS wireless stack through `netsh`.
///
/// The BSSID listing is served from a cache the OS refreshes lazily; with
/// `warmup` enabled each full scan first asks for the plain network list and
/// waits briefly so the BSSID view is current.
#[derive(Debug, Clone)]
pub struct NetshSource {
    warmup: bool,
    settle: Duration,
}

impl Default for NetshSource {
    fn default() -> Self {
        Self::new(true)
    }
}

impl NetshSource {
    pub fn new(warmup: bool) -> Self {
        Self {
            warmup,
            settle: WARMUP_SETTLE,
        }
    }

    async fn run(args: &[&str]) -> Result<String, CoreError> {
        trace!(?args, "invoking netsh");
        let output = Command::new(NETSH)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| CoreError::Acquisition {
                reason: format!("{NETSH} {}: {e}", args.join(" ")),
            })?;

        if !output.status.success() {
            return Err(CoreError::Acquisition {
                reason: format!("{NETSH} {} exited with {}", args.join(" "), output.status),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn warm_up(&self) {
        if let Err(e) = Self::run(&["wlan", "show", "networks"]).await {
            debug!(error = %e, "scan cache warm-up failed");
        }
        tokio::time::sleep(self.settle).await;
    }
}

impl ScanSource for NetshSource {
    async fn connection(&self) -> Result<Option<ApObservation>, CoreError> {
        let text = Self::run(&["wlan", "show", "interfaces"]).await?;
        Ok(parse_connection(&text))
    }

    async fn full_scan(&self) -> Result<String, CoreError> {
        if self.warmup {
            self.warm_up().await;
        }
        Self::run(&["wlan", "show", "networks", "mode=bssid"]).await
    }
}
