// ── Scan sources ──
//
// Producers of raw wireless observations. The monitor wraps every call in a
// timeout and treats any error as "no data" for that cycle.

use std::future::Future;

use crate::error::CoreError;
use crate::model::ApObservation;

pub mod netsh;
pub mod replay;

pub use netsh::NetshSource;
pub use replay::ReplaySource;

/// Best-effort access to the host's wireless view.
pub trait ScanSource: Send + Sync + 'static {
    /// The network the host is associated with right now, if any.
    fn connection(&self) -> impl Future<Output = Result<Option<ApObservation>, CoreError>> + Send;

    /// Raw text of a full scan, in the format [`parse_scan`](crate::parse::parse_scan) reads.
    fn full_scan(&self) -> impl Future<Output = Result<String, CoreError>> + Send;
}
