// ── Notifier collaborator ──
//
// Alert delivery is fire-and-forget. The scheduler pushes rendered alerts
// into an unbounded channel; a separate task drains it and runs each
// delivery on the blocking pool, so a slow or panicking notifier never
// stalls detection.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::model::Alert;

/// Receives rendered alerts. Implementations may block (desktop toasts,
/// terminal bells); they run off the async workers.
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, title: &str, message: &str);
}

/// Writes every alert to the log at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, title: &str, message: &str) {
        warn!(target: "roguewatch::alert", title, "{message}");
    }
}

/// Start the delivery task. Alerts are delivered one at a time, in order.
/// The task exits once every sender is dropped.
pub fn spawn_notifier<N: Notifier>(notifier: Arc<N>) -> (mpsc::UnboundedSender<Alert>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<Alert>();
    let task = tokio::spawn(async move {
        while let Some(alert) = rx.recv().await {
            let notifier = Arc::clone(&notifier);
            let title = alert.title.clone();
            let delivery =
                tokio::task::spawn_blocking(move || notifier.notify(&alert.title, &alert.message));
            if let Err(e) = delivery.await {
                warn!(%title, error = %e, "alert delivery failed");
            }
        }
        debug!("notifier channel closed");
    });
    (tx, task)
}
