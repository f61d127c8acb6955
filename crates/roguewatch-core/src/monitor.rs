// ── Monitor scheduler ──
//
// Single owner of the baseline. One task runs every detection cycle in
// sequence; front ends steer it through a command queue and observe it
// through status snapshots and an event broadcast. Nothing else ever
// touches the baseline.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::FutureExt;
use serde::Serialize;
use strum::Display;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::MonitorConfig;
use crate::detect::{Detector, learn_baseline};
use crate::error::CoreError;
use crate::model::{Alert, ApObservation, Baseline, DetectionEvent, ScanSnapshot};
use crate::notify::{Notifier, spawn_notifier};
use crate::parse::parse_scan;
use crate::source::ScanSource;
use crate::store::BaselineStore;
use crate::suppress::AlertSuppressor;

const COMMAND_CHANNEL_SIZE: usize = 16;
const EVENT_CHANNEL_SIZE: usize = 256;
const MIN_INTERVAL: Duration = Duration::from_millis(100);

// ── Control surface ──────────────────────────────────────────────────

/// Requests a front end can send to a running monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorCommand {
    /// Begin (or resume) periodic cycles; the first runs immediately.
    Start,
    /// Pause periodic cycles. The monitor stays alive and accepts commands.
    Stop,
    /// Replace the baseline with what is visible right now.
    LearnNow,
    /// Toggle learning mode.
    SetLearning(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum MonitorState {
    Idle,
    Running,
    /// Terminal.
    Stopped,
}

/// Immutable view of the monitor, published after every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorStatus {
    pub state: MonitorState,
    pub learning: bool,
    pub trusted_ssid: Option<String>,
    pub known_bssids: usize,
    pub cycles: u64,
    pub last_cycle_at: Option<DateTime<Utc>>,
    pub last_event_count: usize,
}

/// What one detection cycle produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CycleReport {
    pub events: Vec<DetectionEvent>,
    /// Whether the baseline was modified (and a save attempted).
    pub baseline_changed: bool,
    /// SSID of the live connection, if one was observed.
    pub connected: Option<String>,
    /// Number of SSIDs in the scan.
    pub networks_seen: usize,
    /// The cycle did not run to completion.
    pub aborted: bool,
}

// ── Monitor ──────────────────────────────────────────────────────────

/// Owns the baseline and drives the detector against a [`ScanSource`].
pub struct Monitor<S> {
    source: S,
    store: BaselineStore,
    baseline: Baseline,
    detector: Detector,
    config: MonitorConfig,
    cycles: u64,
    last_cycle_at: Option<DateTime<Utc>>,
    last_event_count: usize,
}

impl<S: ScanSource> Monitor<S> {
    /// Build a monitor, loading the persisted baseline from `store`.
    pub fn new(source: S, store: BaselineStore, config: MonitorConfig) -> Self {
        let baseline = store.load();
        Self {
            source,
            store,
            baseline,
            detector: Detector::new(config.similarity_threshold),
            config,
            cycles: 0,
            last_cycle_at: None,
            last_event_count: 0,
        }
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn store(&self) -> &BaselineStore {
        &self.store
    }

    pub fn status(&self, state: MonitorState) -> MonitorStatus {
        MonitorStatus {
            state,
            learning: self.config.learn,
            trusted_ssid: self.baseline.ssid.clone(),
            known_bssids: self.baseline.bssids.len(),
            cycles: self.cycles,
            last_cycle_at: self.last_cycle_at,
            last_event_count: self.last_event_count,
        }
    }

    /// Run one full cycle: acquire, detect, persist.
    ///
    /// Never fails. Acquisition problems yield an empty observation and a
    /// panic anywhere inside the cycle is logged and reported as an
    /// aborted, event-free cycle.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let report = match AssertUnwindSafe(self.cycle()).catch_unwind().await {
            Ok(report) => report,
            Err(_) => {
                warn!("detection cycle panicked; continuing with next cycle");
                CycleReport {
                    aborted: true,
                    ..CycleReport::default()
                }
            }
        };

        self.cycles += 1;
        self.last_cycle_at = Some(Utc::now());
        self.last_event_count = report.events.len();
        report
    }

    async fn cycle(&mut self) -> CycleReport {
        if !self.baseline.is_configured() && !self.config.learn {
            debug!("no baseline and learning disabled; skipping acquisition");
            return CycleReport::default();
        }

        let (connection, scan) = self.acquire().await;
        let detection = self
            .detector
            .detect(connection.as_ref(), &scan, &self.baseline, self.config.learn);

        if detection.changed {
            self.baseline = detection.baseline;
            self.persist().await;
        }

        debug!(
            connected = ?connection.as_ref().map(|c| &c.ssid),
            networks = scan.len(),
            events = detection.events.len(),
            "cycle complete"
        );
        CycleReport {
            events: detection.events,
            baseline_changed: detection.changed,
            connected: connection.map(|c| c.ssid),
            networks_seen: scan.len(),
            aborted: false,
        }
    }

    /// Replace the baseline with the current view. Returns the new baseline,
    /// or `None` (baseline untouched) when nothing is visible.
    pub async fn learn_now(&mut self) -> Option<Baseline> {
        let (connection, scan) = self.acquire().await;
        let Some(learned) = learn_baseline(connection.as_ref(), &scan) else {
            warn!("nothing visible to learn a baseline from");
            return None;
        };
        info!(
            ssid = ?learned.ssid,
            bssids = learned.bssids.len(),
            "baseline learned"
        );
        self.baseline = learned;
        self.persist().await;
        Some(self.baseline.clone())
    }

    /// One-shot mode: a single cycle, alerts delivered inline.
    pub async fn run_once<N: Notifier>(mut self, notifier: &N) -> CycleReport {
        let report = self.run_cycle().await;
        for event in &report.events {
            let Alert { title, message } = event.alert();
            notifier.notify(&title, &message);
        }
        report
    }

    /// Move the monitor onto its own task.
    ///
    /// With `autostart` the first cycle runs immediately; otherwise the
    /// monitor idles until it receives [`MonitorCommand::Start`].
    pub fn spawn<N: Notifier>(self, notifier: Arc<N>, autostart: bool) -> MonitorHandle {
        let (commands, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
        let initial = if autostart {
            MonitorState::Running
        } else {
            MonitorState::Idle
        };
        let (status_tx, status) = watch::channel(Arc::new(self.status(initial)));
        let (events, _) = broadcast::channel(EVENT_CHANNEL_SIZE);
        let (alerts, notifier_task) = spawn_notifier(notifier);
        let cancel = CancellationToken::new();

        let task = tokio::spawn(monitor_task(MonitorTask {
            monitor: self,
            state: initial,
            commands: command_rx,
            status: status_tx,
            events: events.clone(),
            alerts,
            cancel: cancel.clone(),
        }));

        MonitorHandle {
            commands,
            status,
            events,
            cancel,
            task,
            notifier_task,
        }
    }

    async fn acquire(&self) -> (Option<ApObservation>, ScanSnapshot) {
        let limit = self.config.scan_timeout;
        let (connection, scan) = tokio::join!(
            tokio::time::timeout(limit, self.source.connection()),
            tokio::time::timeout(limit, self.source.full_scan()),
        );

        let connection = flatten_timeout(connection, limit).unwrap_or_else(|e| {
            warn!(error = %e, "connection query failed");
            None
        });
        let scan = flatten_timeout(scan, limit).map_or_else(
            |e| {
                warn!(error = %e, "scan failed");
                ScanSnapshot::new()
            },
            |text| parse_scan(&text),
        );
        (connection, scan)
    }

    /// Write the baseline on the blocking pool. Failures are logged; the
    /// in-memory copy stays authoritative.
    async fn persist(&self) {
        let store = self.store.clone();
        let baseline = self.baseline.clone();
        match tokio::task::spawn_blocking(move || store.save(&baseline)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "failed to save baseline; keeping in-memory copy"),
            Err(e) => warn!(error = %e, "baseline save task failed; keeping in-memory copy"),
        }
    }
}

fn flatten_timeout<T>(
    result: Result<Result<T, CoreError>, tokio::time::error::Elapsed>,
    limit: Duration,
) -> Result<T, CoreError> {
    result.map_err(|_| CoreError::Timeout {
        timeout_secs: limit.as_secs(),
    })?
}

// ── Handle ───────────────────────────────────────────────────────────

/// Front-end side of a spawned monitor.
pub struct MonitorHandle {
    commands: mpsc::Sender<MonitorCommand>,
    status: watch::Receiver<Arc<MonitorStatus>>,
    events: broadcast::Sender<Arc<DetectionEvent>>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
    notifier_task: JoinHandle<()>,
}

impl MonitorHandle {
    pub async fn send(&self, command: MonitorCommand) -> Result<(), CoreError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| CoreError::MonitorStopped)
    }

    /// Latest status snapshot.
    pub fn status(&self) -> Arc<MonitorStatus> {
        Arc::clone(&self.status.borrow())
    }

    pub fn subscribe_status(&self) -> watch::Receiver<Arc<MonitorStatus>> {
        self.status.clone()
    }

    /// Every event of every cycle, unsuppressed.
    pub fn events(&self) -> broadcast::Receiver<Arc<DetectionEvent>> {
        self.events.subscribe()
    }

    /// Cancel the monitor and wait for it, and any pending alerts, to finish.
    /// A cycle already in flight completes first.
    pub async fn shutdown(self) -> Result<Arc<MonitorStatus>, CoreError> {
        self.cancel.cancel();
        self.task
            .await
            .map_err(|e| CoreError::Internal(format!("monitor task failed: {e}")))?;
        self.notifier_task
            .await
            .map_err(|e| CoreError::Internal(format!("notifier task failed: {e}")))?;
        Ok(Arc::clone(&self.status.borrow()))
    }
}

// ── Background task ──────────────────────────────────────────────────

struct MonitorTask<S> {
    monitor: Monitor<S>,
    state: MonitorState,
    commands: mpsc::Receiver<MonitorCommand>,
    status: watch::Sender<Arc<MonitorStatus>>,
    events: broadcast::Sender<Arc<DetectionEvent>>,
    alerts: mpsc::UnboundedSender<Alert>,
    cancel: CancellationToken,
}

impl<S: ScanSource> MonitorTask<S> {
    fn publish(&self) {
        self.status.send_replace(Arc::new(self.monitor.status(self.state)));
    }

    fn forward(&self, events: &[DetectionEvent], suppressor: &mut AlertSuppressor) {
        let now = Instant::now();
        for event in events {
            // No subscribers is fine.
            let _ = self.events.send(Arc::new(event.clone()));
            if suppressor.admit(event, now) {
                let _ = self.alerts.send(event.alert());
            } else {
                debug!(identity = %event.identity(), "alert suppressed");
            }
        }
    }

    async fn handle(&mut self, command: MonitorCommand, interval: &mut tokio::time::Interval) {
        debug!(?command, state = %self.state, "monitor command");
        match command {
            MonitorCommand::Start => {
                if self.state != MonitorState::Running {
                    info!("monitoring started");
                    self.state = MonitorState::Running;
                    interval.reset_immediately();
                }
            }
            MonitorCommand::Stop => {
                if self.state == MonitorState::Running {
                    info!("monitoring paused");
                    self.state = MonitorState::Idle;
                }
            }
            MonitorCommand::LearnNow => {
                self.monitor.learn_now().await;
            }
            MonitorCommand::SetLearning(on) => {
                info!(learning = on, "learning mode changed");
                self.monitor.config.learn = on;
            }
        }
    }
}

async fn monitor_task<S: ScanSource>(mut task: MonitorTask<S>) {
    let period = task.monitor.config.interval.max(MIN_INTERVAL);
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut suppressor = AlertSuppressor::new(task.monitor.config.alert_cooldown);

    info!(
        interval_secs = period.as_secs(),
        similarity_threshold = task.monitor.detector.similarity_threshold(),
        state = %task.state,
        trusted_ssid = ?task.monitor.baseline.ssid,
        "monitor task started"
    );

    loop {
        tokio::select! {
            biased;
            () = task.cancel.cancelled() => break,
            command = task.commands.recv() => {
                // Every handle is gone.
                let Some(command) = command else { break };
                task.handle(command, &mut interval).await;
                task.publish();
            }
            _ = interval.tick(), if task.state == MonitorState::Running => {
                let report = task.monitor.run_cycle().await;
                task.forward(&report.events, &mut suppressor);
                task.publish();
            }
        }
    }

    task.state = MonitorState::Stopped;
    task.publish();
    info!(cycles = task.monitor.cycles, "monitor task stopped");
}
