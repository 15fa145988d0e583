//! Media provider manager implementation
//!
//! Runs one thread per registered device monitor, fans their events into one
//! ingestion thread, and keeps the registry consistent under concurrent
//! snapshot reads.

use crate::media::MediaRegistry;
use crate::monitor::{CancelSource, DeviceMonitor, MediaEvent, cancellation};
use crossbeam_channel::{Receiver, bounded};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, error, info, warn};

/// Capacity of the fan-in event channel shared by one generation of monitors
const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Per-generation lifecycle state, guarded by the lifecycle lock so
/// `start`/`stop` calls never race or overlap.
#[derive(Default)]
struct Lifecycle {
    /// Cancellation signal for the current generation; Some while running
    cancel: Option<CancelSource>,
    /// One handle per monitor thread of the current generation
    monitor_handles: Vec<JoinHandle<()>>,
    /// Handle of the ingestion thread serializing registry mutations
    ingest_handle: Option<JoinHandle<()>>,
}

/// Owns the set of device monitors, manages their lifecycle, ingests their
/// events into the media registry, and answers snapshot queries.
pub struct MediaManager {
    /// Monitors are constructed once and reused across start/stop cycles
    monitors: Vec<Arc<dyn DeviceMonitor>>,
    /// Registry of currently known media; its lock covers each mutation and
    /// each snapshot read and is independent of the lifecycle lock
    registry: Arc<Mutex<MediaRegistry>>,
    lifecycle: Mutex<Lifecycle>,
}

impl MediaManager {
    /// Create a manager owning the given monitors, initially stopped
    pub fn new(monitors: Vec<Arc<dyn DeviceMonitor>>) -> Self {
        Self {
            monitors,
            registry: Arc::new(Mutex::new(MediaRegistry::new())),
            lifecycle: Mutex::new(Lifecycle::default()),
        }
    }

    /// Start one generation of monitor threads.
    ///
    /// Idempotent: when already running this logs a warning and has no side
    /// effects. Returns once every thread has been launched; the threads run
    /// until `stop`.
    pub fn start(&self) {
        let mut lifecycle = self.lifecycle.lock();
        if lifecycle.cancel.is_some() {
            warn!("Attempting to start when already started");
            return;
        }

        info!("Starting media manager with {} monitor(s)", self.monitors.len());
        let (source, token) = cancellation();
        let (event_tx, event_rx) = bounded(EVENT_CHANNEL_CAPACITY);

        let registry = Arc::clone(&self.registry);
        let ingest_handle = std::thread::spawn(move || {
            Self::ingest_events(&registry, &event_rx);
        });

        let mut monitor_handles = Vec::with_capacity(self.monitors.len());
        for monitor in &self.monitors {
            let monitor = Arc::clone(monitor);
            let events = event_tx.clone();
            let token = token.clone();
            monitor_handles.push(std::thread::spawn(move || {
                debug!("Monitor {} started", monitor.name());
                if let Err(e) = monitor.monitor(events, token) {
                    // Fatal for this monitor only; no restart is attempted
                    error!("Monitor {} terminated with error: {}", monitor.name(), e);
                } else {
                    debug!("Monitor {} exited", monitor.name());
                }
            }));
        }

        // The ingestion thread exits when the last sender drops, which is
        // when every monitor thread of this generation has returned.
        drop(event_tx);

        lifecycle.cancel = Some(source);
        lifecycle.monitor_handles = monitor_handles;
        lifecycle.ingest_handle = Some(ingest_handle);
    }

    /// Stop the current generation of monitor threads and clear the registry.
    ///
    /// Idempotent: when not running this logs a warning and has no side
    /// effects. Blocks until every monitor thread and the ingestion thread
    /// have exited, so a monitor that ignores its cancellation token blocks
    /// this call indefinitely.
    pub fn stop(&self) {
        let mut lifecycle = self.lifecycle.lock();
        let Some(source) = lifecycle.cancel.take() else {
            warn!("Attempting to stop when not started");
            return;
        };

        info!("Stopping media manager");
        source.cancel();

        for handle in lifecycle.monitor_handles.drain(..) {
            if handle.join().is_err() {
                error!("Monitor thread panicked during shutdown");
            }
        }
        if let Some(ingest) = lifecycle.ingest_handle.take() {
            if ingest.join().is_err() {
                error!("Ingestion thread panicked during shutdown");
            }
        }

        self.registry.lock().clear();
        info!("Media manager stopped");
    }

    /// Whether a generation of monitor threads is currently running
    pub fn is_running(&self) -> bool {
        self.lifecycle.lock().cancel.is_some()
    }

    /// Independent point-in-time copy of the currently known media, in
    /// first-insertion order.
    ///
    /// Safe to call concurrently with event delivery; only the registry lock
    /// is taken, so `start`/`stop` in flight never block this query.
    pub fn all_media(&self) -> Vec<crate::media::Media> {
        self.registry.lock().snapshot()
    }

    /// Drain the event channel, serializing all registry mutations
    fn ingest_events(registry: &Mutex<MediaRegistry>, events: &Receiver<MediaEvent>) {
        debug!("Event ingestion started");
        while let Ok(event) = events.recv() {
            Self::apply_event(registry, event);
        }
        debug!("Event ingestion stopped");
    }

    /// Apply one event to the registry under its lock.
    ///
    /// The lock is held only for the mutation itself, so a concurrent
    /// `all_media` observes either all of an event's effect or none of it.
    fn apply_event(registry: &Mutex<MediaRegistry>, event: MediaEvent) {
        match event {
            MediaEvent::Added(media) => {
                let path = media.device_path.clone();
                if registry.lock().insert(media) {
                    info!("Media added: {}", path.display());
                } else {
                    debug!("Ignoring duplicate add for {}", path.display());
                }
            }
            MediaEvent::Removed(path) => {
                if registry.lock().remove(&path).is_some() {
                    info!("Media removed: {}", path.display());
                } else {
                    debug!("Ignoring remove for unknown device {}", path.display());
                }
            }
            MediaEvent::Changed(media) => {
                let path = media.device_path.clone();
                if registry.lock().update(media) {
                    debug!("Media attributes refreshed: {}", path.display());
                } else {
                    debug!("Ignoring change for unknown device {}", path.display());
                }
            }
        }
    }
}

impl Drop for MediaManager {
    /// Stop the running generation, if any, so monitor threads never outlive
    /// the manager that owns their registry
    fn drop(&mut self) {
        if self.is_running() {
            self.stop();
        }
    }
}
