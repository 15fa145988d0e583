//! Device monitoring module
//!
//! This module provides the `DeviceMonitor` capability and the reference
//! `UdevilMonitor` implementation that watches the `udevil` CLI for device
//! attach/detach events.
//!
//! # Overview
//!
//! The device monitoring system provides:
//! - **A capability trait** (`DeviceMonitor`) so the manager can orchestrate
//!   any number of independent event sources
//! - **Event notification** over a channel when media is added, removed, or
//!   changed
//! - **Startup reconciliation** so devices attached before a monitor started
//!   are not missed
//! - **Cooperative cancellation** so the manager can stop a generation of
//!   monitors and join them
//!
//! # Architecture
//!
//! - `DeviceMonitor`: capability trait run on a background thread per monitor
//! - `MediaEvent`: events sent to the manager's single ingestion point
//! - `CancelSource` / `CancelToken`: one cancellation signal per manager
//!   start, shared by every monitor of that generation
//! - `UdevilMonitor`: reference implementation that spawns `udevil --monitor`
//!   and parses its line-oriented output
//!
//! # Event Flow
//!
//! ```text
//! UdevilMonitor ─┐
//!                ├─ MediaEvent ─→ MediaManager ingestion ─→ MediaRegistry
//! OtherMonitor ──┘
//! ```
//!
//! Each monitor sends on its own clone of one channel sender, so events from a
//! single monitor arrive in emission order while events from different
//! monitors interleave arbitrarily.
//!
//! # Cancellation Contract
//!
//! `DeviceMonitor::monitor` must return promptly once the token fires. A
//! monitor that ignores the token makes `MediaManager::stop` block
//! indefinitely; this is a correctness requirement on implementations, not a
//! manager-side safeguard.

pub mod cancellation;
pub mod udevil;

use crate::error::Result;
use crate::media::Media;
use crossbeam_channel::Sender;
use std::path::PathBuf;

pub use cancellation::{CancelSource, CancelToken, cancellation};
pub use udevil::UdevilMonitor;

/// Events emitted by device monitors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// A new device became present, with its attributes already populated by
    /// the monitor's info query
    Added(Media),
    /// A previously reported device disappeared, identified by device path
    Removed(PathBuf),
    /// A present device's attributes changed; carries the refreshed media
    Changed(Media),
}

/// A capability that watches one event source and emits add/remove/change
/// notifications for media.
///
/// Monitors are constructed once at process start and reused across manager
/// start/stop cycles: each `monitor` call receives a fresh event sender and a
/// fresh cancellation token, so implementations hold no per-generation state
/// between runs.
pub trait DeviceMonitor: Send + Sync {
    /// Short name used in log messages
    fn name(&self) -> &str;

    /// Watch the event source until the token fires or the source ends.
    ///
    /// On entry the implementation must perform a reconciliation pass,
    /// emitting `MediaEvent::Added` for every device already present, after
    /// its live read loop is registered so no event in between is lost.
    ///
    /// An error return terminates only this monitor's task; the manager keeps
    /// running with the remaining monitors.
    fn monitor(&self, events: Sender<MediaEvent>, cancel: CancelToken) -> Result<()>;
}
