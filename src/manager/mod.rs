//! Media provider manager module
//!
//! This module coordinates the set of device monitors and maintains the
//! registry of currently known media, implementing the core orchestration
//! logic.
//!
//! # Overview
//!
//! The manager is the central coordinator that:
//! - **Owns the monitors** and runs one background thread per monitor while
//!   started
//! - **Ingests media events** from all monitors through one channel
//! - **Maintains the registry** of currently known media, deduplicated by
//!   device path
//! - **Answers snapshot queries** safely while events keep arriving
//!
//! # Architecture
//!
//! - `MediaManager`: lifecycle control plus the event ingestion thread
//! - **Event-driven design**: monitors push `MediaEvent`s, a single ingestion
//!   thread serializes every registry mutation
//! - **Two locks**: the lifecycle lock serializes `start`/`stop`; the registry
//!   lock covers each mutation and each snapshot read. Neither is held across
//!   a blocking receive.
//!
//! # Event Flow
//!
//! ```text
//! DeviceMonitor threads → MediaEvent channel → ingestion thread → MediaRegistry
//!                                                                      ↓
//!                                                  all_media() → snapshot Vec
//! ```
//!
//! # Lifecycle
//!
//! `Stopped → Running → Stopped`. Exactly one generation of monitor threads
//! exists while running, all sharing one cancellation signal created by that
//! `start` call. `stop` cancels the signal, joins every thread, and clears the
//! registry. Both operations are idempotent and log a warning on misuse.

pub mod media_manager;

pub use media_manager::MediaManager;
