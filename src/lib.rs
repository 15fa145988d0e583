//! `mediawatch` - Removable media tracking for Linux
//!
//! Watches for removable media (USB sticks, SD cards, optical discs) being
//! attached and detached, and maintains a live registry of everything
//! currently present. Uses a multi-threaded event-driven architecture with
//! `DeviceMonitor` implementations streaming events over channels into a
//! `MediaManager` that owns the registry.
//!
//! # Requirements
//!
//! - Linux with the `udevil` command-line tool installed
//!
//! # Architecture
//!
//! Monitors run on background threads and never touch shared state directly;
//! every mutation flows through the manager's single ingestion thread.

// Module declarations
pub mod config;
pub mod error;
pub mod manager;
pub mod media;
pub mod monitor;
pub mod utils;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{MediaWatchError, Result};
