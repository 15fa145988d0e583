//! Configuration data models
//!
//! This module defines the data structures used for application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Settings for the udevil-based device monitor
    pub udevil: UdevilConfig,
    /// User preferences
    pub preferences: UserPreferences,
}

/// Settings for the udevil-based device monitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UdevilConfig {
    /// Program invoked for monitoring and info queries
    pub program: String,
    /// Directory reported device paths are re-rooted under
    pub device_dir: PathBuf,
    /// Partitions table read during the reconciliation pass
    pub partitions_path: PathBuf,
}

/// User preferences and settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Interval between media snapshot prints in the hosting binary,
    /// in milliseconds
    pub snapshot_interval_ms: u64,
}

impl Default for UdevilConfig {
    fn default() -> Self {
        Self {
            program: "udevil".to_string(),
            device_dir: PathBuf::from("/dev"),
            partitions_path: PathBuf::from("/proc/partitions"),
        }
    }
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            snapshot_interval_ms: 2000,
        }
    }
}
