//! Media value type
//!
//! `Media` is the unit the registry stores and the snapshot query returns.
//! It is serializable because the snapshot is the entire surface the excluded
//! presentation layer consumes.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// One attached storage device known to the system.
///
/// Identity is the device path; all other fields are descriptive attributes
/// filled in by the monitor's info query and may be absent when the external
/// tool does not report them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Media {
    /// Device path, e.g. `/dev/sdb1`. Unique identifier.
    pub device_path: PathBuf,
    /// Volume label, if the device reports one
    pub label: Option<String>,
    /// Filesystem type, e.g. `vfat`
    pub fs_type: Option<String>,
    /// Current mount point, if mounted
    pub mount_point: Option<PathBuf>,
    /// Device size in bytes
    pub size_bytes: Option<u64>,
}

impl Media {
    /// Create a media entry with no descriptive attributes yet
    pub fn new(device_path: impl Into<PathBuf>) -> Self {
        Self {
            device_path: device_path.into(),
            label: None,
            fs_type: None,
            mount_point: None,
            size_bytes: None,
        }
    }

    /// The device path this media is identified by
    pub fn device_path(&self) -> &Path {
        &self.device_path
    }
}

// Equality and hashing are by device path only. Two events for the same
// device compare equal even when their attribute snapshots differ.
impl PartialEq for Media {
    fn eq(&self, other: &Self) -> bool {
        self.device_path == other.device_path
    }
}

impl Eq for Media {}

impl Hash for Media {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.device_path.hash(state);
    }
}
