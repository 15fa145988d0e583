#![expect(
    clippy::unwrap_used,
    reason = "Test utilities use .unwrap() for brevity"
)]

//! Shared test utilities for `mediawatch` unit tests.
//!
//! This module provides common test infrastructure used across multiple test
//! modules. It is only compiled during testing (`#[cfg(test)]`).

use std::sync::{Mutex, PoisonError};
use tempfile::TempDir;

/// Global mutex to serialize tests that modify the `XDG_CONFIG_HOME`
/// environment variable. This prevents race conditions when multiple tests
/// run in parallel and try to set different config home values.
static CONFIG_HOME_LOCK: Mutex<()> = Mutex::new(());

/// RAII guard that points `XDG_CONFIG_HOME` at a fresh temporary directory
/// for a test scope and restores the original value when dropped.
///
/// # Safety Considerations
///
/// This guard uses `std::env::set_var` and `std::env::remove_var`, which are
/// unsafe because they can race with other threads reading the environment.
///
/// **Safety Invariants:**
/// 1. Each guard gets its own unique `TempDir`, so serialized tests write to
///    different paths
/// 2. The guard is RAII-based and restores the original value on drop,
///    preventing environment pollution between tests
/// 3. The `CONFIG_HOME_LOCK` mutex ensures tests modify the variable
///    serially, not concurrently; the lock is held for the guard's lifetime
/// 4. A poisoned lock is recovered rather than propagated, since a previous
///    test's panic leaves the environment in a state the next guard resets
///    anyway
pub struct ConfigHomeGuard {
    original: Option<String>,
    // Keeps the temporary config home alive for the guard's lifetime
    _dir: TempDir,
    // Held for the guard's lifetime to serialize environment mutation
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables with documented safety invariants"
)]
impl ConfigHomeGuard {
    /// Point `XDG_CONFIG_HOME` at a fresh temporary directory
    pub fn new() -> Self {
        let lock = CONFIG_HOME_LOCK
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let dir = tempfile::tempdir().unwrap();
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", dir.path());
        }
        Self {
            original,
            _dir: dir,
            _lock: lock,
        }
    }
}

impl Default for ConfigHomeGuard {
    fn default() -> Self {
        Self::new()
    }
}

#[expect(
    unsafe_code,
    reason = "Restores the environment variable modified in new() under the same lock"
)]
impl Drop for ConfigHomeGuard {
    fn drop(&mut self) {
        unsafe {
            match self.original.take() {
                Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }
    }
}
