//! `mediawatch` - Removable media tracking for Linux
//!
//! This binary hosts the media manager, wires up the udevil-based device
//! monitor, and prints the set of present media at a configurable interval
//! until interrupted.

use anyhow::{Context, Result};
use mediawatch::{
    config::ConfigManager,
    manager::MediaManager,
    monitor::{DeviceMonitor, udevil::UdevilMonitor},
    utils,
};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::flag;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::info;

/// Main entry point for the application
///
/// Performs initialization including logging, configuration loading, monitor
/// registration, and signal handling, then runs the snapshot loop until a
/// termination signal arrives.
fn main() -> Result<()> {
    utils::init_logging().context("Failed to initialize logging system")?;

    info!("mediawatch v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = ConfigManager::load().context("Failed to load application configuration")?;
    info!(
        "Configuration loaded, monitoring via '{}'",
        config.udevil.program
    );

    let monitor = Arc::new(UdevilMonitor::new(&config.udevil));
    let manager = MediaManager::new(vec![monitor as Arc<dyn DeviceMonitor>]);

    let shutdown = Arc::new(AtomicBool::new(false));
    flag::register(SIGINT, Arc::clone(&shutdown))
        .context("Failed to register SIGINT handler")?;
    flag::register(SIGTERM, Arc::clone(&shutdown))
        .context("Failed to register SIGTERM handler")?;

    info!("Starting media manager");
    manager.start();

    let interval = Duration::from_millis(config.preferences.snapshot_interval_ms);
    while !shutdown.load(Ordering::Relaxed) {
        std::thread::sleep(interval);

        let media = manager.all_media();
        if media.is_empty() {
            println!("No removable media present");
        } else {
            println!("Present media ({}):", media.len());
            for item in &media {
                println!(
                    "  {} label={} fs={} mount={}",
                    item.device_path().display(),
                    item.label.as_deref().unwrap_or("-"),
                    item.fs_type.as_deref().unwrap_or("-"),
                    item.mount_point
                        .as_deref()
                        .map_or_else(|| "-".to_string(), |p| p.display().to_string()),
                );
            }
        }
    }

    info!("Termination signal received, stopping media manager");
    manager.stop();

    info!("mediawatch shutting down");

    Ok(())
}
