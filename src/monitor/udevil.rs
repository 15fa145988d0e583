//! udevil-based device monitor
//!
//! Watches a long-running `udevil --monitor` process for device events. The
//! process prints one event per line on stdout:
//!
//! ```text
//! added: /org/freedesktop/UDisks/devices/sdb1
//! removed: /org/freedesktop/UDisks/devices/sdb1
//! changed: /org/freedesktop/UDisks/devices/sdb1
//! ```
//!
//! The whitespace-delimited field at index 1 is the device path; its last path
//! segment is re-rooted under the host's device directory (`/dev/sdb1`). On
//! `added`, a synchronous `udevil --show-info <path>` invocation populates the
//! media's descriptive attributes before the event fires; a non-zero exit from
//! that query drops the add and logs the failure.
//!
//! Before blocking on live events the monitor performs a reconciliation pass
//! over the kernel partitions table so devices attached before it started are
//! not missed. The read loop is registered first, so events arriving during
//! reconciliation are not lost (the manager deduplicates by device path).

use crate::config::UdevilConfig;
use crate::error::{MediaWatchError, Result};
use crate::media::Media;
use crate::monitor::{CancelToken, DeviceMonitor, MediaEvent};
use crossbeam_channel::Sender;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, error, info, warn};

/// Device monitor backed by the `udevil` CLI
pub struct UdevilMonitor {
    /// Program to invoke, normally `udevil`
    program: String,
    /// Directory device paths are re-rooted under, normally `/dev`
    device_dir: PathBuf,
    /// Kernel partitions table read during reconciliation,
    /// normally `/proc/partitions`
    partitions_path: PathBuf,
}

/// Verb prefix of one monitor output line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MonitorVerb {
    Added,
    Removed,
    Changed,
}

impl UdevilMonitor {
    /// Create a monitor from configuration
    pub fn new(config: &UdevilConfig) -> Self {
        Self {
            program: config.program.clone(),
            device_dir: config.device_dir.clone(),
            partitions_path: config.partitions_path.clone(),
        }
    }

    /// Enumerate devices already present and emit `Added` for each.
    ///
    /// A failure to read the partitions table fails the whole pass; an info
    /// query failure for one device only skips that device.
    fn reconcile(&self, events: &Sender<MediaEvent>) -> Result<()> {
        let contents = std::fs::read_to_string(&self.partitions_path)?;
        let names = parse_partitions(&contents);
        info!(
            "Reconciling {} devices already present in {}",
            names.len(),
            self.partitions_path.display()
        );

        for name in names {
            let device_path = self.device_dir.join(&name);
            match query_media(&self.program, &device_path) {
                Ok(media) => {
                    debug!("Reconciled device: {}", device_path.display());
                    if events.send(MediaEvent::Added(media)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    error!(
                        "Skipping device {} during reconciliation: {}",
                        device_path.display(),
                        e
                    );
                }
            }
        }

        Ok(())
    }
}

impl DeviceMonitor for UdevilMonitor {
    fn name(&self) -> &str {
        "udevil"
    }

    fn monitor(&self, events: Sender<MediaEvent>, cancel: CancelToken) -> Result<()> {
        let mut child = Command::new(&self.program)
            .arg("--monitor")
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| MediaWatchError::MonitorLaunchFailed(Box::new(e)))?;

        let stdout = child.stdout.take().ok_or_else(|| {
            MediaWatchError::MonitorLaunchFailed(crate::error::StringError::new(
                "Monitor process has no stdout pipe",
            ))
        })?;

        // Register the read loop before reconciling so events that arrive
        // while the reconciliation pass runs are not lost.
        let reader_events = events.clone();
        let program = self.program.clone();
        let device_dir = self.device_dir.clone();
        let reader = thread::spawn(move || {
            read_monitor_output(stdout, &program, &device_dir, &reader_events);
        });

        if let Err(e) = self.reconcile(&events) {
            let _ = child.kill();
            let _ = child.wait();
            let _ = reader.join();
            return Err(e);
        }

        // Only the reader thread's clone may keep the manager's ingestion
        // alive from here on.
        drop(events);

        cancel.wait();
        info!("udevil monitor cancelled, terminating monitor process");

        let _ = child.kill();
        let _ = child.wait();
        let _ = reader.join();

        Ok(())
    }
}

/// Consume monitor stdout line by line until EOF, dispatching events
fn read_monitor_output(
    stdout: std::process::ChildStdout,
    program: &str,
    device_dir: &Path,
    events: &Sender<MediaEvent>,
) {
    let reader = BufReader::new(stdout);
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Error reading monitor output: {}", e);
                break;
            }
        };

        let Some((verb, raw_path)) = parse_monitor_line(&line) else {
            continue;
        };
        let device_path = rebase_device_path(device_dir, raw_path);

        match verb {
            MonitorVerb::Added => match query_media(program, &device_path) {
                Ok(media) => {
                    info!("Device added: {}", device_path.display());
                    if events.send(MediaEvent::Added(media)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    // Fatal for this add operation only; the device is
                    // omitted rather than added with partial data.
                    error!("Dropping add for {}: {}", device_path.display(), e);
                }
            },
            MonitorVerb::Removed => {
                info!("Device removed: {}", device_path.display());
                if events.send(MediaEvent::Removed(device_path)).is_err() {
                    break;
                }
            }
            MonitorVerb::Changed => {
                // Change semantics are a pending product decision; the line is
                // parsed so the grammar stays exercised, but no event fires.
                debug!("Ignoring change notification for {}", device_path.display());
            }
        }
    }
    debug!("Monitor output stream ended");
}

/// Parse one monitor output line into a verb and the raw device path field.
///
/// The line is split on whitespace; the first token selects the verb and the
/// token at index 1 is the device path. Lines with an unknown verb or a
/// missing path field yield None.
fn parse_monitor_line(line: &str) -> Option<(MonitorVerb, &str)> {
    let mut fields = line.split_whitespace();
    let verb = match fields.next()? {
        "added:" => MonitorVerb::Added,
        "removed:" => MonitorVerb::Removed,
        "changed:" => MonitorVerb::Changed,
        _ => return None,
    };
    let raw_path = fields.next()?;
    Some((verb, raw_path))
}

/// Re-root a reported device path under the host device directory.
///
/// udevil reports UDisks object paths like
/// `/org/freedesktop/UDisks/devices/sdb1`; only the last path segment names
/// the device.
fn rebase_device_path(device_dir: &Path, raw_path: &str) -> PathBuf {
    let name = raw_path.rsplit('/').next().unwrap_or(raw_path);
    device_dir.join(name)
}

/// Parse the kernel partitions table into device names.
///
/// The first two lines are a fixed header; each subsequent line's fourth
/// whitespace-delimited column is the device name. Malformed lines are
/// skipped.
fn parse_partitions(contents: &str) -> Vec<String> {
    contents
        .lines()
        .skip(2)
        .filter_map(|line| line.split_whitespace().nth(3))
        .map(ToString::to_string)
        .collect()
}

/// Run the synchronous info query and build a populated `Media`.
///
/// A spawn failure or non-zero exit status is fatal for the add operation
/// this query serves.
fn query_media(program: &str, device_path: &Path) -> Result<Media> {
    let output = Command::new(program)
        .arg("--show-info")
        .arg(device_path)
        .stderr(Stdio::null())
        .output()
        .map_err(|e| MediaWatchError::InfoQueryFailed {
            device: device_path.to_path_buf(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(MediaWatchError::InfoQueryFailed {
            device: device_path.to_path_buf(),
            reason: output.status.to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_show_info(device_path, &stdout))
}

/// Parse `udevil --show-info` output into a media entry.
///
/// The output is `key: value` lines with indented sub-sections for the device
/// file, partition, and drive details. Only the top-level keys carrying the
/// attributes the registry tracks are consumed; indented detail lines and
/// unknown keys are ignored.
fn parse_show_info(device_path: &Path, output: &str) -> Media {
    let mut media = Media::new(device_path);

    for line in output.lines() {
        // Indented lines belong to a sub-section (partition, drive, ...)
        if line.starts_with(' ') || line.starts_with('\t') {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match key {
            "label" => media.label = Some(value.to_string()),
            "type" => media.fs_type = Some(value.to_string()),
            "size" => media.size_bytes = value.parse().ok(),
            // Multiple mount paths are space separated; the first one is the
            // mount point the snapshot reports.
            "mount paths" => {
                media.mount_point = value.split_whitespace().next().map(PathBuf::from);
            }
            _ => {}
        }
    }

    media
}
