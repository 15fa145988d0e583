//! Media registry
//!
//! Insertion-ordered collection of currently known media, unique by device
//! path. The registry itself is not synchronized; the manager wraps it in a
//! mutex and serializes all mutation and snapshot reads through it.

use crate::media::Media;
use std::path::Path;

/// The manager's authoritative, deduplicated, insertion-ordered collection of
/// currently known media.
///
/// Invariant: at any observable instant the registry contains exactly the media
/// currently reported present by all active monitors, with no duplicate device
/// paths.
#[derive(Debug, Default)]
pub struct MediaRegistry {
    entries: Vec<Media>,
}

impl MediaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a media entry unless its device path is already present.
    ///
    /// Returns true when the entry was inserted, false on a duplicate path.
    pub fn insert(&mut self, media: Media) -> bool {
        if self.contains(&media.device_path) {
            return false;
        }
        self.entries.push(media);
        true
    }

    /// Remove the entry matching the given device path.
    ///
    /// Returns the removed media, or None if the path was not present.
    pub fn remove(&mut self, device_path: &Path) -> Option<Media> {
        let index = self
            .entries
            .iter()
            .position(|m| m.device_path == device_path)?;
        Some(self.entries.remove(index))
    }

    /// Refresh the attributes of a present entry in place, preserving its
    /// position in insertion order.
    ///
    /// Returns false when no entry matches the media's device path.
    pub fn update(&mut self, media: Media) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|m| m.device_path == media.device_path)
        {
            Some(entry) => {
                *entry = media;
                true
            }
            None => false,
        }
    }

    /// Whether an entry with the given device path is present
    pub fn contains(&self, device_path: &Path) -> bool {
        self.entries.iter().any(|m| m.device_path == device_path)
    }

    /// Independent point-in-time copy of the registry contents, in
    /// first-insertion order
    pub fn snapshot(&self) -> Vec<Media> {
        self.entries.clone()
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of known media
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
