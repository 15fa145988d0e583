//! Media data model
//!
//! This module defines the `Media` value type describing one attached storage
//! device and the `MediaRegistry`, the manager's authoritative collection of
//! currently known media.
//!
//! # Identity
//!
//! A `Media` is identified by its device path (for example `/dev/sdb1`).
//! Equality, hashing, and registry deduplication all use the device path only;
//! the descriptive attributes (label, filesystem type, mount point, size) are
//! populated by an out-of-band info query after detection and do not take part
//! in identity.

pub mod models;
pub mod registry;

pub use models::Media;
pub use registry::MediaRegistry;
