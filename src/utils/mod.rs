//! Utility modules
//!
//! Provides the logging bootstrap for the hosting binary.

pub mod logging;

pub use logging::init_logging;
