//! Event logging for the behaviour core.

pub mod logger;

pub use logger::{EventLogger, PendingEvents};
