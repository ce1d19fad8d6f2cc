//! Quirks
//!
//! Optional per-villager behaviours, evaluated on the ritual schedule.

pub mod catalog;
pub mod definition;
pub mod registry;

pub use catalog::{builtin_quirks, register_builtin_quirks};
pub use definition::{QuirkAction, QuirkDefinition, QuirkPrecondition, QuirkWeight};
pub use registry::QuirkRegistry;
