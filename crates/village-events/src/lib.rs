//! Shared data types for the village simulation.
//!
//! This crate contains pure data structures with no behaviour logic:
//! persistence snapshots, simulation time and the per-tick event records.
//! It is a dependency for all other crates in the workspace.

pub mod event;
pub mod snapshot;
pub mod timestamp;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

// Re-export timestamp types
pub use timestamp::{day_of, days_between, ParseTimeOfDayError, TimeOfDay, TICKS_PER_DAY};

// Re-export event types
pub use event::*;

// Re-export snapshot types
pub use snapshot::{
    generate_snapshot_id, BondSnapshot, BrainSnapshot, DailySnapshot, MemorySnapshot, MoodSnapshot,
    PersonalitySnapshot, RelationshipSnapshot, VillagerSnapshot, VillageSnapshot,
};
