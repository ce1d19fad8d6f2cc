//! ECS Systems
//!
//! Per-tick work, chained in order: index rebuild, quirk rituals, decision
//! cycles, social interactions and daily decay.

pub mod decision;
pub mod perception;
pub mod ritual;
pub mod social;

pub use decision::{outcome_event, run_decision_cycles, DecisionTracker};
pub use perception::{build_village_index, VillageIndex};
pub use ritual::{
    run_quirk_checks, QueryDirectory, QuirkOutcome, RitualReport, RitualScheduler, ScheduledTask,
    VillagerDirectory,
};
pub use social::{apply_social_interactions, decay_villager, run_daily_decay, DecayTracker};
