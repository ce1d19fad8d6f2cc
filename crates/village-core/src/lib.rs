//! Village AI Core
//!
//! Goal-driven villager behaviour: world state, goals and actions, the
//! greedy planner, quirks on a tick schedule, and the social model of
//! bonds and shared memories.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod clock;
pub mod components;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod events;
pub mod persistence;
pub mod planning;
pub mod quirks;
pub mod simulation;
pub mod social;
pub mod systems;

pub use clock::{Clock, SimClock, TickSource};
pub use components::*;
pub use config::{AiConfig, ConfigError};
pub use dialogue::{DialogueOutbox, DialogueRequest};
pub use error::{ActionError, QuirkError, RegistryError, VillagerError};
pub use events::{EventLogger, PendingEvents};
pub use persistence::{restore_from_json, snapshot_from_json, snapshot_to_json};
pub use planning::{Goal, PlanOutcome, VillagerPlanner, WorldState};
pub use quirks::{register_builtin_quirks, QuirkDefinition, QuirkRegistry};
pub use simulation::Simulation;
pub use social::{
    BondType, ConflictResolution, GossipNetwork, RelationshipData, SocialBond, SocialMemory,
    SocialRole,
};
pub use systems::{RitualReport, RitualScheduler, VillagerDirectory};

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
