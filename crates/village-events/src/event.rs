//! Event Types
//!
//! Records of what villagers did during a tick, written as JSONL by the
//! simulation binary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Primary event categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Planning,
    Quirk,
    Social,
    Dialogue,
}

/// What happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    /// A goal was chosen and an action executed for it
    GoalPursued {
        goal: String,
        action: String,
        succeeded: bool,
    },
    /// A goal was chosen but no action could serve it
    GoalStalled { goal: String },
    /// A quirk action ran to completion
    QuirkApplied { quirk: String },
    /// A quirk action reported a failure
    QuirkFailed { quirk: String, reason: String },
    /// A bond between two villagers changed
    BondChanged {
        other_id: Uuid,
        other_name: String,
        bond_type: String,
        strength: f32,
    },
    /// A piece of gossip was passed on to a listener
    GossipShared {
        listener_id: Uuid,
        about_id: Uuid,
        content: String,
        reliability: f32,
    },
    /// A dialogue line was requested from the external generator
    DialogueRequested { partner: Option<Uuid>, topic: String },
}

impl EventKind {
    /// Returns the category this kind belongs to.
    pub fn category(&self) -> EventCategory {
        match self {
            EventKind::GoalPursued { .. } | EventKind::GoalStalled { .. } => {
                EventCategory::Planning
            }
            EventKind::QuirkApplied { .. } | EventKind::QuirkFailed { .. } => EventCategory::Quirk,
            EventKind::BondChanged { .. } | EventKind::GossipShared { .. } => {
                EventCategory::Social
            }
            EventKind::DialogueRequested { .. } => EventCategory::Dialogue,
        }
    }
}

/// A single village event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VillageEvent {
    pub event_id: String,
    pub tick: u64,
    pub villager_id: Uuid,
    pub villager_name: String,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl VillageEvent {
    /// Creates an event; the id is assigned by the logger.
    pub fn new(tick: u64, villager_id: Uuid, villager_name: impl Into<String>, kind: EventKind) -> Self {
        Self {
            event_id: String::new(),
            tick,
            villager_id,
            villager_name: villager_name.into(),
            kind,
        }
    }

    /// Serializes the event as a single JSON line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes an event from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Generates an event ID with the given sequence number.
pub fn generate_event_id(sequence: u64) -> String {
    format!("evt_{:08}", sequence)
}
