//! Snapshot Types
//!
//! Plain-data images of villager state for an external serializer.
//!
//! Every field carries a serde default so that a partially written or older
//! snapshot still decodes into something the core can restore from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Generates a snapshot ID with the given sequence number.
pub fn generate_snapshot_id(sequence: u64) -> String {
    format!("snap_{:06}", sequence)
}

/// Whole-village snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VillageSnapshot {
    pub snapshot_id: String,
    pub tick: u64,
    #[serde(default)]
    pub villagers: Vec<VillagerSnapshot>,
}

/// A single villager with its brain and opaque persistent data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VillagerSnapshot {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub profession: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub spouse: Option<Uuid>,
    #[serde(default)]
    pub brain: BrainSnapshot,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// Brain state: personality, mood, emotions, relationships
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrainSnapshot {
    pub personality: PersonalitySnapshot,
    pub mood: MoodSnapshot,
    pub emotions: BTreeMap<String, f32>,
    pub relationships: RelationshipSnapshot,
    pub daily: DailySnapshot,
}

/// Personality type name plus trait influences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalitySnapshot {
    pub kind: String,
    pub traits: BTreeMap<String, f32>,
}

/// Mood scalars, each in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodSnapshot {
    pub happiness: f32,
    pub energy: f32,
    pub social: f32,
}

impl Default for MoodSnapshot {
    fn default() -> Self {
        Self {
            happiness: 0.5,
            energy: 0.5,
            social: 0.5,
        }
    }
}

/// Per-day activity flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailySnapshot {
    pub day: u64,
    pub has_worked_today: bool,
    pub has_socialized_today: bool,
}

/// Social record of one villager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipSnapshot {
    pub trust: f32,
    pub friendship: f32,
    pub interaction_count: u32,
    pub bonds: Vec<BondSnapshot>,
    pub experiences: Vec<MemorySnapshot>,
    pub social_traits: BTreeMap<String, f32>,
    pub role: String,
    pub influence: u32,
    pub reputation: f32,
    pub emotional_investment: f32,
    pub conflict_tolerance: f32,
    pub loyalty_strength: f32,
    pub socially_active: bool,
}

impl Default for RelationshipSnapshot {
    fn default() -> Self {
        Self {
            trust: 0.0,
            friendship: 0.0,
            interaction_count: 0,
            bonds: Vec::new(),
            experiences: Vec::new(),
            social_traits: BTreeMap::new(),
            role: String::new(),
            influence: 0,
            reputation: 0.0,
            emotional_investment: 0.0,
            conflict_tolerance: 0.5,
            loyalty_strength: 0.5,
            socially_active: true,
        }
    }
}

/// A bond towards another villager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondSnapshot {
    pub other_id: Uuid,
    #[serde(default)]
    pub other_name: String,
    #[serde(default)]
    pub bond_type: String,
    #[serde(default)]
    pub strength: f32,
    #[serde(default)]
    pub formed_at: u64,
    #[serde(default)]
    pub last_interaction: u64,
    #[serde(default)]
    pub formation_context: String,
    #[serde(default)]
    pub shared_experience_count: u32,
    #[serde(default)]
    pub emotional_investment: f32,
}

/// A remembered shared experience
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub experience_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub participants: Vec<Uuid>,
    #[serde(default)]
    pub emotional_impact: f32,
    #[serde(default = "default_significance")]
    pub significance: u8,
    #[serde(default)]
    pub ongoing: bool,
}

fn default_significance() -> u8 {
    1
}

impl VillageSnapshot {
    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
