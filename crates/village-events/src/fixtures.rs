//! Sample data fixtures for testing.
//!
//! Enable the `test-fixtures` feature to access these helpers from other crates.

use std::collections::BTreeMap;
use uuid::Uuid;

use crate::{
    BondSnapshot, BrainSnapshot, DailySnapshot, MemorySnapshot, MoodSnapshot,
    PersonalitySnapshot, RelationshipSnapshot, VillagerSnapshot,
};

/// Stable id of the fixture villager.
pub const SAMPLE_VILLAGER_ID: Uuid = Uuid::from_u128(0x5eed_0000_0000_0000_0000_0000_0000_0001);

/// Stable id of the fixture villager's friend.
pub const SAMPLE_FRIEND_ID: Uuid = Uuid::from_u128(0x5eed_0000_0000_0000_0000_0000_0000_0002);

/// Returns a fully populated villager snapshot with one bond and one memory.
pub fn sample_villager_snapshot() -> VillagerSnapshot {
    let mut traits = BTreeMap::new();
    traits.insert("curiosity".to_string(), 0.8);
    traits.insert("sociability".to_string(), 0.6);

    let mut emotions = BTreeMap::new();
    emotions.insert("happiness".to_string(), 55.0);
    emotions.insert("loneliness".to_string(), 35.0);
    emotions.insert("curiosity".to_string(), 60.0);

    let mut social_traits = BTreeMap::new();
    social_traits.insert("charisma".to_string(), 0.7);
    social_traits.insert("empathy".to_string(), 0.6);
    social_traits.insert("assertiveness".to_string(), 0.4);
    social_traits.insert("cooperation".to_string(), 0.5);
    social_traits.insert("social_anxiety".to_string(), 0.2);

    let mut data = serde_json::Map::new();
    data.insert("home".to_string(), serde_json::json!({ "x": 12, "z": -4 }));

    VillagerSnapshot {
        id: SAMPLE_VILLAGER_ID,
        name: "Ada Thistle".to_string(),
        profession: "librarian".to_string(),
        age: 140,
        spouse: None,
        brain: BrainSnapshot {
            personality: PersonalitySnapshot {
                kind: "curious".to_string(),
                traits,
            },
            mood: MoodSnapshot {
                happiness: 0.6,
                energy: 0.4,
                social: 0.7,
            },
            emotions,
            relationships: RelationshipSnapshot {
                trust: 0.3,
                friendship: 0.4,
                interaction_count: 9,
                bonds: vec![BondSnapshot {
                    other_id: SAMPLE_FRIEND_ID,
                    other_name: "Bram Oakes".to_string(),
                    bond_type: "friend".to_string(),
                    strength: 0.55,
                    formed_at: 1_000,
                    last_interaction: 48_000,
                    formation_context: "market day".to_string(),
                    shared_experience_count: 4,
                    emotional_investment: 0.3,
                }],
                experiences: vec![MemorySnapshot {
                    experience_type: "festival".to_string(),
                    description: "Danced at the harvest festival".to_string(),
                    timestamp: 48_000,
                    participants: vec![SAMPLE_FRIEND_ID],
                    emotional_impact: 0.8,
                    significance: 3,
                    ongoing: false,
                }],
                social_traits,
                role: "merchant".to_string(),
                influence: 40,
                reputation: 0.2,
                emotional_investment: 0.35,
                conflict_tolerance: 0.5,
                loyalty_strength: 0.6,
                socially_active: true,
            },
            daily: DailySnapshot {
                day: 2,
                has_worked_today: true,
                has_socialized_today: false,
            },
        },
        data,
    }
}
