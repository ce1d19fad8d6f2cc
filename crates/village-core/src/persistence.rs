//! Persistence Boundary
//!
//! Converts villagers to and from the plain-data snapshots in
//! `village_events`. Restoring never fails: unknown names fall back to
//! defaults, out-of-range numbers are clamped, and undecodable input
//! yields a fresh brain.

use uuid::Uuid;
use village_events::{
    BondSnapshot, BrainSnapshot, DailySnapshot, MemorySnapshot, MoodSnapshot,
    PersonalitySnapshot, RelationshipSnapshot, VillagerSnapshot,
};

use crate::components::{
    DailyActivity, Emotion, EmotionalState, MoodState, PersistentData, PersonalityProfile,
    PersonalityType, Villager, VillagerBrain, VillagerId,
};
use crate::error::VillagerError;
use crate::social::{BondType, RelationshipData, SocialBond, SocialMemory, SocialRole};

impl Villager {
    pub fn snapshot(&self) -> VillagerSnapshot {
        VillagerSnapshot {
            id: self.id.0,
            name: self.name.clone(),
            profession: self.profession.clone(),
            age: self.age,
            spouse: self.spouse.map(|s| s.0),
            brain: self.brain.snapshot(),
            data: self.data.0.clone(),
        }
    }

    pub fn restore(snapshot: &VillagerSnapshot) -> Self {
        Self {
            id: VillagerId(snapshot.id),
            name: snapshot.name.clone(),
            profession: snapshot.profession.clone(),
            age: snapshot.age,
            spouse: snapshot.spouse.map(VillagerId),
            brain: VillagerBrain::from_snapshot(&snapshot.brain),
            data: PersistentData(snapshot.data.clone()),
        }
    }

    /// Restores from a snapshot if one exists, otherwise builds a fresh villager.
    pub fn restore_or_default(id: VillagerId, name: &str, snapshot: Option<&VillagerSnapshot>) -> Self {
        match snapshot {
            Some(snapshot) => Self::restore(snapshot),
            None => {
                tracing::debug!("No saved state for {}, starting fresh", name);
                Self::with_id(id, name)
            }
        }
    }
}

impl VillagerBrain {
    pub fn snapshot(&self) -> BrainSnapshot {
        BrainSnapshot {
            personality: PersonalitySnapshot {
                kind: self.personality.kind.as_str().to_string(),
                traits: self
                    .personality
                    .traits()
                    .iter()
                    .map(|(k, v)| (k.clone(), *v))
                    .collect(),
            },
            mood: MoodSnapshot {
                happiness: self.mood.happiness(),
                energy: self.mood.energy(),
                social: self.mood.social(),
            },
            emotions: self
                .emotions
                .iter()
                .map(|(e, v)| (e.as_str().to_string(), v))
                .collect(),
            relationships: relationships_snapshot(&self.relationships),
            daily: DailySnapshot {
                day: self.daily.day,
                has_worked_today: self.daily.has_worked_today,
                has_socialized_today: self.daily.has_socialized_today,
            },
        }
    }

    pub fn from_snapshot(snapshot: &BrainSnapshot) -> Self {
        let kind = parse_or_default::<PersonalityType>(&snapshot.personality.kind, "personality");
        let mut personality = PersonalityProfile::new(kind);
        for (name, influence) in &snapshot.personality.traits {
            personality.set_trait(name.clone(), *influence);
        }

        let mut emotions = EmotionalState::new();
        for (name, level) in &snapshot.emotions {
            match name.parse::<Emotion>() {
                Ok(emotion) if level.is_finite() => emotions.set(emotion, *level),
                Ok(_) => tracing::warn!("Dropping non-finite level for emotion '{}'", name),
                Err(e) => tracing::warn!("Dropping saved emotion: {}", e),
            }
        }

        Self {
            personality,
            mood: MoodState::new(
                finite_or_baseline(snapshot.mood.happiness),
                finite_or_baseline(snapshot.mood.energy),
                finite_or_baseline(snapshot.mood.social),
            ),
            emotions,
            relationships: relationships_from_snapshot(&snapshot.relationships),
            daily: DailyActivity {
                day: snapshot.daily.day,
                has_worked_today: snapshot.daily.has_worked_today,
                has_socialized_today: snapshot.daily.has_socialized_today,
            },
        }
    }
}

fn relationships_snapshot(data: &RelationshipData) -> RelationshipSnapshot {
    let mut bonds: Vec<BondSnapshot> = data
        .bonds()
        .map(|bond| BondSnapshot {
            other_id: bond.other_id().0,
            other_name: bond.other_name().to_string(),
            bond_type: bond.bond_type().as_str().to_string(),
            strength: bond.strength(),
            formed_at: bond.formed_at(),
            last_interaction: bond.last_interaction(),
            formation_context: bond.formation_context().to_string(),
            shared_experience_count: bond.shared_experience_count(),
            emotional_investment: bond.emotional_investment(),
        })
        .collect();
    bonds.sort_by_key(|b| b.other_id);

    RelationshipSnapshot {
        trust: data.trust(),
        friendship: data.friendship(),
        interaction_count: data.interaction_count(),
        bonds,
        experiences: data
            .shared_experiences()
            .iter()
            .map(|memory| MemorySnapshot {
                experience_type: memory.experience_type().to_string(),
                description: memory.description().to_string(),
                timestamp: memory.timestamp(),
                participants: memory.participants().iter().map(|p| p.0).collect(),
                emotional_impact: memory.emotional_impact(),
                significance: memory.significance(),
                ongoing: memory.is_ongoing(),
            })
            .collect(),
        social_traits: data
            .social_traits()
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect(),
        role: data.primary_role().as_str().to_string(),
        influence: data.social_influence().max(0) as u32,
        reputation: data.reputation(),
        emotional_investment: data.emotional_investment(),
        conflict_tolerance: data.conflict_tolerance(),
        loyalty_strength: data.loyalty_strength(),
        socially_active: data.is_socially_active(),
    }
}

fn relationships_from_snapshot(snapshot: &RelationshipSnapshot) -> RelationshipData {
    let mut data = RelationshipData::default();
    data.restore_scalars(
        snapshot.trust,
        snapshot.friendship,
        snapshot.interaction_count,
        parse_or_default::<SocialRole>(&snapshot.role, "social role"),
        snapshot.influence.min(i32::MAX as u32) as i32,
        snapshot.reputation,
        snapshot.emotional_investment,
        snapshot.conflict_tolerance,
        snapshot.loyalty_strength,
        snapshot.socially_active,
    );
    for (name, value) in &snapshot.social_traits {
        data.restore_trait(name, *value);
    }
    for bond in &snapshot.bonds {
        data.insert_bond(SocialBond::restore(
            VillagerId(bond.other_id),
            bond.other_name.clone(),
            parse_or_default::<BondType>(&bond.bond_type, "bond type"),
            bond.strength,
            bond.formed_at,
            bond.last_interaction,
            bond.formation_context.clone(),
            bond.shared_experience_count,
            bond.emotional_investment,
        ));
    }
    for memory in &snapshot.experiences {
        let mut restored = SocialMemory::new(
            memory.experience_type.clone(),
            memory.description.clone(),
            memory.timestamp,
            memory.participants.iter().copied().map(VillagerId),
            memory.emotional_impact,
        );
        restored.set_significance(memory.significance);
        restored.set_ongoing(memory.ongoing);
        data.restore_experience(restored);
    }
    data
}

/// Parses a stored enum name; empty or unknown names give the default.
fn parse_or_default<T>(value: &str, what: &str) -> T
where
    T: std::str::FromStr<Err = String> + Default,
{
    if value.is_empty() {
        return T::default();
    }
    value.parse().unwrap_or_else(|e| {
        tracing::warn!("Unknown saved {}: {}", what, e);
        T::default()
    })
}

fn finite_or_baseline(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        crate::components::mood::MOOD_BASELINE
    }
}

/// Encodes a snapshot as JSON.
pub fn snapshot_to_json(snapshot: &VillagerSnapshot) -> Result<String, VillagerError> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Decodes a snapshot from JSON.
pub fn snapshot_from_json(json: &str) -> Result<VillagerSnapshot, VillagerError> {
    Ok(serde_json::from_str(json)?)
}

/// Restores a villager from JSON, starting fresh if the data is unreadable.
pub fn restore_from_json(id: Uuid, name: &str, json: Option<&str>) -> Villager {
    let snapshot = json.and_then(|json| match snapshot_from_json(json) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            tracing::warn!("Corrupt saved state for {}, using defaults: {}", name, e);
            None
        }
    });
    Villager::restore_or_default(VillagerId(id), name, snapshot.as_ref())
}
