//! Villager Brain
//!
//! Per-villager state read by goal priorities and action costs.

use serde::{Deserialize, Serialize};
use village_events::day_of;

use super::mood::{Emotion, EmotionalState, MoodState};
use super::personality::{PersonalityProfile, PersonalityType};
use crate::social::RelationshipData;

/// Flags that reset when the day changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub day: u64,
    pub has_worked_today: bool,
    pub has_socialized_today: bool,
}

impl DailyActivity {
    /// Clears the flags if `tick` falls on a later day. Returns true on reset.
    pub fn refresh(&mut self, tick: u64) -> bool {
        let today = day_of(tick);
        if today > self.day {
            *self = DailyActivity {
                day: today,
                ..Default::default()
            };
            return true;
        }
        false
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VillagerBrain {
    pub personality: PersonalityProfile,
    pub mood: MoodState,
    pub emotions: EmotionalState,
    pub relationships: RelationshipData,
    pub daily: DailyActivity,
}

impl Default for VillagerBrain {
    fn default() -> Self {
        Self::new(PersonalityProfile::default())
    }
}

impl VillagerBrain {
    pub fn new(personality: PersonalityProfile) -> Self {
        let emotions = EmotionalState::new()
            .with(Emotion::Happiness, 50.0)
            .with(Emotion::Loneliness, 20.0)
            .with(Emotion::Curiosity, 30.0)
            .with(Emotion::Contentment, 50.0);
        Self {
            personality,
            mood: MoodState::default(),
            emotions,
            relationships: RelationshipData::default(),
            daily: DailyActivity::default(),
        }
    }

    pub fn with_personality(kind: PersonalityType) -> Self {
        Self::new(PersonalityProfile::new(kind))
    }

    pub fn with_emotion(mut self, emotion: Emotion, level: f32) -> Self {
        self.emotions.set(emotion, level);
        self
    }
}
