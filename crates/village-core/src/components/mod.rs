//! ECS components and per-villager state.

pub mod brain;
pub mod mood;
pub mod personality;
pub mod villager;

pub use brain::{DailyActivity, VillagerBrain};
pub use mood::{Emotion, EmotionalState, MoodCategory, MoodState};
pub use personality::{ActionCategory, PersonalityProfile, PersonalityType};
pub use villager::{HomeSlot, PersistentData, Villager, VillagerId};
