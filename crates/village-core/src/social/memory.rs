//! Shared Memories
//!
//! A remembered experience shared with other villagers. Significance is
//! fixed at construction; influence fades with age and is recomputed on
//! every query.

use serde::{Deserialize, Serialize};
use village_events::days_between;

use crate::components::villager::VillagerId;

pub const MIN_SIGNIFICANCE: u8 = 1;
pub const MAX_SIGNIFICANCE: u8 = 5;

/// Influence lost per day of age
pub const INFLUENCE_DECAY_PER_DAY: f32 = 0.02;
/// Age factor never drops below this
pub const MIN_AGE_FACTOR: f32 = 0.1;

/// Significance for a given impact and participant count.
pub fn compute_significance(emotional_impact: f32, participant_count: usize) -> u8 {
    let raw = emotional_impact.abs() * 3.0 + (participant_count as f32 * 0.3).min(2.0);
    let rounded = if raw.is_finite() { raw.round() } else { MAX_SIGNIFICANCE as f32 };
    rounded.clamp(MIN_SIGNIFICANCE as f32, MAX_SIGNIFICANCE as f32) as u8
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialMemory {
    experience_type: String,
    description: String,
    timestamp: u64,
    participants: Vec<VillagerId>,
    emotional_impact: f32,
    significance: u8,
    ongoing: bool,
}

impl SocialMemory {
    pub fn new(
        experience_type: impl Into<String>,
        description: impl Into<String>,
        timestamp: u64,
        participants: impl IntoIterator<Item = VillagerId>,
        emotional_impact: f32,
    ) -> Self {
        let mut participants: Vec<VillagerId> = participants.into_iter().collect();
        participants.sort();
        participants.dedup();
        let emotional_impact = if emotional_impact.is_nan() { 0.0 } else { emotional_impact };
        let significance = compute_significance(emotional_impact, participants.len());
        Self {
            experience_type: experience_type.into(),
            description: description.into(),
            timestamp,
            participants,
            emotional_impact,
            significance,
            ongoing: false,
        }
    }

    pub fn experience_type(&self) -> &str {
        &self.experience_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn participants(&self) -> &[VillagerId] {
        &self.participants
    }

    pub fn emotional_impact(&self) -> f32 {
        self.emotional_impact
    }

    pub fn significance(&self) -> u8 {
        self.significance
    }

    pub fn is_ongoing(&self) -> bool {
        self.ongoing
    }

    pub fn set_significance(&mut self, level: u8) {
        self.significance = level.clamp(MIN_SIGNIFICANCE, MAX_SIGNIFICANCE);
    }

    pub fn set_ongoing(&mut self, ongoing: bool) {
        self.ongoing = ongoing;
    }

    pub fn involves(&self, villager: VillagerId) -> bool {
        self.participants.contains(&villager)
    }

    pub fn is_positive(&self) -> bool {
        self.emotional_impact > 0.0
    }

    pub fn is_highly_significant(&self) -> bool {
        self.significance >= 4
    }

    pub fn age_days(&self, now: u64) -> u64 {
        days_between(self.timestamp, now)
    }

    /// |impact| scaled by an age factor and by significance out of five.
    pub fn current_influence(&self, now: u64) -> f32 {
        let age_factor =
            (1.0 - self.age_days(now) as f32 * INFLUENCE_DECAY_PER_DAY).max(MIN_AGE_FACTOR);
        self.emotional_impact.abs() * age_factor * (self.significance as f32 / MAX_SIGNIFICANCE as f32)
    }
}
