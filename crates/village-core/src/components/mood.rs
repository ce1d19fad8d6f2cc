//! Mood and Emotion Components

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Resting point mood values relax toward.
pub const MOOD_BASELINE: f32 = 0.5;

/// Fraction of the gap to baseline closed per unit of decay factor.
pub const MOOD_DECAY_RATE: f32 = 0.1;

/// Coarse mood label derived from the average of the mood scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodCategory {
    Happy,
    Content,
    Neutral,
    Sad,
    Angry,
}

/// Short-term mood scalars, each in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodState {
    happiness: f32,
    energy: f32,
    social: f32,
}

impl Default for MoodState {
    fn default() -> Self {
        Self {
            happiness: MOOD_BASELINE,
            energy: MOOD_BASELINE,
            social: MOOD_BASELINE,
        }
    }
}

impl MoodState {
    pub fn new(happiness: f32, energy: f32, social: f32) -> Self {
        Self {
            happiness: happiness.clamp(0.0, 1.0),
            energy: energy.clamp(0.0, 1.0),
            social: social.clamp(0.0, 1.0),
        }
    }

    pub fn happiness(&self) -> f32 {
        self.happiness
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn social(&self) -> f32 {
        self.social
    }

    pub fn set_happiness(&mut self, value: f32) {
        self.happiness = value.clamp(0.0, 1.0);
    }

    pub fn set_energy(&mut self, value: f32) {
        self.energy = value.clamp(0.0, 1.0);
    }

    pub fn set_social(&mut self, value: f32) {
        self.social = value.clamp(0.0, 1.0);
    }

    pub fn adjust_happiness(&mut self, delta: f32) {
        self.set_happiness(self.happiness + delta);
    }

    pub fn adjust_energy(&mut self, delta: f32) {
        self.set_energy(self.energy + delta);
    }

    pub fn adjust_social(&mut self, delta: f32) {
        self.set_social(self.social + delta);
    }

    pub fn overall(&self) -> f32 {
        (self.happiness + self.energy + self.social) / 3.0
    }

    pub fn category(&self) -> MoodCategory {
        let average = self.overall();
        if average > 0.8 {
            MoodCategory::Happy
        } else if average > 0.6 {
            MoodCategory::Content
        } else if average > 0.4 {
            MoodCategory::Neutral
        } else if average > 0.2 {
            MoodCategory::Sad
        } else {
            MoodCategory::Angry
        }
    }

    /// Relaxes every scalar toward the baseline.
    pub fn decay(&mut self, factor: f32) {
        let step = |value: f32| value + (MOOD_BASELINE - value) * factor * MOOD_DECAY_RATE;
        self.set_happiness(step(self.happiness));
        self.set_energy(step(self.energy));
        self.set_social(step(self.social));
    }
}

/// Longer-lived emotions on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Happiness,
    Loneliness,
    Curiosity,
    Love,
    Boredom,
    Contentment,
}

impl Emotion {
    pub fn all() -> &'static [Emotion] {
        &[
            Emotion::Happiness,
            Emotion::Loneliness,
            Emotion::Curiosity,
            Emotion::Love,
            Emotion::Boredom,
            Emotion::Contentment,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happiness => "happiness",
            Emotion::Loneliness => "loneliness",
            Emotion::Curiosity => "curiosity",
            Emotion::Love => "love",
            Emotion::Boredom => "boredom",
            Emotion::Contentment => "contentment",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::all()
            .iter()
            .copied()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| format!("unknown emotion '{}'", s))
    }
}

pub const EMOTION_MAX: f32 = 100.0;

/// Emotion levels; an emotion never set reads as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionalState {
    levels: HashMap<Emotion, f32>,
}

impl EmotionalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, emotion: Emotion, level: f32) -> Self {
        self.set(emotion, level);
        self
    }

    pub fn get(&self, emotion: Emotion) -> f32 {
        self.levels.get(&emotion).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, emotion: Emotion, level: f32) {
        self.levels.insert(emotion, level.clamp(0.0, EMOTION_MAX));
    }

    pub fn adjust(&mut self, emotion: Emotion, delta: f32) {
        self.set(emotion, self.get(emotion) + delta);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f32)> + '_ {
        self.levels.iter().map(|(e, v)| (*e, *v))
    }

    /// Once-a-day drift: solitude and tedium creep up, happiness fades.
    pub fn drift_daily(&mut self) {
        self.adjust(Emotion::Loneliness, 5.0);
        self.adjust(Emotion::Boredom, 3.0);
        self.adjust(Emotion::Curiosity, 2.0);
        self.adjust(Emotion::Happiness, -2.0);
    }
}
