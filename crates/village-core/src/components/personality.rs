//! Personality Components
//!
//! A villager's temperament and the multipliers it feeds into goal
//! priorities and action costs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Broad temperament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalityType {
    Friendly,
    Cheerful,
    Shy,
    Grumpy,
    Curious,
    Energetic,
    Serious,
    Lazy,
    #[default]
    Calm,
}

impl PersonalityType {
    pub fn all() -> &'static [PersonalityType] {
        &[
            PersonalityType::Friendly,
            PersonalityType::Cheerful,
            PersonalityType::Shy,
            PersonalityType::Grumpy,
            PersonalityType::Curious,
            PersonalityType::Energetic,
            PersonalityType::Serious,
            PersonalityType::Lazy,
            PersonalityType::Calm,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalityType::Friendly => "friendly",
            PersonalityType::Cheerful => "cheerful",
            PersonalityType::Shy => "shy",
            PersonalityType::Grumpy => "grumpy",
            PersonalityType::Curious => "curious",
            PersonalityType::Energetic => "energetic",
            PersonalityType::Serious => "serious",
            PersonalityType::Lazy => "lazy",
            PersonalityType::Calm => "calm",
        }
    }
}

impl fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonalityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PersonalityType::all()
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown personality type '{}'", s))
    }
}

/// Cost category an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Social,
    Work,
    Gossip,
    Rest,
}

impl ActionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionCategory::Social => "social",
            ActionCategory::Work => "work",
            ActionCategory::Gossip => "gossip",
            ActionCategory::Rest => "rest",
        }
    }
}

/// Temperament plus named trait influences in [0, 1].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersonalityProfile {
    pub kind: PersonalityType,
    traits: HashMap<String, f32>,
}

impl PersonalityProfile {
    pub fn new(kind: PersonalityType) -> Self {
        Self {
            kind,
            traits: HashMap::new(),
        }
    }

    pub fn with_trait(mut self, name: impl Into<String>, influence: f32) -> Self {
        self.set_trait(name, influence);
        self
    }

    pub fn set_trait(&mut self, name: impl Into<String>, influence: f32) {
        self.traits.insert(name.into(), influence.clamp(0.0, 1.0));
    }

    /// Influence of a trait, 0.0 if the villager lacks it.
    pub fn trait_influence(&self, name: &str) -> f32 {
        self.traits.get(name).copied().unwrap_or(0.0)
    }

    pub fn traits(&self) -> &HashMap<String, f32> {
        &self.traits
    }

    /// Multiplier on the desire to socialize.
    pub fn social_modifier(&self) -> f32 {
        match self.kind {
            PersonalityType::Friendly | PersonalityType::Cheerful => 1.5,
            PersonalityType::Shy => 0.6,
            PersonalityType::Grumpy => 0.7,
            PersonalityType::Curious => 1.3,
            _ => 1.0,
        }
    }

    /// Multiplier on the desire to work.
    pub fn work_modifier(&self) -> f32 {
        match self.kind {
            PersonalityType::Energetic | PersonalityType::Serious => 1.3,
            PersonalityType::Lazy => 0.5,
            _ => 1.0,
        }
    }

    /// Multiplier on the appetite for gossip.
    pub fn gossip_modifier(&self) -> f32 {
        match self.kind {
            PersonalityType::Curious => 2.0,
            PersonalityType::Friendly | PersonalityType::Cheerful => 1.3,
            PersonalityType::Shy => 0.5,
            _ => 1.0,
        }
    }

    /// Multiplier applied to an action's base cost.
    pub fn action_cost_modifier(&self, category: ActionCategory) -> f32 {
        use PersonalityType::*;
        match (category, self.kind) {
            (ActionCategory::Social, Shy) => 2.0,
            (ActionCategory::Social, Friendly | Cheerful) => 0.5,
            (ActionCategory::Work, Lazy) => 3.0,
            (ActionCategory::Work, Energetic | Serious) => 0.7,
            (ActionCategory::Gossip, Shy) => 2.5,
            (ActionCategory::Gossip, Curious | Friendly) => 0.5,
            _ => 1.0,
        }
    }
}
