//! Gossip Network
//!
//! What villagers have heard about each other. Every teller keeps its own
//! copy of a message; passing one on stores a fresh copy under the listener
//! with lower reliability. Messages expire a day after they were last told.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::components::villager::VillagerId;
use village_events::TICKS_PER_DAY;

/// Gossip tunables.
pub mod gossip_constants {
    use super::TICKS_PER_DAY;

    /// Reliability of a story told by the villager who started it
    pub const FIRST_HAND_RELIABILITY: f32 = 1.0;
    /// Reliability kept each time a message is retold
    pub const RETELL_FALLOFF: f32 = 0.8;
    /// Messages at or below this reliability are not worth repeating
    pub const MIN_RELIABILITY: f32 = 0.1;
    /// Age at which a message is forgotten
    pub const EXPIRY_TICKS: u64 = TICKS_PER_DAY;
    /// Scale from averaged reputation weight to the global reputation score
    pub const REPUTATION_SCALE: f32 = 10.0;
}

use gossip_constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GossipKind {
    RelationshipNews,
    WorkPerformance,
    PersonalityTraits,
    RecentInteractions,
    FamilyUpdates,
    PositiveInteraction,
    NegativeInteraction,
    Achievement,
    Kindness,
    Aggression,
    MysteriousBehavior,
}

impl GossipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GossipKind::RelationshipNews => "relationship_news",
            GossipKind::WorkPerformance => "work_performance",
            GossipKind::PersonalityTraits => "personality_traits",
            GossipKind::RecentInteractions => "recent_interactions",
            GossipKind::FamilyUpdates => "family_updates",
            GossipKind::PositiveInteraction => "positive_interaction",
            GossipKind::NegativeInteraction => "negative_interaction",
            GossipKind::Achievement => "achievement",
            GossipKind::Kindness => "kindness",
            GossipKind::Aggression => "aggression",
            GossipKind::MysteriousBehavior => "mysterious_behavior",
        }
    }

    /// Weight of this kind when a third party sizes someone up.
    /// Praise and accusation kinds carry no weight here.
    pub fn perspective_weight(&self) -> f32 {
        match self {
            GossipKind::RelationshipNews => 0.5,
            GossipKind::WorkPerformance => 0.7,
            GossipKind::PersonalityTraits => 0.3,
            GossipKind::RecentInteractions => 0.6,
            GossipKind::FamilyUpdates => 0.4,
            _ => 0.0,
        }
    }

    /// Signed weight of this kind in the village-wide reputation score.
    pub fn reputation_weight(&self) -> f32 {
        match self {
            GossipKind::PositiveInteraction => 2.0,
            GossipKind::NegativeInteraction => -2.0,
            GossipKind::WorkPerformance => 1.0,
            _ => 0.5,
        }
    }
}

impl fmt::Display for GossipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One teller's version of a piece of gossip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GossipMessage {
    pub from: VillagerId,
    pub about: VillagerId,
    pub kind: GossipKind,
    pub content: String,
    pub told_at: u64,
    pub reliability: f32,
}

impl GossipMessage {
    pub fn is_fresh(&self, now: u64) -> bool {
        now.saturating_sub(self.told_at) < EXPIRY_TICKS
    }

    /// Same story, regardless of who tells it.
    pub fn same_story(&self, other: &GossipMessage) -> bool {
        self.about == other.about && self.kind == other.kind && self.content == other.content
    }
}

/// New gossip a villager starts, before it enters the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Rumour {
    pub about: VillagerId,
    pub kind: GossipKind,
    pub content: String,
}

/// Everything every villager has heard, keyed by teller
#[derive(Resource, Debug, Default)]
pub struct GossipNetwork {
    by_teller: HashMap<VillagerId, Vec<GossipMessage>>,
}

impl GossipNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a piece of gossip told first-hand by `from`.
    pub fn share(&mut self, from: VillagerId, rumour: Rumour, reliability: f32, now: u64) {
        let message = GossipMessage {
            from,
            about: rumour.about,
            kind: rumour.kind,
            content: rumour.content,
            told_at: now,
            reliability: reliability.clamp(0.0, 1.0),
        };
        self.store(message);
    }

    /// Passes `teller`'s freshest story on to `listener`.
    ///
    /// Stories about the listener and stories the listener already knows are
    /// skipped. Returns the listener's copy, or `None` if nothing was worth
    /// repeating.
    pub fn pass_on(
        &mut self,
        teller: VillagerId,
        listener: VillagerId,
        now: u64,
    ) -> Option<GossipMessage> {
        if teller == listener {
            return None;
        }
        let known = self.by_teller.get(&listener);
        let story = self
            .by_teller
            .get(&teller)?
            .iter()
            .rev()
            .filter(|m| m.is_fresh(now) && m.about != listener)
            .find(|m| !known.is_some_and(|heard| heard.iter().any(|h| h.same_story(m))))?;

        let reliability = story.reliability * RETELL_FALLOFF;
        if reliability <= MIN_RELIABILITY {
            return None;
        }
        let retold = GossipMessage {
            from: listener,
            about: story.about,
            kind: story.kind,
            content: story.content.clone(),
            told_at: now,
            reliability,
        };
        self.store(retold.clone());
        Some(retold)
    }

    /// Fresh messages about `about`, newest first.
    pub fn gossip_about(&self, about: VillagerId, now: u64) -> Vec<&GossipMessage> {
        let mut messages: Vec<&GossipMessage> = self
            .by_teller
            .values()
            .flatten()
            .filter(|m| m.about == about && m.is_fresh(now))
            .collect();
        messages.sort_by(|a, b| b.told_at.cmp(&a.told_at));
        messages
    }

    /// Fresh messages held by `teller`, newest first.
    pub fn gossip_from(&self, teller: VillagerId, now: u64) -> Vec<&GossipMessage> {
        let mut messages: Vec<&GossipMessage> = self
            .by_teller
            .get(&teller)
            .map(|held| held.iter().filter(|m| m.is_fresh(now)).collect())
            .unwrap_or_default();
        messages.sort_by(|a, b| b.told_at.cmp(&a.told_at));
        messages
    }

    pub fn knows_fresh_gossip(&self, teller: VillagerId, now: u64) -> bool {
        self.by_teller
            .get(&teller)
            .is_some_and(|held| held.iter().any(|m| m.is_fresh(now)))
    }

    /// How `perspective` sizes up `about` from what others say, ignoring
    /// its own stories.
    pub fn reputation_modifier(&self, about: VillagerId, perspective: VillagerId, now: u64) -> f32 {
        let weights: Vec<f32> = self
            .gossip_about(about, now)
            .into_iter()
            .filter(|m| m.from != perspective)
            .map(|m| m.kind.perspective_weight() * m.reliability)
            .collect();
        average(&weights)
    }

    /// Village-wide standing of `about`, roughly in [-20, 20].
    pub fn global_reputation(&self, about: VillagerId, now: u64) -> i32 {
        let weights: Vec<f32> = self
            .gossip_about(about, now)
            .into_iter()
            .map(|m| m.kind.reputation_weight() * m.reliability)
            .collect();
        (average(&weights) * REPUTATION_SCALE).round() as i32
    }

    /// Drops expired messages. Returns how many were removed.
    pub fn cleanup_expired(&mut self, now: u64) -> usize {
        let mut removed = 0;
        for held in self.by_teller.values_mut() {
            let before = held.len();
            held.retain(|m| m.is_fresh(now));
            removed += before - held.len();
        }
        self.by_teller.retain(|_, held| !held.is_empty());
        removed
    }

    /// Forgets everything told by or about `villager`.
    pub fn clear_for(&mut self, villager: VillagerId) {
        self.by_teller.remove(&villager);
        for held in self.by_teller.values_mut() {
            held.retain(|m| m.about != villager);
        }
        self.by_teller.retain(|_, held| !held.is_empty());
    }

    /// Total messages held across all tellers.
    pub fn len(&self) -> usize {
        self.by_teller.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_teller.is_empty()
    }

    fn store(&mut self, message: GossipMessage) {
        let held = self.by_teller.entry(message.from).or_default();
        // a retelling replaces the teller's older copy of the same story
        held.retain(|m| !m.same_story(&message));
        held.push(message);
    }
}

fn average(values: &[f32]) -> f32 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f32>() / values.len() as f32
    }
}
