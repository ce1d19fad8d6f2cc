//! Relationship Data
//!
//! Everything a villager knows about its social standing: bonds towards
//! others, remembered shared experiences, social traits, role, influence
//! and reputation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write;

use super::bond::{BondType, SocialBond};
use super::conflict::ConflictResolution;
use super::memory::SocialMemory;
use super::role::SocialRole;
use crate::components::villager::VillagerId;
use village_events::days_between;
use crate::error::VillagerError;

/// Tunables for the relationship model.
pub mod relationship_constants {
    /// Shared experiences older than this are forgotten by default
    pub const EXPERIENCE_RETENTION_DAYS: u64 = 30;
    /// Idle days after which emotional investment starts to wane
    pub const INVESTMENT_GRACE_DAYS: u64 = 7;
    /// Investment lost per day once past the grace period
    pub const INVESTMENT_DECAY_PER_DAY: f32 = 0.01;
    /// Investment gained per unit of recorded experience impact
    pub const INVESTMENT_PER_IMPACT: f32 = 0.1;
    pub const MAX_INFLUENCE: i32 = 100;
    /// Experience impact per point of influence change
    pub const INFLUENCE_IMPACT_SCALE: f32 = 0.01;
    pub const ROLE_TRANSITION_IMPACT: f32 = 0.3;
    /// Value reported for a social trait the villager has never had
    pub const UNKNOWN_TRAIT_VALUE: f32 = 0.5;
}

use relationship_constants::*;

/// Names of the social traits every villager starts with.
pub const SOCIAL_TRAITS: [&str; 5] = [
    "charisma",
    "empathy",
    "assertiveness",
    "cooperation",
    "social_anxiety",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipData {
    trust: f32,
    friendship: f32,
    interaction_count: u32,
    bonds: HashMap<VillagerId, SocialBond>,
    shared_experiences: Vec<SocialMemory>,
    social_traits: HashMap<String, f32>,
    primary_role: SocialRole,
    social_influence: i32,
    reputation: f32,
    emotional_investment: f32,
    conflict_tolerance: f32,
    loyalty_strength: f32,
    socially_active: bool,
    last_social_update: u64,
}

impl Default for RelationshipData {
    fn default() -> Self {
        let social_traits = SOCIAL_TRAITS
            .iter()
            .map(|name| {
                let start = if *name == "social_anxiety" { 0.3 } else { 0.5 };
                (name.to_string(), start)
            })
            .collect();
        Self {
            trust: 0.0,
            friendship: 0.0,
            interaction_count: 0,
            bonds: HashMap::new(),
            shared_experiences: Vec::new(),
            social_traits,
            primary_role: SocialRole::default(),
            social_influence: 0,
            reputation: 0.0,
            emotional_investment: 0.0,
            conflict_tolerance: 0.5,
            loyalty_strength: 0.5,
            socially_active: true,
            last_social_update: 0,
        }
    }
}

impl RelationshipData {
    pub fn new() -> Self {
        Self::default()
    }

    // Scalars

    pub fn trust(&self) -> f32 {
        self.trust
    }

    pub fn friendship(&self) -> f32 {
        self.friendship
    }

    pub fn interaction_count(&self) -> u32 {
        self.interaction_count
    }

    pub fn primary_role(&self) -> SocialRole {
        self.primary_role
    }

    pub fn social_influence(&self) -> i32 {
        self.social_influence
    }

    pub fn reputation(&self) -> f32 {
        self.reputation
    }

    pub fn emotional_investment(&self) -> f32 {
        self.emotional_investment
    }

    pub fn conflict_tolerance(&self) -> f32 {
        self.conflict_tolerance
    }

    pub fn loyalty_strength(&self) -> f32 {
        self.loyalty_strength
    }

    pub fn is_socially_active(&self) -> bool {
        self.socially_active
    }

    pub fn last_social_update(&self) -> u64 {
        self.last_social_update
    }

    pub fn adjust_trust(&mut self, delta: f32, now: u64) {
        self.trust = (self.trust + delta).clamp(-1.0, 1.0);
        self.touch(now);
    }

    pub fn adjust_friendship(&mut self, delta: f32, now: u64) {
        self.friendship = (self.friendship + delta).clamp(-1.0, 1.0);
        self.touch(now);
    }

    pub fn increment_interaction_count(&mut self, now: u64) {
        self.interaction_count = self.interaction_count.saturating_add(1);
        self.touch(now);
    }

    pub fn adjust_reputation(&mut self, delta: f32, now: u64) {
        self.reputation = (self.reputation + delta).clamp(-1.0, 1.0);
        self.touch(now);
    }

    pub fn set_conflict_tolerance(&mut self, value: f32) {
        self.conflict_tolerance = value.clamp(0.0, 1.0);
    }

    pub fn set_loyalty_strength(&mut self, value: f32) {
        self.loyalty_strength = value.clamp(0.0, 1.0);
    }

    pub fn set_socially_active(&mut self, active: bool, now: u64) {
        self.socially_active = active;
        self.touch(now);
    }

    // Traits

    pub fn social_trait(&self, name: &str) -> f32 {
        self.social_traits
            .get(name)
            .copied()
            .unwrap_or(UNKNOWN_TRAIT_VALUE)
    }

    pub fn social_traits(&self) -> &HashMap<String, f32> {
        &self.social_traits
    }

    /// Adjusts a known trait. Unknown trait names are ignored.
    pub fn adjust_social_trait(&mut self, name: &str, delta: f32) {
        if let Some(value) = self.social_traits.get_mut(name) {
            *value = (*value + delta).clamp(0.0, 1.0);
        }
    }

    // Bonds

    pub fn bond(&self, other: VillagerId) -> Option<&SocialBond> {
        self.bonds.get(&other)
    }

    pub fn bond_mut(&mut self, other: VillagerId) -> Option<&mut SocialBond> {
        self.bonds.get_mut(&other)
    }

    pub fn bonds(&self) -> impl Iterator<Item = &SocialBond> {
        self.bonds.values()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Returns the bond with `other`, forming it first if none exists.
    pub fn create_social_bond(
        &mut self,
        other: VillagerId,
        other_name: &str,
        bond_type: BondType,
        initial_strength: f32,
        now: u64,
        context: &str,
    ) -> &mut SocialBond {
        self.last_social_update = self.last_social_update.max(now);
        self.bonds.entry(other).or_insert_with(|| {
            SocialBond::new(other, other_name, bond_type, initial_strength, now, context)
        })
    }

    /// Inserts a bond as-is, replacing any existing bond with the same villager.
    pub fn insert_bond(&mut self, bond: SocialBond) {
        self.bonds.insert(bond.other_id(), bond);
    }

    // Experiences

    pub fn shared_experiences(&self) -> &[SocialMemory] {
        &self.shared_experiences
    }

    pub fn record_shared_experience(&mut self, memory: SocialMemory) {
        self.emotional_investment = (self.emotional_investment
            + memory.emotional_impact() * INVESTMENT_PER_IMPACT)
            .clamp(0.0, 1.0);
        self.touch(memory.timestamp());
        self.shared_experiences.push(memory);
    }

    /// Drops the oldest experiences beyond `limit`.
    pub fn trim_experiences(&mut self, limit: usize) {
        if self.shared_experiences.len() > limit {
            let excess = self.shared_experiences.len() - limit;
            self.shared_experiences.drain(..excess);
        }
    }

    // Standing

    pub fn adjust_social_influence(&mut self, change: i32, reason: &str, now: u64) {
        self.social_influence = self
            .social_influence
            .saturating_add(change)
            .clamp(0, MAX_INFLUENCE);
        let direction = if change >= 0 { "increased" } else { "decreased" };
        self.record_shared_experience(SocialMemory::new(
            "influence_change",
            format!("Social influence {} due to: {}", direction, reason),
            now,
            [],
            change as f32 * INFLUENCE_IMPACT_SCALE,
        ));
    }

    pub fn update_social_role(&mut self, role: SocialRole, now: u64) -> Result<(), VillagerError> {
        let previous = self.primary_role;
        if !previous.can_transition_to(role) {
            return Err(VillagerError::ForbiddenRoleTransition {
                from: previous,
                to: role,
            });
        }
        self.primary_role = role;
        self.record_shared_experience(SocialMemory::new(
            "role_transition",
            format!("Social role changed from {} to {}", previous, role),
            now,
            [],
            ROLE_TRANSITION_IMPACT,
        ));
        Ok(())
    }

    /// Applies the outcome of a conflict with `other` and returns the new bond strength.
    pub fn resolve_conflict(
        &mut self,
        other: VillagerId,
        conflict_type: &str,
        resolution: ConflictResolution,
        now: u64,
    ) -> Result<f32, VillagerError> {
        let impact = resolution.strength_impact();
        let bond = self.bonds.get_mut(&other).ok_or_else(|| {
            VillagerError::InvalidArgument(format!("no bond with villager {}", other))
        })?;
        bond.adjust_strength(impact, now);
        let strength = bond.strength();
        let other_name = bond.other_name().to_string();

        self.record_shared_experience(SocialMemory::new(
            "conflict_resolution",
            format!(
                "Resolved {} conflict with {}: {}",
                conflict_type, other_name, resolution
            ),
            now,
            [other],
            impact,
        ));

        match resolution {
            ConflictResolution::PeacefulCompromise => {
                self.adjust_social_trait("cooperation", 0.1);
                self.adjust_social_trait("empathy", 0.05);
            }
            ConflictResolution::DominanceAsserted => {
                self.adjust_social_trait("assertiveness", 0.1);
                self.adjust_social_trait("cooperation", -0.05);
            }
            _ => {}
        }
        Ok(strength)
    }

    /// Forgets stale experiences, lets investment wane and decays every bond.
    pub fn process_time_decay(&mut self, days_passed: u64, now: u64) {
        self.forget_experiences_older_than(EXPERIENCE_RETENTION_DAYS, now);
        if days_passed > INVESTMENT_GRACE_DAYS {
            self.emotional_investment = (self.emotional_investment
                - INVESTMENT_DECAY_PER_DAY * days_passed as f32)
                .clamp(0.0, 1.0);
        }
        for bond in self.bonds.values_mut() {
            bond.process_time_decay(days_passed, now);
        }
    }

    /// Idle decay accrued between the ticks `since` and `now`.
    ///
    /// Investment and every bond lose what their idle time earned over the
    /// window, so repeated daily calls add up to the one-shot formulas.
    /// Nothing here counts as social contact.
    pub fn decay_between(&mut self, since: u64, now: u64) {
        let last_update = self.last_social_update;
        let waning_days = |tick: u64| {
            let idle = days_between(last_update, tick.max(last_update));
            if idle > INVESTMENT_GRACE_DAYS {
                idle
            } else {
                0
            }
        };
        let accrued = waning_days(now).saturating_sub(waning_days(since));
        if accrued > 0 {
            self.emotional_investment = (self.emotional_investment
                - INVESTMENT_DECAY_PER_DAY * accrued as f32)
                .clamp(0.0, 1.0);
        }
        for bond in self.bonds.values_mut() {
            bond.decay_between(since, now);
        }
    }

    pub fn forget_experiences_older_than(&mut self, retention_days: u64, now: u64) {
        self.shared_experiences
            .retain(|memory| memory.age_days(now) <= retention_days);
    }

    /// How well two villagers' temperaments fit, in [0, 1].
    ///
    /// Cooperation and empathy score best when similar; assertiveness
    /// scores best when complementary.
    pub fn social_compatibility(&self, other: &RelationshipData) -> f32 {
        let mut compatibility: f32 = 0.0;
        for (name, value) in &self.social_traits {
            let difference = (value - other.social_trait(name)).abs();
            match name.as_str() {
                "cooperation" | "empathy" => compatibility += (1.0 - difference) * 0.2,
                "assertiveness" => compatibility += difference * 0.1,
                _ => {}
            }
        }
        compatibility.clamp(0.0, 1.0)
    }

    /// Human-readable summary used in dialogue prompts and debug output.
    pub fn social_profile(&self) -> String {
        let mut profile = String::new();
        let _ = writeln!(
            profile,
            "Social Role: {} (Influence: {})",
            self.primary_role, self.social_influence
        );
        let _ = writeln!(
            profile,
            "Reputation: {:.2} | Emotional Investment: {:.2}",
            self.reputation, self.emotional_investment
        );
        let _ = writeln!(
            profile,
            "Trust: {:.2} | Friendship: {:.2}",
            self.trust, self.friendship
        );
        let _ = writeln!(
            profile,
            "Interactions: {} | Active: {}",
            self.interaction_count, self.socially_active
        );

        if !self.bonds.is_empty() {
            let mut bonds: Vec<&SocialBond> = self.bonds.values().collect();
            bonds.sort_by(|a, b| b.strength().abs().total_cmp(&a.strength().abs()));
            profile.push_str("\nKey Relationships:\n");
            for bond in bonds.iter().take(3) {
                let _ = writeln!(
                    profile,
                    "- {} ({}): {:.2}",
                    bond.other_name(),
                    bond.bond_type(),
                    bond.strength()
                );
            }
        }
        profile
    }

    /// Restores scalar state from stored values, clamping each to its range.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn restore_scalars(
        &mut self,
        trust: f32,
        friendship: f32,
        interaction_count: u32,
        role: SocialRole,
        influence: i32,
        reputation: f32,
        emotional_investment: f32,
        conflict_tolerance: f32,
        loyalty_strength: f32,
        socially_active: bool,
    ) {
        self.trust = finite_or(trust, 0.0).clamp(-1.0, 1.0);
        self.friendship = finite_or(friendship, 0.0).clamp(-1.0, 1.0);
        self.interaction_count = interaction_count;
        self.primary_role = role;
        self.social_influence = influence.clamp(0, MAX_INFLUENCE);
        self.reputation = finite_or(reputation, 0.0).clamp(-1.0, 1.0);
        self.emotional_investment = finite_or(emotional_investment, 0.0).clamp(0.0, 1.0);
        self.conflict_tolerance = finite_or(conflict_tolerance, 0.5).clamp(0.0, 1.0);
        self.loyalty_strength = finite_or(loyalty_strength, 0.5).clamp(0.0, 1.0);
        self.socially_active = socially_active;
    }

    /// Sets a trait to a stored value, clamped to [0, 1].
    pub(crate) fn restore_trait(&mut self, name: &str, value: f32) {
        self.social_traits
            .insert(name.to_string(), finite_or(value, UNKNOWN_TRAIT_VALUE).clamp(0.0, 1.0));
    }

    pub(crate) fn restore_experience(&mut self, memory: SocialMemory) {
        self.shared_experiences.push(memory);
    }

    fn touch(&mut self, now: u64) {
        self.last_social_update = self.last_social_update.max(now);
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use village_events::TICKS_PER_DAY;

    fn with_bond(strength: f32) -> (RelationshipData, VillagerId) {
        let mut data = RelationshipData::new();
        let other = VillagerId::new();
        data.create_social_bond(other, "Bram", BondType::Friend, strength, 0, "market");
        (data, other)
    }

    #[test]
    fn test_defaults() {
        let data = RelationshipData::new();
        assert_eq!(data.primary_role(), SocialRole::CommunityMember);
        assert!((data.social_trait("charisma") - 0.5).abs() < 0.001);
        assert!((data.social_trait("social_anxiety") - 0.3).abs() < 0.001);
        assert!((data.social_trait("unheard_of") - 0.5).abs() < 0.001);
        assert!(data.is_socially_active());
    }

    #[test]
    fn test_trust_and_friendship_clamped() {
        let mut data = RelationshipData::new();
        data.adjust_trust(3.0, 1);
        data.adjust_friendship(-3.0, 2);
        assert!((data.trust() - 1.0).abs() < 0.001);
        assert!((data.friendship() + 1.0).abs() < 0.001);
        assert_eq!(data.last_social_update(), 2);
    }

    #[test]
    fn test_unknown_trait_adjustment_ignored() {
        let mut data = RelationshipData::new();
        data.adjust_social_trait("telepathy", 0.4);
        assert!(!data.social_traits().contains_key("telepathy"));

        data.adjust_social_trait("empathy", 0.9);
        assert!((data.social_trait("empathy") - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_create_bond_is_idempotent() {
        let (mut data, other) = with_bond(0.3);
        data.create_social_bond(other, "Bram", BondType::Rival, -0.8, 10, "again");
        assert_eq!(data.bond_count(), 1);
        assert_eq!(data.bond(other).unwrap().bond_type(), BondType::Friend);
    }

    #[test]
    fn test_peaceful_compromise_strengthens_bond() {
        let (mut data, other) = with_bond(0.5);
        let strength = data
            .resolve_conflict(other, "property", ConflictResolution::PeacefulCompromise, 100)
            .unwrap();
        assert!(strength > 0.6);
        assert!((data.social_trait("cooperation") - 0.6).abs() < 0.001);
        assert!((data.social_trait("empathy") - 0.55).abs() < 0.001);
        assert_eq!(data.shared_experiences().len(), 1);
        assert_eq!(data.shared_experiences()[0].experience_type(), "conflict_resolution");
        assert!(data.shared_experiences()[0].involves(other));
    }

    #[test]
    fn test_escalated_conflict_weakens_bond() {
        let (mut data, other) = with_bond(-0.2);
        let strength = data
            .resolve_conflict(other, "insult", ConflictResolution::EscalatedConflict, 100)
            .unwrap();
        assert!(strength < -0.2);
        assert!((strength + 0.5).abs() < 0.001);
    }

    #[test]
    fn test_dominance_shifts_traits() {
        let (mut data, other) = with_bond(0.0);
        data.resolve_conflict(other, "queue", ConflictResolution::DominanceAsserted, 1)
            .unwrap();
        assert!((data.social_trait("assertiveness") - 0.6).abs() < 0.001);
        assert!((data.social_trait("cooperation") - 0.45).abs() < 0.001);
    }

    #[test]
    fn test_resolve_conflict_without_bond_fails() {
        let mut data = RelationshipData::new();
        let result =
            data.resolve_conflict(VillagerId::new(), "x", ConflictResolution::Avoidance, 0);
        assert!(matches!(result, Err(VillagerError::InvalidArgument(_))));
        assert!(data.shared_experiences().is_empty());
    }

    #[test]
    fn test_role_transitions() {
        let mut data = RelationshipData::new();
        data.update_social_role(SocialRole::Outcast, 5).unwrap();
        let err = data.update_social_role(SocialRole::Leader, 6).unwrap_err();
        assert!(matches!(err, VillagerError::ForbiddenRoleTransition { .. }));
        assert_eq!(data.primary_role(), SocialRole::Outcast);

        let memory = &data.shared_experiences()[0];
        assert_eq!(memory.experience_type(), "role_transition");
        assert!(memory.description().contains("community_member"));
        assert!(memory.description().contains("outcast"));
        assert_eq!(data.shared_experiences().len(), 1);
    }

    #[test]
    fn test_influence_clamped_and_recorded() {
        let mut data = RelationshipData::new();
        data.adjust_social_influence(150, "saved the harvest", 10);
        assert_eq!(data.social_influence(), 100);
        data.adjust_social_influence(-250, "caught stealing", 20);
        assert_eq!(data.social_influence(), 0);

        let descriptions: Vec<&str> = data
            .shared_experiences()
            .iter()
            .map(|m| m.description())
            .collect();
        assert!(descriptions[0].contains("increased"));
        assert!(descriptions[1].contains("decreased"));
    }

    #[test]
    fn test_investment_tracks_experiences() {
        let mut data = RelationshipData::new();
        data.record_shared_experience(SocialMemory::new("feast", "", 0, [], 0.8));
        assert!((data.emotional_investment() - 0.08).abs() < 0.001);
        data.record_shared_experience(SocialMemory::new("quarrel", "", 0, [], -5.0));
        assert!((data.emotional_investment() - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_time_decay() {
        let (mut data, other) = with_bond(0.5);
        data.record_shared_experience(SocialMemory::new("feast", "", 0, [], 5.0));
        data.record_shared_experience(SocialMemory::new(
            "chat",
            "",
            35 * TICKS_PER_DAY,
            [],
            0.0,
        ));
        let now = 40 * TICKS_PER_DAY;
        data.process_time_decay(20, now);

        // the 40-day-old feast is forgotten, the 5-day-old chat kept
        assert_eq!(data.shared_experiences().len(), 1);
        assert_eq!(data.shared_experiences()[0].experience_type(), "chat");
        // 0.5 - 0.01 * 20
        assert!((data.emotional_investment() - 0.3).abs() < 0.001);
        // 0.5 - 0.01 * 6
        assert!((data.bond(other).unwrap().strength() - 0.44).abs() < 0.001);
    }

    #[test]
    fn test_short_decay_keeps_investment() {
        let mut data = RelationshipData::new();
        data.record_shared_experience(SocialMemory::new("feast", "", 0, [], 3.0));
        data.process_time_decay(7, 0);
        assert!((data.emotional_investment() - 0.3).abs() < 0.001);
    }

    #[test]
    fn test_daily_decay_adds_up_to_one_shot() {
        let (mut data, other) = with_bond(0.5);
        data.record_shared_experience(SocialMemory::new("feast", "", 0, [], 3.0));
        assert!((data.emotional_investment() - 0.3).abs() < 0.001);

        for day in 1..=60 {
            data.decay_between((day - 1) * TICKS_PER_DAY, day * TICKS_PER_DAY);
        }
        // 0.5 - 0.01 * (60 - 14)
        assert!((data.bond(other).unwrap().strength() - 0.04).abs() < 0.001);
        assert!(data.emotional_investment().abs() < 0.001);
        assert_eq!(data.bond(other).unwrap().last_interaction(), 0);
        assert_eq!(data.last_social_update(), 0);
    }

    #[test]
    fn test_investment_wanes_after_grace() {
        let mut data = RelationshipData::new();
        data.record_shared_experience(SocialMemory::new("feast", "", 0, [], 3.0));
        for day in 1..=7 {
            data.decay_between((day - 1) * TICKS_PER_DAY, day * TICKS_PER_DAY);
        }
        assert!((data.emotional_investment() - 0.3).abs() < 0.001);

        // day 8 crosses the grace period and drops 0.01 * 8 at once
        data.decay_between(7 * TICKS_PER_DAY, 8 * TICKS_PER_DAY);
        assert!((data.emotional_investment() - 0.22).abs() < 0.001);
        data.decay_between(8 * TICKS_PER_DAY, 9 * TICKS_PER_DAY);
        assert!((data.emotional_investment() - 0.21).abs() < 0.001);
    }

    #[test]
    fn test_contact_restarts_idle_decay() {
        let (mut data, other) = with_bond(0.5);
        data.decay_between(0, 20 * TICKS_PER_DAY);
        assert!((data.bond(other).unwrap().strength() - 0.44).abs() < 0.001);

        data.bond_mut(other).unwrap().adjust_strength(0.0, 20 * TICKS_PER_DAY);
        data.decay_between(20 * TICKS_PER_DAY, 30 * TICKS_PER_DAY);
        assert!((data.bond(other).unwrap().strength() - 0.44).abs() < 0.001);
    }

    #[test]
    fn test_influence_saturates_at_extremes() {
        let mut data = RelationshipData::new();
        data.adjust_social_influence(50, "helped at harvest", 1);
        data.adjust_social_influence(i32::MAX, "crowned", 2);
        assert_eq!(data.social_influence(), 100);
        data.adjust_social_influence(i32::MIN, "exiled", 3);
        assert_eq!(data.social_influence(), 0);
        assert_eq!(data.shared_experiences().len(), 3);
    }

    #[test]
    fn test_trim_experiences() {
        let mut data = RelationshipData::new();
        for tick in 0..10 {
            data.record_shared_experience(SocialMemory::new("chat", "", tick, [], 0.1));
        }
        data.trim_experiences(4);
        assert_eq!(data.shared_experiences().len(), 4);
        assert_eq!(data.shared_experiences()[0].timestamp(), 6);
    }

    #[test]
    fn test_compatibility() {
        let a = RelationshipData::new();
        let b = RelationshipData::new();
        // identical: 0.2 + 0.2 + 0.0
        assert!((a.social_compatibility(&b) - 0.4).abs() < 0.001);

        let mut c = RelationshipData::new();
        c.adjust_social_trait("assertiveness", 0.5);
        c.adjust_social_trait("cooperation", -0.5);
        // coop diff 0.5 -> 0.1, empathy 0.2, assert diff 0.5 -> 0.05
        assert!((a.social_compatibility(&c) - 0.35).abs() < 0.001);
    }

    #[test]
    fn test_social_profile() {
        let mut data = RelationshipData::new();
        for (i, strength) in [0.1, -0.9, 0.5, 0.7].iter().enumerate() {
            data.create_social_bond(
                VillagerId::new(),
                &format!("V{}", i),
                BondType::Friend,
                *strength,
                0,
                "",
            );
        }
        data.adjust_reputation(0.256, 1);

        let profile = data.social_profile();
        assert!(profile.contains("Social Role: community_member"));
        assert!(profile.contains("Reputation: 0.26"));
        assert!(profile.contains("V1 (friend): -0.90"));
        assert!(profile.contains("V3"));
        assert!(profile.contains("V2"));
        assert!(!profile.contains("V0"));
    }
}
