//! Social Bonds
//!
//! A one-sided record of how a villager feels about another. Strength lives
//! in [-1, 1] and emotional investment in [0, 1]; every mutation clamps.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use village_events::days_between;

use crate::components::villager::VillagerId;

/// Decay and scoring constants for bonds.
pub mod bond_constants {
    /// Idle days a bond tolerates before it starts to weaken
    pub const DECAY_GRACE_DAYS: u64 = 14;
    /// Strength lost per idle day past the grace period
    pub const DECAY_PER_DAY: f32 = 0.01;
    /// Investment gained per unit of shared-experience impact
    pub const INVESTMENT_PER_IMPACT: f32 = 0.1;
    /// Strength gained per unit of shared-experience impact
    pub const STRENGTH_PER_IMPACT: f32 = 0.2;
    /// Quality contributed per shared experience
    pub const QUALITY_PER_EXPERIENCE: f32 = 0.02;
    /// Cap on the shared-experience quality contribution
    pub const MAX_EXPERIENCE_QUALITY: f32 = 0.3;
    /// Weight of investment in bond quality
    pub const INVESTMENT_QUALITY_WEIGHT: f32 = 0.2;
    /// |strength| above which a bond can count as strong
    pub const STRONG_STRENGTH: f32 = 0.6;
    /// Investment above which a bond can count as strong
    pub const STRONG_INVESTMENT: f32 = 0.4;
}

use bond_constants::*;

/// Kind of relationship a bond represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BondType {
    #[default]
    Acquaintance,
    Friend,
    CloseFriend,
    Romantic,
    Spouse,
    Family,
    Mentor,
    Rival,
    Enemy,
}

impl BondType {
    pub fn all() -> &'static [BondType] {
        &[
            BondType::Acquaintance,
            BondType::Friend,
            BondType::CloseFriend,
            BondType::Romantic,
            BondType::Spouse,
            BondType::Family,
            BondType::Mentor,
            BondType::Rival,
            BondType::Enemy,
        ]
    }

    /// Family and spouse bonds never fade with time.
    pub fn is_decay_exempt(&self) -> bool {
        matches!(self, BondType::Family | BondType::Spouse)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BondType::Acquaintance => "acquaintance",
            BondType::Friend => "friend",
            BondType::CloseFriend => "close_friend",
            BondType::Romantic => "romantic",
            BondType::Spouse => "spouse",
            BondType::Family => "family",
            BondType::Mentor => "mentor",
            BondType::Rival => "rival",
            BondType::Enemy => "enemy",
        }
    }
}

impl fmt::Display for BondType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BondType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BondType::all()
            .iter()
            .copied()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| format!("unknown bond type '{}'", s))
    }
}

/// A bond towards another villager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialBond {
    other_id: VillagerId,
    other_name: String,
    bond_type: BondType,
    strength: f32,
    formed_at: u64,
    last_interaction: u64,
    formation_context: String,
    shared_experience_count: u32,
    emotional_investment: f32,
}

impl SocialBond {
    pub fn new(
        other_id: VillagerId,
        other_name: impl Into<String>,
        bond_type: BondType,
        strength: f32,
        formed_at: u64,
        formation_context: impl Into<String>,
    ) -> Self {
        Self {
            other_id,
            other_name: other_name.into(),
            bond_type,
            strength: strength.clamp(-1.0, 1.0),
            formed_at,
            last_interaction: formed_at,
            formation_context: formation_context.into(),
            shared_experience_count: 0,
            emotional_investment: 0.0,
        }
    }

    /// Rebuilds a bond from stored parts, clamping anything out of range.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        other_id: VillagerId,
        other_name: impl Into<String>,
        bond_type: BondType,
        strength: f32,
        formed_at: u64,
        last_interaction: u64,
        formation_context: impl Into<String>,
        shared_experience_count: u32,
        emotional_investment: f32,
    ) -> Self {
        Self {
            other_id,
            other_name: other_name.into(),
            bond_type,
            strength: sanitize(strength).clamp(-1.0, 1.0),
            formed_at,
            last_interaction: last_interaction.max(formed_at),
            formation_context: formation_context.into(),
            shared_experience_count,
            emotional_investment: sanitize(emotional_investment).clamp(0.0, 1.0),
        }
    }

    pub fn other_id(&self) -> VillagerId {
        self.other_id
    }

    pub fn other_name(&self) -> &str {
        &self.other_name
    }

    pub fn bond_type(&self) -> BondType {
        self.bond_type
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn formed_at(&self) -> u64 {
        self.formed_at
    }

    pub fn last_interaction(&self) -> u64 {
        self.last_interaction
    }

    pub fn formation_context(&self) -> &str {
        &self.formation_context
    }

    pub fn shared_experience_count(&self) -> u32 {
        self.shared_experience_count
    }

    pub fn emotional_investment(&self) -> f32 {
        self.emotional_investment
    }

    /// Whole days since the last interaction.
    pub fn idle_days(&self, now: u64) -> u64 {
        days_between(self.last_interaction, now)
    }

    pub fn adjust_strength(&mut self, delta: f32, now: u64) {
        self.strength = (self.strength + sanitize(delta)).clamp(-1.0, 1.0);
        self.touch(now);
    }

    pub fn evolve_bond_type(&mut self, bond_type: BondType, now: u64) {
        self.bond_type = bond_type;
        self.touch(now);
    }

    pub fn record_shared_experience(&mut self, emotional_impact: f32, now: u64) {
        let impact = sanitize(emotional_impact);
        self.shared_experience_count = self.shared_experience_count.saturating_add(1);
        self.emotional_investment =
            (self.emotional_investment + impact * INVESTMENT_PER_IMPACT).clamp(0.0, 1.0);
        self.adjust_strength(impact * STRENGTH_PER_IMPACT, now);
    }

    /// Weakens the bond linearly once `days_passed` exceeds the grace period.
    pub fn process_time_decay(&mut self, days_passed: u64, now: u64) {
        if self.bond_type.is_decay_exempt() || days_passed <= DECAY_GRACE_DAYS {
            return;
        }
        let overdue = (days_passed - DECAY_GRACE_DAYS) as f32;
        self.adjust_strength(-DECAY_PER_DAY * overdue, now);
    }

    /// Idle decay accrued between the ticks `since` and `now`, without
    /// counting as contact. Daily calls sum to [`Self::process_time_decay`]
    /// over the whole idle stretch.
    pub fn decay_between(&mut self, since: u64, now: u64) {
        if self.bond_type.is_decay_exempt() {
            return;
        }
        let last = self.last_interaction;
        let overdue =
            |tick: u64| days_between(last, tick.max(last)).saturating_sub(DECAY_GRACE_DAYS);
        let accrued = overdue(now).saturating_sub(overdue(since));
        if accrued > 0 {
            self.strength = (self.strength - DECAY_PER_DAY * accrued as f32).clamp(-1.0, 1.0);
        }
    }

    pub fn relationship_quality(&self) -> f32 {
        let experience =
            (self.shared_experience_count as f32 * QUALITY_PER_EXPERIENCE).min(MAX_EXPERIENCE_QUALITY);
        (self.strength.abs() + experience + self.emotional_investment * INVESTMENT_QUALITY_WEIGHT)
            .min(1.0)
    }

    pub fn is_positive_bond(&self) -> bool {
        self.strength > 0.0
    }

    pub fn is_strong_bond(&self) -> bool {
        self.strength.abs() > STRONG_STRENGTH && self.emotional_investment > STRONG_INVESTMENT
    }

    fn touch(&mut self, now: u64) {
        self.last_interaction = self.last_interaction.max(now);
    }
}

/// NaN never enters a bond.
fn sanitize(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use village_events::TICKS_PER_DAY;

    fn bond(bond_type: BondType, strength: f32) -> SocialBond {
        SocialBond::new(VillagerId::new(), "Bram", bond_type, strength, 0, "test")
    }

    #[test]
    fn test_constructor_clamps() {
        assert!((bond(BondType::Friend, 3.0).strength() - 1.0).abs() < 0.001);
        assert!((bond(BondType::Enemy, -3.0).strength() + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_adjust_strength_clamps_and_touches() {
        let mut b = bond(BondType::Friend, 0.9);
        b.adjust_strength(0.5, 500);
        assert!((b.strength() - 1.0).abs() < 0.001);
        assert_eq!(b.last_interaction(), 500);

        for _ in 0..50 {
            b.adjust_strength(-0.3, 600);
        }
        assert!((b.strength() + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_nan_delta_ignored() {
        let mut b = bond(BondType::Friend, 0.4);
        b.adjust_strength(f32::NAN, 10);
        assert!((b.strength() - 0.4).abs() < 0.001);
    }

    #[test]
    fn test_three_shared_experiences() {
        let mut b = bond(BondType::Acquaintance, 0.0);
        for tick in 1..=3 {
            b.record_shared_experience(0.5, tick);
        }
        assert!((b.strength() - 0.3).abs() < 0.001);
        assert!((b.emotional_investment() - 0.15).abs() < 0.001);
        assert_eq!(b.shared_experience_count(), 3);
    }

    #[test]
    fn test_investment_stays_in_range() {
        let mut b = bond(BondType::Friend, 0.0);
        for _ in 0..40 {
            b.record_shared_experience(5.0, 1);
        }
        assert!(b.emotional_investment() <= 1.0);
        assert!(b.strength() <= 1.0);

        for _ in 0..40 {
            b.record_shared_experience(-5.0, 2);
        }
        assert!(b.emotional_investment() >= 0.0);
        assert!(b.strength() >= -1.0);
    }

    #[test]
    fn test_decay_exempt_bonds() {
        for bond_type in [BondType::Family, BondType::Spouse] {
            let mut b = bond(bond_type, 0.8);
            for days in [0, 15, 100, 10_000] {
                b.process_time_decay(days, days * TICKS_PER_DAY);
            }
            assert!((b.strength() - 0.8).abs() < 0.001);
        }
    }

    #[test]
    fn test_no_decay_within_grace_period() {
        let mut b = bond(BondType::Friend, 0.5);
        for days in 0..=14 {
            b.process_time_decay(days, 0);
        }
        assert!((b.strength() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_linear_decay_after_grace_period() {
        let mut b = bond(BondType::Friend, 0.5);
        b.process_time_decay(24, 24 * TICKS_PER_DAY);
        // 0.5 - 0.01 * (24 - 14)
        assert!((b.strength() - 0.4).abs() < 0.001);
        assert_eq!(b.idle_days(24 * TICKS_PER_DAY), 0);
    }

    #[test]
    fn test_decay_between_spreads_one_shot_over_days() {
        let mut daily = bond(BondType::Friend, 0.5);
        for day in 1..=24 {
            daily.decay_between((day - 1) * TICKS_PER_DAY, day * TICKS_PER_DAY);
        }
        assert!((daily.strength() - 0.4).abs() < 0.001);
        assert_eq!(daily.last_interaction(), 0);

        let mut spouse = bond(BondType::Spouse, 0.5);
        spouse.decay_between(0, 100 * TICKS_PER_DAY);
        assert!((spouse.strength() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_decay_does_not_pass_floor() {
        let mut b = bond(BondType::Rival, -0.95);
        b.process_time_decay(500, 0);
        assert!((b.strength() + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_relationship_quality() {
        let mut b = bond(BondType::Friend, 0.4);
        for _ in 0..5 {
            b.record_shared_experience(0.0, 1);
        }
        // 0.4 + min(0.3, 5 * 0.02) + 0 * 0.2
        assert!((b.relationship_quality() - 0.5).abs() < 0.001);

        let capped = bond(BondType::Friend, 0.95);
        let mut capped = capped;
        for _ in 0..30 {
            capped.record_shared_experience(0.0, 1);
        }
        assert!((capped.relationship_quality() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_strong_bond_needs_strength_and_investment() {
        let mut b = bond(BondType::CloseFriend, 0.7);
        assert!(!b.is_strong_bond());
        for _ in 0..5 {
            b.record_shared_experience(1.0, 1);
        }
        assert!(b.emotional_investment() > 0.4);
        assert!(b.is_strong_bond());

        let rival = bond(BondType::Rival, -0.9);
        assert!(!rival.is_positive_bond());
    }

    #[test]
    fn test_evolve_bond_type() {
        let mut b = bond(BondType::Acquaintance, 0.2);
        b.evolve_bond_type(BondType::Friend, 42);
        assert_eq!(b.bond_type(), BondType::Friend);
        assert_eq!(b.last_interaction(), 42);
    }

    #[test]
    fn test_restore_clamps() {
        let b = SocialBond::restore(
            VillagerId::new(),
            "Cora",
            BondType::Friend,
            7.0,
            100,
            50,
            "",
            2,
            -1.0,
        );
        assert!((b.strength() - 1.0).abs() < 0.001);
        assert!((b.emotional_investment() - 0.0).abs() < 0.001);
        assert_eq!(b.last_interaction(), 100);
    }
}
