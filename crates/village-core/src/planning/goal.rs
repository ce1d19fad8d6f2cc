//! Goals
//!
//! A goal pairs a desired partial world state with a priority that is
//! re-evaluated every decision cycle. The catalog order returned by
//! [`standard_goals`] is the tie-break order.

use village_events::TimeOfDay;

use super::keys;
use super::world_state::WorldState;
use crate::components::PersonalityProfile;

pub trait Goal: Send + Sync {
    fn name(&self) -> &str;

    fn base_priority(&self) -> f32;

    /// Partial state a satisfying action's effects must cover.
    fn desired_state(&self) -> &WorldState;

    /// Whether this goal is a candidate right now. Must not have side effects.
    fn is_valid(&self, state: &WorldState) -> bool;

    /// Situational multiplier on the base priority.
    fn situational_factor(&self, state: &WorldState, personality: &PersonalityProfile) -> f32;

    /// Base priority times the situational factor, never negative.
    fn calculate_dynamic_priority(&self, state: &WorldState, personality: &PersonalityProfile) -> f32 {
        let priority = self.base_priority() * self.situational_factor(state, personality);
        if priority.is_nan() {
            0.0
        } else {
            priority.max(0.0)
        }
    }
}

/// Raise happiness while it is below 70.
pub struct IncreaseHappinessGoal {
    desired: WorldState,
}

impl IncreaseHappinessGoal {
    pub fn new() -> Self {
        Self {
            desired: WorldState::new().with_bool(keys::IS_HAPPY, true),
        }
    }
}

impl Default for IncreaseHappinessGoal {
    fn default() -> Self {
        Self::new()
    }
}

impl Goal for IncreaseHappinessGoal {
    fn name(&self) -> &str {
        "increase_happiness"
    }

    fn base_priority(&self) -> f32 {
        0.7
    }

    fn desired_state(&self) -> &WorldState {
        &self.desired
    }

    fn is_valid(&self, state: &WorldState) -> bool {
        state.get_float(keys::HAPPINESS) < 70.0
    }

    fn situational_factor(&self, state: &WorldState, _personality: &PersonalityProfile) -> f32 {
        ((100.0 - state.get_float(keys::HAPPINESS)) / 100.0).max(0.1)
    }
}

/// Seek company when lonely or not yet social today.
pub struct SocializeGoal {
    desired: WorldState,
}

impl SocializeGoal {
    pub fn new() -> Self {
        Self {
            desired: WorldState::new().with_bool(keys::HAS_SOCIALIZED, true),
        }
    }
}

impl Default for SocializeGoal {
    fn default() -> Self {
        Self::new()
    }
}

impl Goal for SocializeGoal {
    fn name(&self) -> &str {
        "socialize"
    }

    fn base_priority(&self) -> f32 {
        0.5
    }

    fn desired_state(&self) -> &WorldState {
        &self.desired
    }

    fn is_valid(&self, state: &WorldState) -> bool {
        state.get_float(keys::LONELINESS) > 20.0 || !state.get_bool(keys::HAS_SOCIALIZED_TODAY)
    }

    fn situational_factor(&self, state: &WorldState, personality: &PersonalityProfile) -> f32 {
        (state.get_float(keys::LONELINESS) / 50.0).max(0.1) * personality.social_modifier()
    }
}

/// Work once a day during working hours.
pub struct WorkGoal {
    desired: WorldState,
}

impl WorkGoal {
    pub fn new() -> Self {
        Self {
            desired: WorldState::new().with_bool(keys::HAS_WORKED, true),
        }
    }
}

impl Default for WorkGoal {
    fn default() -> Self {
        Self::new()
    }
}

impl Goal for WorkGoal {
    fn name(&self) -> &str {
        "work"
    }

    fn base_priority(&self) -> f32 {
        0.6
    }

    fn desired_state(&self) -> &WorldState {
        &self.desired
    }

    fn is_valid(&self, state: &WorldState) -> bool {
        let working_hours = TimeOfDay::from_code(state.get_int(keys::TIME_OF_DAY))
            .is_some_and(TimeOfDay::is_working_hours);
        working_hours && !state.get_bool(keys::HAS_WORKED_TODAY)
    }

    fn situational_factor(&self, _state: &WorldState, personality: &PersonalityProfile) -> f32 {
        personality.work_modifier()
    }
}

/// Adults without a spouse who are reasonably happy look for love.
pub struct FindLoveGoal {
    desired: WorldState,
}

/// Age at which villagers start looking for a partner
pub const COURTING_AGE: i64 = 100;
/// Years over which the age factor ramps from floor to full
pub const COURTING_RAMP: f32 = 200.0;

impl FindLoveGoal {
    pub fn new() -> Self {
        Self {
            desired: WorldState::new().with_bool(keys::HAS_SPOUSE, true),
        }
    }
}

impl Default for FindLoveGoal {
    fn default() -> Self {
        Self::new()
    }
}

impl Goal for FindLoveGoal {
    fn name(&self) -> &str {
        "find_love"
    }

    fn base_priority(&self) -> f32 {
        0.3
    }

    fn desired_state(&self) -> &WorldState {
        &self.desired
    }

    fn is_valid(&self, state: &WorldState) -> bool {
        !state.get_bool(keys::HAS_SPOUSE)
            && state.get_int(keys::AGE) > COURTING_AGE
            && state.get_float(keys::HAPPINESS) > 40.0
    }

    fn situational_factor(&self, state: &WorldState, _personality: &PersonalityProfile) -> f32 {
        let age = state.get_int(keys::AGE);
        let age_factor = ((age - COURTING_AGE) as f32 / COURTING_RAMP).clamp(0.1, 1.0);
        let emotional_factor =
            (state.get_float(keys::LONELINESS) + state.get_float(keys::LOVE)) / 100.0;
        age_factor * emotional_factor
    }
}

/// Curious villagers want to hear the latest gossip.
pub struct LearnGossipGoal {
    desired: WorldState,
}

impl LearnGossipGoal {
    pub fn new() -> Self {
        Self {
            desired: WorldState::new().with_bool(keys::KNOWS_LATEST_GOSSIP, true),
        }
    }
}

impl Default for LearnGossipGoal {
    fn default() -> Self {
        Self::new()
    }
}

impl Goal for LearnGossipGoal {
    fn name(&self) -> &str {
        "learn_gossip"
    }

    fn base_priority(&self) -> f32 {
        0.4
    }

    fn desired_state(&self) -> &WorldState {
        &self.desired
    }

    fn is_valid(&self, state: &WorldState) -> bool {
        state.get_float(keys::CURIOSITY) > 30.0
    }

    fn situational_factor(&self, state: &WorldState, personality: &PersonalityProfile) -> f32 {
        state.get_float(keys::CURIOSITY) / 100.0 * personality.gossip_modifier()
    }
}

/// The standard goal catalog in declaration order.
pub fn standard_goals() -> Vec<Box<dyn Goal>> {
    vec![
        Box::new(IncreaseHappinessGoal::new()),
        Box::new(SocializeGoal::new()),
        Box::new(WorkGoal::new()),
        Box::new(FindLoveGoal::new()),
        Box::new(LearnGossipGoal::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::PersonalityType;

    fn calm() -> PersonalityProfile {
        PersonalityProfile::new(PersonalityType::Calm)
    }

    #[test]
    fn test_happiness_goal() {
        let goal = IncreaseHappinessGoal::new();
        assert!(goal.is_valid(&WorldState::new().with_float(keys::HAPPINESS, 69.9)));
        assert!(!goal.is_valid(&WorldState::new().with_float(keys::HAPPINESS, 70.0)));

        let state = WorldState::new().with_float(keys::HAPPINESS, 20.0);
        // 0.7 * 0.8
        assert!((goal.calculate_dynamic_priority(&state, &calm()) - 0.56).abs() < 0.001);

        let content = WorldState::new().with_float(keys::HAPPINESS, 95.0);
        assert!((goal.situational_factor(&content, &calm()) - 0.1).abs() < 0.001);
    }

    #[test]
    fn test_happiness_priority_rises_as_happiness_falls() {
        let goal = IncreaseHappinessGoal::new();
        let mut last = 0.0;
        for happiness in (0..=100).rev().step_by(10) {
            let state = WorldState::new().with_float(keys::HAPPINESS, happiness as f32);
            let priority = goal.calculate_dynamic_priority(&state, &calm());
            assert!(priority >= last);
            last = priority;
        }
    }

    #[test]
    fn test_socialize_goal() {
        let goal = SocializeGoal::new();
        let socialized = WorldState::new().with_bool(keys::HAS_SOCIALIZED_TODAY, true);
        assert!(!goal.is_valid(&socialized));
        assert!(goal.is_valid(&socialized.clone().with_float(keys::LONELINESS, 25.0)));
        assert!(goal.is_valid(&WorldState::new()));

        let lonely = WorldState::new().with_float(keys::LONELINESS, 50.0);
        let friendly = PersonalityProfile::new(PersonalityType::Friendly);
        // 0.5 * 1.0 * 1.5
        assert!((goal.calculate_dynamic_priority(&lonely, &friendly) - 0.75).abs() < 0.001);
        // floor of 0.1 before the modifier
        assert!((goal.situational_factor(&WorldState::new(), &calm()) - 0.1).abs() < 0.001);
    }

    #[test]
    fn test_work_goal_needs_working_hours() {
        let goal = WorkGoal::new();
        let morning = WorldState::new().with_int(keys::TIME_OF_DAY, TimeOfDay::Morning.code());
        let night = WorldState::new().with_int(keys::TIME_OF_DAY, TimeOfDay::Night.code());
        assert!(goal.is_valid(&morning));
        assert!(!goal.is_valid(&night));
        assert!(!goal.is_valid(&morning.clone().with_bool(keys::HAS_WORKED_TODAY, true)));

        let lazy = PersonalityProfile::new(PersonalityType::Lazy);
        assert!((goal.calculate_dynamic_priority(&morning, &lazy) - 0.3).abs() < 0.001);
    }

    #[test]
    fn test_find_love_goal() {
        let goal = FindLoveGoal::new();
        let base = WorldState::new()
            .with_int(keys::AGE, 300)
            .with_float(keys::HAPPINESS, 60.0)
            .with_float(keys::LONELINESS, 30.0)
            .with_float(keys::LOVE, 20.0);
        assert!(goal.is_valid(&base));
        assert!(!goal.is_valid(&base.clone().with_bool(keys::HAS_SPOUSE, true)));
        assert!(!goal.is_valid(&base.clone().with_int(keys::AGE, 100)));
        assert!(!goal.is_valid(&base.clone().with_float(keys::HAPPINESS, 40.0)));

        // age factor 1.0, emotional factor 0.5
        assert!((goal.situational_factor(&base, &calm()) - 0.5).abs() < 0.001);
        // age 200: (200 - 100) / 200 = 0.5
        let middle = base.clone().with_int(keys::AGE, 200);
        assert!((goal.situational_factor(&middle, &calm()) - 0.25).abs() < 0.001);
        // just past courting age the factor sits on its floor
        let young = base.clone().with_int(keys::AGE, 101);
        assert!((goal.situational_factor(&young, &calm()) - 0.05).abs() < 0.001);
    }

    #[test]
    fn test_gossip_goal() {
        let goal = LearnGossipGoal::new();
        let state = WorldState::new().with_float(keys::CURIOSITY, 50.0);
        assert!(goal.is_valid(&state));
        assert!(!goal.is_valid(&WorldState::new().with_float(keys::CURIOSITY, 30.0)));

        let curious = PersonalityProfile::new(PersonalityType::Curious);
        // 0.4 * 0.5 * 2.0
        assert!((goal.calculate_dynamic_priority(&state, &curious) - 0.4).abs() < 0.001);
    }

    #[test]
    fn test_catalog_order() {
        let names: Vec<String> = standard_goals().iter().map(|g| g.name().to_string()).collect();
        assert_eq!(
            names,
            vec!["increase_happiness", "socialize", "work", "find_love", "learn_gossip"]
        );
    }
}
