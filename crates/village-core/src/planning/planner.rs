//! Planner
//!
//! Single-step greedy planning: choose the highest-priority valid goal,
//! then the cheapest performable action whose effects cover that goal, and
//! run it once. A failed action ends the cycle; the villager tries again on
//! its next decision tick.

use bevy_ecs::prelude::*;

use super::action::{standard_actions, Action, ActionContext};
use super::goal::{standard_goals, Goal};
use super::world_state::WorldState;
use crate::components::PersonalityProfile;

/// Result of one decision cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// No goal is currently valid
    NoGoal,
    /// A goal was chosen but no action serves it
    NoAction { goal: String },
    /// The chosen action ran and its effects hold
    Executed { goal: String, action: String },
    /// The chosen action could not complete
    Failed {
        goal: String,
        action: String,
        reason: String,
    },
}

/// Goal and action catalogs shared by every villager.
#[derive(Resource)]
pub struct VillagerPlanner {
    goals: Vec<Box<dyn Goal>>,
    actions: Vec<Box<dyn Action>>,
}

impl Default for VillagerPlanner {
    fn default() -> Self {
        Self::new(standard_goals(), standard_actions())
    }
}

impl VillagerPlanner {
    pub fn new(goals: Vec<Box<dyn Goal>>, actions: Vec<Box<dyn Action>>) -> Self {
        Self { goals, actions }
    }

    pub fn goals(&self) -> impl Iterator<Item = &dyn Goal> {
        self.goals.iter().map(|g| g.as_ref())
    }

    pub fn actions(&self) -> impl Iterator<Item = &dyn Action> {
        self.actions.iter().map(|a| a.as_ref())
    }

    /// Highest-priority valid goal. Ties go to the earlier-declared goal.
    pub fn select_goal(
        &self,
        state: &WorldState,
        personality: &PersonalityProfile,
    ) -> Option<&dyn Goal> {
        let mut best: Option<(&dyn Goal, f32)> = None;
        for goal in self.goals() {
            if !goal.is_valid(state) {
                continue;
            }
            let priority = goal.calculate_dynamic_priority(state, personality);
            match best {
                Some((_, best_priority)) if priority <= best_priority => {}
                _ => best = Some((goal, priority)),
            }
        }
        best.map(|(goal, _)| goal)
    }

    /// Cheapest performable action whose effects cover the goal.
    /// Ties go to the earlier-declared action.
    pub fn select_action(
        &self,
        goal: &dyn Goal,
        state: &WorldState,
        personality: &PersonalityProfile,
    ) -> Option<&dyn Action> {
        let mut best: Option<(&dyn Action, f32)> = None;
        for action in self.actions() {
            if !action.can_perform(state) {
                continue;
            }
            if !action.get_effects(state).satisfies(goal.desired_state()) {
                continue;
            }
            let cost = action.get_cost(state, personality);
            match best {
                Some((_, best_cost)) if cost >= best_cost => {}
                _ => best = Some((action, cost)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Runs one decision cycle for the villager in `ctx`.
    pub fn run_cycle(&self, state: &mut WorldState, ctx: &mut ActionContext<'_>) -> PlanOutcome {
        let personality = ctx.villager.brain.personality.clone();

        let Some(goal) = self.select_goal(state, &personality) else {
            return PlanOutcome::NoGoal;
        };
        let Some(action) = self.select_action(goal, state, &personality) else {
            tracing::debug!("{}: no action serves goal '{}'", ctx.villager.name, goal.name());
            return PlanOutcome::NoAction {
                goal: goal.name().to_string(),
            };
        };

        match action.execute(state, ctx) {
            Ok(()) => {
                tracing::debug!(
                    "{}: '{}' via '{}'",
                    ctx.villager.name,
                    goal.name(),
                    action.name()
                );
                PlanOutcome::Executed {
                    goal: goal.name().to_string(),
                    action: action.name().to_string(),
                }
            }
            Err(e) => {
                tracing::debug!(
                    "{}: '{}' failed for goal '{}': {}",
                    ctx.villager.name,
                    action.name(),
                    goal.name(),
                    e
                );
                PlanOutcome::Failed {
                    goal: goal.name().to_string(),
                    action: action.name().to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }
}
