//! Goal-driven planning: world state, goals, actions and the greedy planner.

pub mod action;
pub mod builder;
pub mod goal;
pub mod keys;
pub mod planner;
pub mod world_state;

pub use action::{standard_actions, Action, ActionContext, Neighbour};
pub use builder::build_world_state;
pub use goal::{standard_goals, Goal};
pub use planner::{PlanOutcome, VillagerPlanner};
pub use world_state::{Fact, WorldState};
