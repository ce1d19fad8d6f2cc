//! Decision System
//!
//! Runs one planning cycle per villager every `decision_interval` ticks.

use bevy_ecs::prelude::*;
use std::collections::HashMap;

use crate::clock::Clock;
use crate::components::{Villager, VillagerId};
use crate::config::AiConfig;
use crate::dialogue::DialogueOutbox;
use crate::events::PendingEvents;
use crate::planning::{build_world_state, keys, ActionContext, PlanOutcome, VillagerPlanner};
use crate::social::{GossipNetwork, InteractionQueue};
use crate::systems::perception::VillageIndex;
use crate::SimRng;
use village_events::{EventKind, VillageEvent};

/// Tick of each villager's last decision
#[derive(Resource, Debug, Default)]
pub struct DecisionTracker {
    last_decision: HashMap<VillagerId, u64>,
}

impl DecisionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `villager` has never decided or its interval has elapsed.
    pub fn is_due(&self, villager: VillagerId, now: u64, interval: u64) -> bool {
        match self.last_decision.get(&villager) {
            Some(&last) => now >= last.saturating_add(interval.max(1)),
            None => true,
        }
    }

    pub fn mark(&mut self, villager: VillagerId, now: u64) {
        self.last_decision.insert(villager, now);
    }

    pub fn last_decision(&self, villager: VillagerId) -> Option<u64> {
        self.last_decision.get(&villager).copied()
    }

    /// Drops villagers for which `keep` is false.
    pub fn retain(&mut self, mut keep: impl FnMut(VillagerId) -> bool) {
        self.last_decision.retain(|id, _| keep(*id));
    }

    pub fn len(&self) -> usize {
        self.last_decision.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_decision.is_empty()
    }
}

/// Maps a planning outcome to a log event. Idle cycles produce none.
pub fn outcome_event(villager: &Villager, tick: u64, outcome: &PlanOutcome) -> Option<VillageEvent> {
    let kind = match outcome {
        PlanOutcome::NoGoal => return None,
        PlanOutcome::NoAction { goal } => EventKind::GoalStalled { goal: goal.clone() },
        PlanOutcome::Executed { goal, action } => EventKind::GoalPursued {
            goal: goal.clone(),
            action: action.clone(),
            succeeded: true,
        },
        PlanOutcome::Failed { goal, action, .. } => EventKind::GoalPursued {
            goal: goal.clone(),
            action: action.clone(),
            succeeded: false,
        },
    };
    Some(VillageEvent::new(tick, villager.id.0, villager.name.clone(), kind))
}

/// System running due decision cycles in home-slot order
#[allow(clippy::too_many_arguments)]
pub fn run_decision_cycles(
    clock: Res<Clock>,
    config: Res<AiConfig>,
    planner: Res<VillagerPlanner>,
    index: Res<VillageIndex>,
    mut tracker: ResMut<DecisionTracker>,
    mut rng: ResMut<SimRng>,
    mut outbox: ResMut<DialogueOutbox>,
    mut interactions: ResMut<InteractionQueue>,
    gossip: Res<GossipNetwork>,
    mut pending_events: ResMut<PendingEvents>,
    mut query: Query<&mut Villager>,
) {
    let now = clock.now();
    let ids: Vec<VillagerId> = index.ids().collect();
    if tracker.len() > ids.len() {
        tracker.retain(|id| index.entity(id).is_some());
    }

    for id in ids {
        if !tracker.is_due(id, now, config.decision_interval) {
            continue;
        }
        let Some(entity) = index.entity(id) else {
            continue;
        };
        let Ok(mut villager) = query.get_mut(entity) else {
            continue;
        };
        tracker.mark(id, now);

        let nearby = index.neighbours_of(id, config.nearby_radius);
        let mut state = build_world_state(&mut villager, now, nearby.len());
        state.set_bool(keys::KNOWS_LATEST_GOSSIP, gossip.knows_fresh_gossip(id, now));
        let mut ctx = ActionContext {
            villager: &mut villager,
            nearby: &nearby,
            rng: &mut rng.0,
            outbox: &mut outbox,
            interactions: &mut interactions,
            tick: now,
        };
        let outcome = planner.run_cycle(&mut state, &mut ctx);

        if let Some(event) = outcome_event(&villager, now, &outcome) {
            pending_events.push(event);
        }
    }
}
