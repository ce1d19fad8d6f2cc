//! Simulation
//!
//! Owns the ECS world and the per-tick schedule. The binary drives it one
//! tick at a time and drains events and dialogue requests between ticks.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::sync::Arc;

use crate::clock::{Clock, SimClock, TickSource};
use crate::components::{HomeSlot, Villager, VillagerId};
use crate::config::AiConfig;
use crate::dialogue::{DialogueOutbox, DialogueRequest};
use crate::error::RegistryError;
use crate::events::PendingEvents;
use crate::planning::VillagerPlanner;
use crate::quirks::{register_builtin_quirks, QuirkRegistry};
use crate::social::{GossipNetwork, InteractionQueue};
use crate::systems::{
    apply_social_interactions, build_village_index, run_daily_decay, run_decision_cycles,
    run_quirk_checks, DecayTracker, DecisionTracker, RitualScheduler, VillageIndex,
};
use crate::SimRng;
use village_events::{day_of, generate_snapshot_id, VillageEvent, VillageSnapshot};

pub struct Simulation {
    world: World,
    schedule: Schedule,
    clock: Arc<SimClock>,
    next_slot: usize,
    snapshot_count: u64,
}

impl Simulation {
    /// A simulation with the built-in quirks registered.
    pub fn new(config: AiConfig, seed: u64) -> Result<Self, RegistryError> {
        let registry = QuirkRegistry::from_config(&config);
        register_builtin_quirks(&registry, &config)?;
        Ok(Self::with_registry(config, seed, registry))
    }

    pub fn with_registry(config: AiConfig, seed: u64, registry: QuirkRegistry) -> Self {
        let clock = Arc::new(SimClock::new(0));
        let mut world = World::new();

        world.insert_resource(RitualScheduler::new(clock.clone(), &config));
        world.insert_resource(Clock(clock.clone()));
        world.insert_resource(config);
        world.insert_resource(registry);
        world.insert_resource(SimRng(SmallRng::seed_from_u64(seed)));
        world.insert_resource(VillagerPlanner::default());
        world.init_resource::<VillageIndex>();
        world.init_resource::<DecisionTracker>();
        world.init_resource::<DecayTracker>();
        world.init_resource::<InteractionQueue>();
        world.init_resource::<GossipNetwork>();
        world.init_resource::<DialogueOutbox>();
        world.init_resource::<PendingEvents>();

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                build_village_index,
                run_quirk_checks,
                run_decision_cycles,
                apply_social_interactions,
                run_daily_decay,
            )
                .chain(),
        );

        Self {
            world,
            schedule,
            clock,
            next_slot: 0,
            snapshot_count: 0,
        }
    }

    pub fn current_tick(&self) -> u64 {
        self.clock.current_tick()
    }

    pub fn clock(&self) -> Arc<SimClock> {
        self.clock.clone()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Moves into the next free home slot and queues the first quirk check.
    pub fn spawn_villager(&mut self, villager: Villager) -> Entity {
        let id = villager.id;
        let slot = HomeSlot(self.next_slot);
        self.next_slot += 1;

        let entity = self.world.spawn((villager, slot)).id();
        let due = self
            .world
            .resource_mut::<RitualScheduler>()
            .schedule_quirk_check(id);
        tracing::debug!(villager = %id, slot = slot.0, first_check = due, "villager spawned");
        entity
    }

    /// Takes a villager out of the village, along with everything told by
    /// or about it. Its pending quirk check is skipped when it comes due.
    pub fn remove_villager(&mut self, id: VillagerId) -> Option<Villager> {
        let entity = self
            .world
            .resource::<VillageIndex>()
            .entity(id)
            .filter(|entity| self.world.get::<Villager>(*entity).is_some())
            .or_else(|| self.find_entity(id))?;
        let villager = self.world.get_entity_mut(entity)?.take::<Villager>()?;
        self.world.despawn(entity);
        self.world.resource_mut::<GossipNetwork>().clear_for(id);
        tracing::debug!(villager = %id, "villager removed");
        Some(villager)
    }

    /// Runs every system at the current tick, then advances the clock.
    /// Returns the events produced.
    pub fn step(&mut self) -> Vec<VillageEvent> {
        self.schedule.run(&mut self.world);
        self.clock.advance();
        self.world.resource_mut::<PendingEvents>().drain()
    }

    /// Runs `ticks` steps and collects their events.
    pub fn run(&mut self, ticks: u64) -> Vec<VillageEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            events.extend(self.step());
        }
        events
    }

    /// Dialogue requests queued since the last drain.
    pub fn drain_dialogue(&mut self) -> Vec<DialogueRequest> {
        self.world.resource_mut::<DialogueOutbox>().drain()
    }

    pub fn villager(&self, id: VillagerId) -> Option<&Villager> {
        let entity = self.world.resource::<VillageIndex>().entity(id);
        match entity {
            Some(entity) => self.world.get::<Villager>(entity),
            None => self.find_villager(id),
        }
    }

    fn find_entity(&self, id: VillagerId) -> Option<Entity> {
        self.world
            .iter_entities()
            .find(|entity| entity.get::<Villager>().is_some_and(|v| v.id == id))
            .map(|entity| entity.id())
    }

    fn find_villager(&self, id: VillagerId) -> Option<&Villager> {
        self.world
            .iter_entities()
            .filter_map(|entity| entity.get::<Villager>())
            .find(|v| v.id == id)
    }

    /// All villagers in home-slot order.
    pub fn villagers(&mut self) -> Vec<&Villager> {
        let mut query = self.world.query::<(&Villager, &HomeSlot)>();
        let mut villagers: Vec<(&Villager, &HomeSlot)> = query.iter(&self.world).collect();
        villagers.sort_by_key(|(_, slot)| slot.0);
        villagers.into_iter().map(|(v, _)| v).collect()
    }

    pub fn villager_count(&self) -> usize {
        self.world.iter_entities().filter(|e| e.contains::<Villager>()).count()
    }

    /// Plain-data snapshot of every villager.
    pub fn snapshot(&mut self) -> VillageSnapshot {
        self.snapshot_count += 1;
        let tick = self.current_tick();
        VillageSnapshot {
            snapshot_id: generate_snapshot_id(self.snapshot_count),
            tick,
            villagers: self.villagers().into_iter().map(Villager::snapshot).collect(),
        }
    }

    /// Spawns every villager from a snapshot, in order.
    pub fn restore_snapshot(&mut self, snapshot: &VillageSnapshot) -> usize {
        self.clock.advance_to(snapshot.tick);
        self.world.resource_mut::<DecayTracker>().last_day = day_of(self.current_tick());
        for villager in &snapshot.villagers {
            self.spawn_villager(Villager::restore(villager));
        }
        tracing::info!(
            villagers = snapshot.villagers.len(),
            tick = snapshot.tick,
            "restored village snapshot"
        );
        snapshot.villagers.len()
    }
}
