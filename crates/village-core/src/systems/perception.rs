//! Perception System
//!
//! Villagers live in a ring of home slots. A villager perceives the
//! neighbours within `nearby_radius` slots on either side.

use bevy_ecs::prelude::*;
use std::collections::HashMap;

use crate::components::{HomeSlot, Villager, VillagerId};
use crate::planning::Neighbour;

/// Resource mapping villager ids to entities and ring positions
#[derive(Resource, Debug, Default)]
pub struct VillageIndex {
    entities: HashMap<VillagerId, Entity>,
    /// Villagers ordered by home slot
    ring: Vec<Neighbour>,
    positions: HashMap<VillagerId, usize>,
}

impl VillageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity(&self, id: VillagerId) -> Option<Entity> {
        self.entities.get(&id).copied()
    }

    /// Villager ids in home-slot order.
    pub fn ids(&self) -> impl Iterator<Item = VillagerId> + '_ {
        self.ring.iter().map(|n| n.id)
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Rebuilds from `(entity, villager, slot)` triples.
    pub fn rebuild<'a>(&mut self, villagers: impl IntoIterator<Item = (Entity, &'a Villager, HomeSlot)>) {
        self.entities.clear();
        self.positions.clear();

        let mut slots: Vec<(usize, Neighbour)> = Vec::new();
        for (entity, villager, slot) in villagers {
            self.entities.insert(villager.id, entity);
            slots.push((
                slot.0,
                Neighbour {
                    id: villager.id,
                    name: villager.name.clone(),
                },
            ));
        }
        slots.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.id.cmp(&b.1.id)));

        self.ring = slots.into_iter().map(|(_, n)| n).collect();
        for (position, neighbour) in self.ring.iter().enumerate() {
            self.positions.insert(neighbour.id, position);
        }
    }

    /// Villagers within `radius` ring positions of `id`, nearest first.
    pub fn neighbours_of(&self, id: VillagerId, radius: usize) -> Vec<Neighbour> {
        let Some(&position) = self.positions.get(&id) else {
            return Vec::new();
        };
        let count = self.ring.len();
        let mut neighbours: Vec<Neighbour> = Vec::new();
        for offset in 1..=radius.min(count / 2) {
            for index in [(position + offset) % count, (position + count - offset) % count] {
                let candidate = &self.ring[index];
                if candidate.id != id && !neighbours.iter().any(|n| n.id == candidate.id) {
                    neighbours.push(candidate.clone());
                }
            }
        }
        neighbours
    }
}

/// System rebuilding the village index each tick
pub fn build_village_index(mut index: ResMut<VillageIndex>, query: Query<(Entity, &Villager, &HomeSlot)>) {
    index.rebuild(query.iter().map(|(entity, villager, slot)| (entity, villager, *slot)));
}
