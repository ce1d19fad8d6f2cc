//! Paired relationship updates.
//!
//! The only way one villager's cycle touches another villager's social
//! record. Both sides are borrowed mutably for the whole call, so neither
//! record can be observed half-updated.

use bevy_ecs::prelude::*;

use super::bond::{BondType, SocialBond};
use super::conflict::ConflictResolution;
use super::gossip::Rumour;
use super::memory::SocialMemory;
use crate::components::villager::{Villager, VillagerId};
use crate::error::VillagerError;

/// Strength above which acquaintances become friends
pub const FRIEND_THRESHOLD: f32 = 0.4;
/// Strength above which friends become close friends
pub const CLOSE_FRIEND_THRESHOLD: f32 = 0.75;
/// Strength below which a casual bond sours into rivalry
pub const RIVAL_THRESHOLD: f32 = -0.4;

/// A two-sided interaction requested during one villager's cycle and
/// applied after all cycles for the tick have run.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingInteraction {
    pub initiator: VillagerId,
    pub partner: VillagerId,
    pub experience_type: String,
    pub emotional_impact: f32,
}

/// A teller passing gossip to a listener, optionally starting a new rumour first.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingGossip {
    pub teller: VillagerId,
    pub listener: VillagerId,
    pub rumour: Option<Rumour>,
}

/// Queue of interactions waiting to be applied.
#[derive(Resource, Debug, Default)]
pub struct InteractionQueue {
    pending: Vec<PendingInteraction>,
    gossip: Vec<PendingGossip>,
}

impl InteractionQueue {
    pub fn push(&mut self, interaction: PendingInteraction) {
        self.pending.push(interaction);
    }

    pub fn push_gossip(&mut self, gossip: PendingGossip) {
        self.gossip.push(gossip);
    }

    pub fn drain(&mut self) -> Vec<PendingInteraction> {
        std::mem::take(&mut self.pending)
    }

    pub fn drain_gossip(&mut self) -> Vec<PendingGossip> {
        std::mem::take(&mut self.gossip)
    }

    /// Queued interactions, not counting gossip.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn gossip_len(&self) -> usize {
        self.gossip.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.gossip.is_empty()
    }
}

/// Bond strengths on both sides after an update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairOutcome {
    pub first_strength: f32,
    pub second_strength: f32,
}

/// Records a shared experience between two villagers on both sides.
pub fn record_interaction(
    first: &mut Villager,
    second: &mut Villager,
    experience_type: &str,
    emotional_impact: f32,
    now: u64,
) -> Result<PairOutcome, VillagerError> {
    ensure_distinct(first, second)?;

    let first_strength = apply_side(first, second, experience_type, emotional_impact, now);
    let second_strength = apply_side(second, first, experience_type, emotional_impact, now);

    tracing::debug!(
        "{} <-> {} shared '{}' ({:+.2}): {:.2} / {:.2}",
        first.name,
        second.name,
        experience_type,
        emotional_impact,
        first_strength,
        second_strength
    );

    Ok(PairOutcome {
        first_strength,
        second_strength,
    })
}

/// Resolves a conflict on both sides, forming neutral bonds if needed.
pub fn resolve_conflict_between(
    first: &mut Villager,
    second: &mut Villager,
    conflict_type: &str,
    resolution: ConflictResolution,
    now: u64,
) -> Result<PairOutcome, VillagerError> {
    ensure_distinct(first, second)?;

    ensure_bond(first, second, conflict_type, now);
    ensure_bond(second, first, conflict_type, now);
    let first_strength =
        first
            .brain
            .relationships
            .resolve_conflict(second.id, conflict_type, resolution, now)?;
    let second_strength =
        second
            .brain
            .relationships
            .resolve_conflict(first.id, conflict_type, resolution, now)?;

    Ok(PairOutcome {
        first_strength,
        second_strength,
    })
}

/// Marries two villagers: spouse bonds on both sides and spouse links set.
pub fn marry(first: &mut Villager, second: &mut Villager, now: u64) -> Result<(), VillagerError> {
    ensure_distinct(first, second)?;
    if first.has_spouse() || second.has_spouse() {
        return Err(VillagerError::InvalidArgument(format!(
            "{} or {} is already married",
            first.name, second.name
        )));
    }

    bind_spouse(first, second, now);
    bind_spouse(second, first, now);

    tracing::info!("{} and {} are now married", first.name, second.name);
    Ok(())
}

fn ensure_distinct(first: &Villager, second: &Villager) -> Result<(), VillagerError> {
    if first.id == second.id {
        return Err(VillagerError::InvalidArgument(format!(
            "villager {} cannot interact with itself",
            first.id
        )));
    }
    Ok(())
}

fn ensure_bond(me: &mut Villager, them: &Villager, context: &str, now: u64) {
    me.brain.relationships.create_social_bond(
        them.id,
        &them.name,
        BondType::Acquaintance,
        0.0,
        now,
        context,
    );
}

fn bind_spouse(me: &mut Villager, them: &Villager, now: u64) {
    let relationships = &mut me.brain.relationships;
    match relationships.bond_mut(them.id) {
        Some(bond) => bond.evolve_bond_type(BondType::Spouse, now),
        None => relationships.insert_bond(SocialBond::new(
            them.id,
            &them.name,
            BondType::Spouse,
            0.8,
            now,
            "wedding",
        )),
    }
    me.spouse = Some(them.id);
}

fn apply_side(
    me: &mut Villager,
    them: &Villager,
    experience_type: &str,
    emotional_impact: f32,
    now: u64,
) -> f32 {
    let relationships = &mut me.brain.relationships;
    let bond = relationships.create_social_bond(
        them.id,
        &them.name,
        BondType::Acquaintance,
        0.0,
        now,
        experience_type,
    );
    bond.record_shared_experience(emotional_impact, now);
    if let Some(evolved) = evolved_type(bond.bond_type(), bond.strength()) {
        bond.evolve_bond_type(evolved, now);
    }
    let strength = bond.strength();

    relationships.increment_interaction_count(now);
    relationships.record_shared_experience(SocialMemory::new(
        experience_type,
        format!("{} with {}", experience_type, them.name),
        now,
        [me.id, them.id],
        emotional_impact,
    ));
    strength
}

/// Casual bonds move between acquaintance, friend, close friend and rival
/// as strength crosses thresholds. Other kinds are only changed explicitly.
fn evolved_type(current: BondType, strength: f32) -> Option<BondType> {
    let casual = matches!(
        current,
        BondType::Acquaintance | BondType::Friend | BondType::CloseFriend | BondType::Rival
    );
    if !casual {
        return None;
    }
    let target = if strength > CLOSE_FRIEND_THRESHOLD {
        BondType::CloseFriend
    } else if strength > FRIEND_THRESHOLD {
        BondType::Friend
    } else if strength < RIVAL_THRESHOLD {
        BondType::Rival
    } else {
        BondType::Acquaintance
    };
    (target != current).then_some(target)
}
