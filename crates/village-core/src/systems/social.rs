//! Social Systems
//!
//! Applies queued two-sided interactions and gossip, and runs the
//! once-a-day decay of moods, emotions, bonds, memories and stale gossip.

use bevy_ecs::prelude::*;

use crate::clock::Clock;
use crate::components::Villager;
use crate::config::AiConfig;
use crate::events::PendingEvents;
use crate::social::gossip::gossip_constants::FIRST_HAND_RELIABILITY;
use crate::social::{record_interaction, GossipNetwork, InteractionQueue, PendingGossip};
use crate::systems::perception::VillageIndex;
use village_events::{day_of, EventKind, VillageEvent, TICKS_PER_DAY};

/// Applies every queued interaction to both villagers at once
pub fn apply_social_interactions(
    clock: Res<Clock>,
    index: Res<VillageIndex>,
    mut queue: ResMut<InteractionQueue>,
    mut gossip: ResMut<GossipNetwork>,
    mut pending_events: ResMut<PendingEvents>,
    mut query: Query<&mut Villager>,
) {
    let now = clock.now();
    for interaction in queue.drain() {
        let (Some(first), Some(second)) = (index.entity(interaction.initiator), index.entity(interaction.partner))
        else {
            tracing::debug!(
                "dropping '{}' between {} and {}: villager gone",
                interaction.experience_type,
                interaction.initiator,
                interaction.partner
            );
            continue;
        };
        let Ok([mut first, mut second]) = query.get_many_mut([first, second]) else {
            continue;
        };

        match record_interaction(
            &mut first,
            &mut second,
            &interaction.experience_type,
            interaction.emotional_impact,
            now,
        ) {
            Ok(_) => {
                pending_events.push(bond_event(&first, &second, now));
                pending_events.push(bond_event(&second, &first, now));
            }
            Err(e) => tracing::warn!("interaction not recorded: {}", e),
        }
    }

    for share in queue.drain_gossip() {
        if let Some(event) = spread_gossip(&mut gossip, &index, &query, share, now) {
            pending_events.push(event);
        }
    }
}

/// Starts the teller's rumour, if any, and passes its freshest story on.
fn spread_gossip(
    gossip: &mut GossipNetwork,
    index: &VillageIndex,
    query: &Query<&mut Villager>,
    share: PendingGossip,
    now: u64,
) -> Option<VillageEvent> {
    if index.entity(share.listener).is_none() {
        return None;
    }
    let teller = query.get(index.entity(share.teller)?).ok()?;

    if let Some(rumour) = share.rumour {
        gossip.share(share.teller, rumour, FIRST_HAND_RELIABILITY, now);
    }
    let Some(heard) = gossip.pass_on(share.teller, share.listener, now) else {
        tracing::trace!("{} had nothing new to tell", teller.name);
        return None;
    };
    tracing::debug!(
        "{} told {} ({:.2}): {}",
        teller.name,
        share.listener,
        heard.reliability,
        heard.content
    );
    Some(VillageEvent::new(
        now,
        teller.id.0,
        teller.name.clone(),
        EventKind::GossipShared {
            listener_id: share.listener.0,
            about_id: heard.about.0,
            content: heard.content,
            reliability: heard.reliability,
        },
    ))
}

fn bond_event(me: &Villager, them: &Villager, now: u64) -> VillageEvent {
    let (bond_type, strength) = me
        .brain
        .relationships
        .bond(them.id)
        .map(|b| (b.bond_type().as_str().to_string(), b.strength()))
        .unwrap_or_default();
    VillageEvent::new(
        now,
        me.id.0,
        me.name.clone(),
        EventKind::BondChanged {
            other_id: them.id.0,
            other_name: them.name.clone(),
            bond_type,
            strength,
        },
    )
}

/// Day index the decay system last ran for
#[derive(Resource, Debug, Default)]
pub struct DecayTracker {
    pub last_day: u64,
}

/// Once-a-day decay for one villager over the `days` that ended at `now`.
///
/// Bonds and investment lose what their idle time accrued in that window
/// only, so calling this every day adds up to the one-shot decay formulas.
pub fn decay_villager(villager: &mut Villager, days: u64, now: u64, config: &AiConfig) {
    let brain = &mut villager.brain;
    for _ in 0..days {
        brain.mood.decay(1.0);
        brain.emotions.drift_daily();
    }

    let since = now.saturating_sub(days.saturating_mul(TICKS_PER_DAY));
    let relationships = &mut brain.relationships;
    relationships.forget_experiences_older_than(config.experience_retention_days, now);
    relationships.decay_between(since, now);
    relationships.trim_experiences(config.max_shared_experiences);
}

/// System running daily decay when the day changes
pub fn run_daily_decay(
    clock: Res<Clock>,
    config: Res<AiConfig>,
    mut tracker: ResMut<DecayTracker>,
    mut gossip: ResMut<GossipNetwork>,
    mut query: Query<&mut Villager>,
) {
    let now = clock.now();
    let today = day_of(now);
    if today <= tracker.last_day {
        return;
    }
    let days = today - tracker.last_day;
    tracker.last_day = today;

    for mut villager in query.iter_mut() {
        decay_villager(&mut villager, days, now, &config);
    }
    let forgotten = gossip.cleanup_expired(now);
    tracing::info!(day = today, forgotten, "daily decay applied");
}
