//! Builds a villager's perceived world state for one decision cycle.

use village_events::TimeOfDay;

use super::keys;
use super::world_state::WorldState;
use crate::components::{Emotion, Villager};

/// Fresh world state from the villager's brain and surroundings.
///
/// Resets the daily flags first if `tick` has moved to a new day.
pub fn build_world_state(villager: &mut Villager, tick: u64, nearby_count: usize) -> WorldState {
    if villager.brain.daily.refresh(tick) {
        tracing::trace!("{}: new day {}", villager.name, villager.brain.daily.day);
    }
    let brain = &villager.brain;
    let emotions = &brain.emotions;

    WorldState::new()
        .with_int(keys::AGE, i64::from(villager.age))
        .with_float(keys::HAPPINESS, emotions.get(Emotion::Happiness))
        .with_float(keys::LONELINESS, emotions.get(Emotion::Loneliness))
        .with_float(keys::CURIOSITY, emotions.get(Emotion::Curiosity))
        .with_float(keys::LOVE, emotions.get(Emotion::Love))
        .with_float(keys::BOREDOM, emotions.get(Emotion::Boredom))
        .with_int(keys::TIME_OF_DAY, TimeOfDay::from_tick(tick).code())
        .with_bool(keys::HAS_SPOUSE, villager.has_spouse())
        .with_bool(keys::VILLAGERS_NEARBY, nearby_count > 0)
        .with_bool(keys::HAS_WORKED_TODAY, brain.daily.has_worked_today)
        .with_bool(keys::HAS_SOCIALIZED_TODAY, brain.daily.has_socialized_today)
}
