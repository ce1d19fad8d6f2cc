//! Built-in Quirks
//!
//! The quirks every village starts with. Each one reads only the villager it
//! is applied to and leaves a trace in the villager's persistent data.

use super::definition::QuirkDefinition;
use super::registry::QuirkRegistry;
use crate::components::{Emotion, PersonalityType, Villager};
use crate::config::AiConfig;
use crate::error::{QuirkError, RegistryError};

/// Tuning for the built-in quirks.
pub mod quirk_constants {
    /// Items a hoarder can stash before running out of room
    pub const HOARD_LIMIT: i64 = 50;
    /// Curiosity level at which a villager starts collecting curios
    pub const COLLECTOR_CURIOSITY: f32 = 60.0;
    /// Trait influence above which a trait-driven quirk applies
    pub const TRAIT_THRESHOLD: f32 = 0.6;
    /// Social modifier at or above which a villager is a chatterbox
    pub const CHATTERBOX_SOCIAL_MODIFIER: f32 = 1.3;
}

use quirk_constants::*;

pub const EARLY_RISER: &str = "early_riser";
pub const HOARDER: &str = "hoarder";
pub const CHATTERBOX: &str = "chatterbox";
pub const NIGHT_OWL: &str = "night_owl";
pub const COLLECTOR: &str = "collector";
pub const WORRIER: &str = "worrier";

/// Registers every built-in quirk. Fails if any id is already taken.
pub fn register_builtin_quirks(registry: &QuirkRegistry, config: &AiConfig) -> Result<(), RegistryError> {
    for quirk in builtin_quirks(config) {
        registry.register(quirk)?;
    }
    tracing::info!(count = registry.len(), "built-in quirks registered");
    Ok(())
}

/// The built-in quirk definitions, in registration order.
pub fn builtin_quirks(config: &AiConfig) -> Vec<QuirkDefinition> {
    let base_weight = config.default_quirk_weight;
    vec![
        early_riser(),
        hoarder(),
        chatterbox(base_weight),
        night_owl(),
        collector(),
        worrier(),
    ]
}

fn early_riser() -> QuirkDefinition {
    QuirkDefinition::new(EARLY_RISER, "Early Riser")
        .with_precondition(|v| {
            v.brain.personality.kind == PersonalityType::Energetic
                || v.brain.personality.trait_influence("diligence") > TRAIT_THRESHOLD
        })
        .with_action(|v| {
            v.brain.mood.adjust_energy(0.1);
            v.data.bump_counter("early_rises", 1);
            Ok(())
        })
}

fn hoarder() -> QuirkDefinition {
    QuirkDefinition::new(HOARDER, "Hoarder")
        .with_precondition(|v| {
            v.profession == "merchant" || v.brain.personality.trait_influence("greed") > TRAIT_THRESHOLD
        })
        .with_action(|v| {
            if v.data.counter("items_hoarded") >= HOARD_LIMIT {
                return Err(QuirkError::failed(HOARDER, "no room left to hoard"));
            }
            v.data.bump_counter("items_hoarded", 1);
            v.brain.emotions.adjust(Emotion::Contentment, 2.0);
            Ok(())
        })
}

fn chatterbox(base_weight: f32) -> QuirkDefinition {
    QuirkDefinition::new(CHATTERBOX, "Chatterbox")
        .with_precondition(|v| v.brain.personality.social_modifier() >= CHATTERBOX_SOCIAL_MODIFIER)
        .with_weight(move |v| base_weight * v.brain.personality.social_modifier())
        .with_action(|v| {
            v.brain.emotions.adjust(Emotion::Loneliness, -3.0);
            v.data.bump_counter("stories_told", 1);
            Ok(())
        })
}

fn night_owl() -> QuirkDefinition {
    QuirkDefinition::new(NIGHT_OWL, "Night Owl")
        .with_precondition(|v| matches!(v.brain.personality.kind, PersonalityType::Lazy | PersonalityType::Grumpy))
        .with_action(|v| {
            v.brain.mood.adjust_happiness(0.05);
            v.brain.emotions.adjust(Emotion::Boredom, -2.0);
            v.data.bump_counter("late_nights", 1);
            Ok(())
        })
}

fn collector() -> QuirkDefinition {
    QuirkDefinition::new(COLLECTOR, "Collector")
        .with_precondition(|v| v.brain.emotions.get(Emotion::Curiosity) >= COLLECTOR_CURIOSITY)
        .with_action(|v| {
            v.brain.emotions.adjust(Emotion::Curiosity, -5.0);
            v.brain.emotions.adjust(Emotion::Contentment, 3.0);
            v.data.bump_counter("curios_collected", 1);
            Ok(())
        })
}

fn worrier() -> QuirkDefinition {
    QuirkDefinition::new(WORRIER, "Worrier")
        .with_precondition(|v| {
            v.brain.personality.kind == PersonalityType::Shy
                || v.brain.personality.trait_influence("anxiety") > TRAIT_THRESHOLD
        })
        .with_action(fret)
}

fn fret(villager: &mut Villager) -> Result<(), QuirkError> {
    villager.brain.emotions.adjust(Emotion::Happiness, -2.0);
    villager.brain.mood.adjust_energy(-0.05);
    Ok(())
}
