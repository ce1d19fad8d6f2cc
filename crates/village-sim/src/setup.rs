//! Village setup
//!
//! Spawns a fresh village with seeded personalities, ages and traits.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::Rng;

use village_core::{PersonalityProfile, PersonalityType, Simulation, Villager, VillagerBrain};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Bram", "Cora", "Dell", "Eda", "Finn", "Greta", "Hal", "Ilse", "Joss", "Kit", "Lena",
    "Milo", "Nell", "Otto", "Pia",
];

const PROFESSIONS: &[&str] = &[
    "farmer", "fisher", "librarian", "cleric", "merchant", "smith", "shepherd", "mason",
];

/// Traits a villager may be born with, each rolled in [0, 1]
const ROLLED_TRAITS: &[&str] = &["diligence", "greed", "anxiety"];

/// Builds one villager from the rng.
pub fn random_villager(rng: &mut SmallRng, index: usize) -> Villager {
    let first = FIRST_NAMES[index % FIRST_NAMES.len()];
    let name = if index < FIRST_NAMES.len() {
        first.to_string()
    } else {
        format!("{} {}", first, index / FIRST_NAMES.len() + 1)
    };

    let kind = PersonalityType::all()
        .choose(rng)
        .copied()
        .unwrap_or_default();
    let mut personality = PersonalityProfile::new(kind);
    for trait_name in ROLLED_TRAITS {
        personality.set_trait(*trait_name, rng.gen::<f32>());
    }

    let profession = PROFESSIONS.choose(rng).copied().unwrap_or("farmer");
    Villager::new(name)
        .with_profession(profession)
        .with_age(rng.gen_range(60..300))
        .with_brain(VillagerBrain::new(personality))
}

/// Spawns `count` villagers into consecutive home slots.
pub fn spawn_village(sim: &mut Simulation, rng: &mut SmallRng, count: usize) {
    for index in 0..count {
        sim.spawn_villager(random_villager(rng, index));
    }
    tracing::info!(villagers = count, "village spawned");
}
