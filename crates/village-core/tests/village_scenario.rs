//! End-to-end village scenarios
//!
//! Drives a small village through whole days and checks that planning,
//! quirks, social bonds and decay all leave their mark.

use std::collections::HashMap;
use std::sync::Arc;

use village_core::quirks::QuirkDefinition;
use village_core::social::BondType;
use village_core::systems::{DecayTracker, RitualScheduler};
use village_core::{
    AiConfig, Emotion, PersonalityType, QuirkRegistry, SimClock, Simulation, Villager, VillagerBrain,
    VillagerId,
};
use village_events::{EventCategory, EventKind, TICKS_PER_DAY};

fn village() -> (Simulation, Vec<VillagerId>) {
    let mut sim = Simulation::new(AiConfig::default(), 42).unwrap();
    let cast = [
        ("Ada", PersonalityType::Energetic, "farmer"),
        ("Bram", PersonalityType::Friendly, "merchant"),
        ("Cora", PersonalityType::Shy, "librarian"),
        ("Dell", PersonalityType::Curious, "cleric"),
        ("Eda", PersonalityType::Lazy, "fisher"),
    ];
    let mut ids = Vec::new();
    for (name, kind, profession) in cast {
        let villager = Villager::new(name)
            .with_profession(profession)
            .with_age(140)
            .with_brain(VillagerBrain::with_personality(kind));
        ids.push(villager.id);
        sim.spawn_villager(villager);
    }
    (sim, ids)
}

#[test]
fn test_first_day_leaves_a_trace() {
    let (mut sim, ids) = village();
    let events = sim.run(TICKS_PER_DAY + 10);

    let mut by_category: HashMap<EventCategory, usize> = HashMap::new();
    for event in &events {
        *by_category.entry(event.kind.category()).or_default() += 1;
    }
    assert!(by_category.get(&EventCategory::Planning).copied().unwrap_or(0) > 0);
    assert!(by_category.get(&EventCategory::Quirk).copied().unwrap_or(0) > 0);
    assert!(by_category.get(&EventCategory::Social).copied().unwrap_or(0) > 0);

    // Someone befriended someone
    let bonded = ids
        .iter()
        .filter_map(|id| sim.villager(*id))
        .any(|v| v.brain.relationships.bond_count() > 0);
    assert!(bonded);

    assert_eq!(sim.world().resource::<DecayTracker>().last_day, 1);
    assert!(!sim.drain_dialogue().is_empty());
}

#[test]
fn test_quirks_follow_personality() {
    let (mut sim, ids) = village();
    sim.run(1_000);

    let ada = sim.villager(ids[0]).unwrap();
    assert!(ada.data.counter("early_rises") >= 1);

    let bram = sim.villager(ids[1]).unwrap();
    assert!(bram.data.counter("items_hoarded") >= 1);
    assert!(bram.data.counter("stories_told") >= 1);

    let eda = sim.villager(ids[4]).unwrap();
    assert!(eda.data.counter("late_nights") >= 1);
    assert_eq!(eda.data.counter("early_rises"), 0);
}

#[test]
fn test_bonds_are_symmetric() {
    let (mut sim, ids) = village();
    sim.run(2_000);

    for a in &ids {
        let villager = sim.villager(*a).unwrap();
        for bond in villager.brain.relationships.bonds() {
            let other = sim.villager(bond.other_id()).unwrap();
            let back = other.brain.relationships.bond(*a);
            assert!(back.is_some(), "{} -> {} has no reverse bond", villager.name, other.name);
            assert_eq!(back.unwrap().shared_experience_count(), bond.shared_experience_count());
            assert_ne!(bond.bond_type(), BondType::Spouse);
        }
    }
}

#[test]
fn test_disabled_quirks_produce_no_quirk_events() {
    let mut config = AiConfig::default();
    config.quirks_enabled = false;
    let mut sim = Simulation::new(config, 1).unwrap();
    let villager = Villager::new("Ada").with_brain(VillagerBrain::with_personality(PersonalityType::Energetic));
    let id = villager.id;
    sim.spawn_villager(villager);

    let events = sim.run(2_000);
    assert!(events.iter().all(|e| e.kind.category() != EventCategory::Quirk));
    assert_eq!(sim.villager(id).unwrap().data.counter("early_rises"), 0);
    assert_eq!(sim.world().resource::<RitualScheduler>().pending(), 1);
}

#[test]
fn test_failing_quirk_is_logged_and_others_still_run() {
    let config = AiConfig::default();
    let registry = QuirkRegistry::from_config(&config);
    registry
        .register(QuirkDefinition::new("sulk", "Sulk").with_action(|_| {
            Err(village_core::QuirkError::failed("sulk", "nobody noticed"))
        }))
        .unwrap();
    registry
        .register(QuirkDefinition::new("hum", "Hum").with_action(|v| {
            v.brain.emotions.adjust(Emotion::Contentment, 1.0);
            v.data.bump_counter("hums", 1);
            Ok(())
        }))
        .unwrap();

    let mut sim = Simulation::with_registry(config, 3, registry);
    let villager = Villager::new("Ada");
    let id = villager.id;
    sim.spawn_villager(villager);

    let events = sim.run(601);
    let failed: Vec<_> = events
        .iter()
        .filter(|e| matches!(e.kind, EventKind::QuirkFailed { .. }))
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].tick, 600);
    assert_eq!(sim.villager(id).unwrap().data.counter("hums"), 1);
}

#[test]
fn test_scheduler_against_shared_clock() {
    let clock = Arc::new(SimClock::new(100));
    let mut scheduler = RitualScheduler::new(clock.clone(), &AiConfig::default());
    let registry = QuirkRegistry::new();
    registry
        .register(
            QuirkDefinition::new("lonely_sigh", "Sigh")
                .with_precondition(|v| v.brain.emotions.get(Emotion::Loneliness) > 50.0)
                .with_action(|v| {
                    v.data.bump_counter("sighs", 1);
                    Ok(())
                }),
        )
        .unwrap();

    let lonely = Villager::new("Ada").with_brain(VillagerBrain::default().with_emotion(Emotion::Loneliness, 80.0));
    let content = Villager::new("Bram");
    let (lonely_id, content_id) = (lonely.id, content.id);
    let mut directory: HashMap<VillagerId, Villager> =
        [(lonely_id, lonely), (content_id, content)].into_iter().collect();

    scheduler.schedule_quirk_check(lonely_id);
    scheduler.schedule_quirk_check(content_id);

    clock.advance_to(200);
    let report = scheduler.perform_scheduled_checks(&registry, &mut directory);
    assert_eq!(report.tasks_run, 0);

    clock.advance_to(700);
    let report = scheduler.perform_scheduled_checks(&registry, &mut directory);
    assert_eq!(report.tasks_run, 2);
    assert_eq!(report.applied_count(), 1);
    assert_eq!(directory[&lonely_id].data.counter("sighs"), 1);
    assert_eq!(directory[&content_id].data.counter("sighs"), 0);
}
