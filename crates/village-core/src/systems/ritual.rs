//! Ritual Scheduler
//!
//! Tick-ordered queue of "check this villager's quirks at tick T" tasks.
//! Quirk evaluation runs on its own cadence instead of every tick.

use bevy_ecs::prelude::*;
use std::any::Any;
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::clock::TickSource;
use crate::components::{Villager, VillagerId};
use crate::config::AiConfig;
use crate::error::QuirkError;
use crate::events::PendingEvents;
use crate::quirks::QuirkRegistry;
use crate::systems::perception::VillageIndex;
use village_events::{EventKind, VillageEvent};

/// A pending quirk check.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledTask {
    pub villager: VillagerId,
    pub scheduled_tick: u64,
}

// Ordered by tick alone; equal ticks have no defined relative order.
impl PartialEq for ScheduledTask {
    fn eq(&self, other: &Self) -> bool {
        self.scheduled_tick == other.scheduled_tick
    }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledTask {
    fn cmp(&self, other: &Self) -> Ordering {
        self.scheduled_tick.cmp(&other.scheduled_tick)
    }
}

/// Where the scheduler finds the villager a task refers to.
pub trait VillagerDirectory {
    fn villager_mut(&mut self, id: VillagerId) -> Option<&mut Villager>;
}

impl VillagerDirectory for HashMap<VillagerId, Villager> {
    fn villager_mut(&mut self, id: VillagerId) -> Option<&mut Villager> {
        self.get_mut(&id)
    }
}

/// Directory over live villager entities.
pub struct QueryDirectory<'a, 'w, 's, 'q> {
    index: &'a VillageIndex,
    query: &'a mut Query<'w, 's, &'q mut Villager>,
}

impl<'a, 'w, 's, 'q> QueryDirectory<'a, 'w, 's, 'q> {
    pub fn new(index: &'a VillageIndex, query: &'a mut Query<'w, 's, &'q mut Villager>) -> Self {
        Self { index, query }
    }
}

impl VillagerDirectory for QueryDirectory<'_, '_, '_, '_> {
    fn villager_mut(&mut self, id: VillagerId) -> Option<&mut Villager> {
        let entity = self.index.entity(id)?;
        self.query.get_mut(entity).ok().map(Mut::into_inner)
    }
}

/// Result of one quirk application.
#[derive(Debug, Clone, PartialEq)]
pub struct QuirkOutcome {
    pub villager: VillagerId,
    pub villager_name: String,
    pub quirk: String,
    pub result: Result<(), QuirkError>,
}

/// What a call to [`RitualScheduler::perform_scheduled_checks`] did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RitualReport {
    pub tick: u64,
    /// Due tasks popped from the queue
    pub tasks_run: usize,
    /// Tasks whose villager no longer exists
    pub stale_skipped: usize,
    pub outcomes: Vec<QuirkOutcome>,
}

impl RitualReport {
    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    /// Converts the outcomes into log events.
    pub fn to_events(&self) -> Vec<VillageEvent> {
        self.outcomes
            .iter()
            .map(|outcome| {
                let kind = match &outcome.result {
                    Ok(()) => EventKind::QuirkApplied {
                        quirk: outcome.quirk.clone(),
                    },
                    Err(e) => EventKind::QuirkFailed {
                        quirk: outcome.quirk.clone(),
                        reason: e.to_string(),
                    },
                };
                VillageEvent::new(self.tick, outcome.villager.0, outcome.villager_name.clone(), kind)
            })
            .collect()
    }
}

/// Min-heap of quirk checks keyed by scheduled tick.
#[derive(Resource)]
pub struct RitualScheduler {
    queue: BinaryHeap<Reverse<ScheduledTask>>,
    clock: Arc<dyn TickSource>,
    interval: u64,
    quirks_enabled: bool,
    auto_reschedule: bool,
}

impl RitualScheduler {
    pub fn new(clock: Arc<dyn TickSource>, config: &AiConfig) -> Self {
        Self {
            queue: BinaryHeap::new(),
            clock,
            interval: config.quirk_check_interval,
            quirks_enabled: config.quirks_enabled,
            auto_reschedule: true,
        }
    }

    /// Disables re-queueing a villager after its check has run.
    pub fn without_reschedule(mut self) -> Self {
        self.auto_reschedule = false;
        self
    }

    pub fn set_quirks_enabled(&mut self, enabled: bool) {
        self.quirks_enabled = enabled;
    }

    pub fn quirks_enabled(&self) -> bool {
        self.quirks_enabled
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// Queues a check for `villager` one interval from now. Existing tasks
    /// for the same villager are left in place.
    pub fn schedule_quirk_check(&mut self, villager: VillagerId) -> u64 {
        let scheduled_tick = self.clock.current_tick().saturating_add(self.interval);
        self.queue.push(Reverse(ScheduledTask {
            villager,
            scheduled_tick,
        }));
        scheduled_tick
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Tick of the earliest pending task.
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(task)| task.scheduled_tick)
    }

    /// Pops and runs every task due at the current tick. Work is proportional
    /// to the number of due tasks; the rest of the queue is not visited.
    pub fn perform_scheduled_checks(
        &mut self,
        registry: &QuirkRegistry,
        directory: &mut impl VillagerDirectory,
    ) -> RitualReport {
        let now = self.clock.current_tick();
        let mut report = RitualReport {
            tick: now,
            ..Default::default()
        };
        let mut requeue = Vec::new();

        while let Some(Reverse(task)) = self.queue.peek() {
            if task.scheduled_tick > now {
                break;
            }
            let Some(Reverse(task)) = self.queue.pop() else {
                break;
            };
            report.tasks_run += 1;

            let Some(villager) = directory.villager_mut(task.villager) else {
                tracing::debug!(villager = %task.villager, "skipping quirk check for missing villager");
                report.stale_skipped += 1;
                continue;
            };

            if self.quirks_enabled {
                apply_quirks(registry, villager, &mut report);
            }
            if self.auto_reschedule {
                requeue.push(task.villager);
            }
        }

        // Pushed after draining so a zero interval cannot loop forever.
        for villager in requeue {
            self.queue.push(Reverse(ScheduledTask {
                villager,
                scheduled_tick: now.saturating_add(self.interval.max(1)),
            }));
        }

        if report.tasks_run > 0 {
            tracing::debug!(
                tick = now,
                tasks = report.tasks_run,
                applied = report.applied_count(),
                failed = report.failed_count(),
                "quirk checks complete"
            );
        }
        report
    }
}

/// Applies every matching quirk in registry order. A quirk that errors or
/// panics is reported as failed and the rest still run.
fn apply_quirks(registry: &QuirkRegistry, villager: &mut Villager, report: &mut RitualReport) {
    for quirk in registry.get_applicable_quirks(Some(&*villager)) {
        let result = panic::catch_unwind(AssertUnwindSafe(|| quirk.apply(villager)))
            .unwrap_or_else(|payload| {
                Err(QuirkError::failed(
                    quirk.id(),
                    format!("panicked: {}", panic_message(payload.as_ref())),
                ))
            });
        match &result {
            Ok(()) => tracing::debug!(
                villager = %villager.id,
                quirk = quirk.id(),
                weight = registry.weight_of(&quirk, villager),
                "quirk applied"
            ),
            Err(e) => tracing::warn!(villager = %villager.id, quirk = quirk.id(), "quirk failed: {}", e),
        }
        report.outcomes.push(QuirkOutcome {
            villager: villager.id,
            villager_name: villager.name.clone(),
            quirk: quirk.id().to_string(),
            result,
        });
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

/// Runs due quirk checks against the villager entities.
pub fn run_quirk_checks(
    mut scheduler: ResMut<RitualScheduler>,
    registry: Res<QuirkRegistry>,
    index: Res<VillageIndex>,
    mut pending_events: ResMut<PendingEvents>,
    mut query: Query<&mut Villager>,
) {
    let mut directory = QueryDirectory::new(&index, &mut query);
    let report = scheduler.perform_scheduled_checks(&registry, &mut directory);
    for event in report.to_events() {
        pending_events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SimClock;
    use crate::components::{PersonalityType, VillagerBrain};
    use crate::quirks::QuirkDefinition;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering as AtomicOrdering};
    use std::sync::Mutex;

    fn setup(start: u64) -> (Arc<SimClock>, RitualScheduler) {
        let clock = Arc::new(SimClock::new(start));
        let scheduler = RitualScheduler::new(clock.clone(), &AiConfig::default());
        (clock, scheduler)
    }

    fn directory_with(villagers: Vec<Villager>) -> HashMap<VillagerId, Villager> {
        villagers.into_iter().map(|v| (v.id, v)).collect()
    }

    #[test]
    fn test_not_due_then_due() {
        let (clock, mut scheduler) = setup(100);
        let registry = QuirkRegistry::new();
        registry
            .register(
                QuirkDefinition::new("shy_blush", "Blush")
                    .with_precondition(|v| v.brain.personality.kind == PersonalityType::Shy)
                    .with_action(|v| {
                        v.data.bump_counter("blushes", 1);
                        Ok(())
                    }),
            )
            .unwrap();
        registry
            .register(QuirkDefinition::new("never", "Never").with_precondition(|_| false))
            .unwrap();

        let villager = Villager::new("Ada").with_brain(VillagerBrain::with_personality(PersonalityType::Shy));
        let id = villager.id;
        let mut directory = directory_with(vec![villager]);

        assert_eq!(scheduler.schedule_quirk_check(id), 700);

        clock.advance_to(200);
        let report = scheduler.perform_scheduled_checks(&registry, &mut directory);
        assert_eq!(report.tasks_run, 0);
        assert!(report.outcomes.is_empty());
        assert_eq!(directory[&id].data.counter("blushes"), 0);

        clock.advance_to(700);
        let report = scheduler.perform_scheduled_checks(&registry, &mut directory);
        assert_eq!(report.tasks_run, 1);
        assert_eq!(report.applied_count(), 1);
        assert_eq!(report.outcomes[0].quirk, "shy_blush");
        assert_eq!(directory[&id].data.counter("blushes"), 1);
    }

    #[test]
    fn test_due_tasks_run_in_tick_order() {
        let now = Arc::new(AtomicU64::new(50));
        let source = now.clone();
        let mut scheduler = RitualScheduler::new(
            Arc::new(move || source.load(AtomicOrdering::SeqCst)),
            &AiConfig::default(),
        );
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let registry = QuirkRegistry::new();
        registry
            .register(QuirkDefinition::new("note", "Note").with_action(move |v| {
                log.lock().unwrap().push(v.name.clone());
                Ok(())
            }))
            .unwrap();

        let late = Villager::new("Late");
        let early = Villager::new("Early");
        let (late_id, early_id) = (late.id, early.id);
        let mut directory = directory_with(vec![late, early]);

        scheduler.schedule_quirk_check(late_id);
        now.store(0, AtomicOrdering::SeqCst);
        scheduler.schedule_quirk_check(early_id);
        assert_eq!(scheduler.next_due(), Some(600));

        now.store(1000, AtomicOrdering::SeqCst);
        let report = scheduler.perform_scheduled_checks(&registry, &mut directory);
        assert_eq!(report.tasks_run, 2);
        assert_eq!(*seen.lock().unwrap(), vec!["Early".to_string(), "Late".to_string()]);
    }

    #[test]
    fn test_only_due_tasks_are_popped() {
        let (clock, mut scheduler) = setup(0);
        let registry = QuirkRegistry::new();
        let a = Villager::new("A");
        let b = Villager::new("B");
        let (a_id, b_id) = (a.id, b.id);
        let mut directory = directory_with(vec![a, b]);

        scheduler.schedule_quirk_check(a_id);
        clock.advance_to(300);
        scheduler.schedule_quirk_check(b_id);

        clock.advance_to(600);
        let report = scheduler.perform_scheduled_checks(&registry, &mut directory);
        assert_eq!(report.tasks_run, 1);
        // B still pending at 900, A re-queued at 1200
        assert_eq!(scheduler.pending(), 2);
        assert_eq!(scheduler.next_due(), Some(900));
    }

    #[test]
    fn test_failure_does_not_stop_later_quirks() {
        let (clock, mut scheduler) = setup(0);
        let registry = QuirkRegistry::new();
        registry
            .register(
                QuirkDefinition::new("broken", "Broken")
                    .with_action(|_| Err(QuirkError::failed("broken", "snapped"))),
            )
            .unwrap();
        registry
            .register(QuirkDefinition::new("fine", "Fine").with_action(|v| {
                v.data.bump_counter("fine", 1);
                Ok(())
            }))
            .unwrap();

        let villager = Villager::new("Ada");
        let id = villager.id;
        let mut directory = directory_with(vec![villager]);
        scheduler.schedule_quirk_check(id);
        clock.advance_to(600);

        let report = scheduler.perform_scheduled_checks(&registry, &mut directory);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.applied_count(), 1);
        assert_eq!(directory[&id].data.counter("fine"), 1);

        let events = report.to_events();
        assert!(matches!(events[0].kind, EventKind::QuirkFailed { .. }));
        assert!(matches!(events[1].kind, EventKind::QuirkApplied { .. }));
    }

    #[test]
    fn test_panicking_quirk_is_contained() {
        let (clock, mut scheduler) = setup(0);
        let registry = QuirkRegistry::new();
        registry
            .register(QuirkDefinition::new("clumsy", "Clumsy").with_action(|_| panic!("kicked the bucket")))
            .unwrap();
        registry
            .register(QuirkDefinition::new("fine", "Fine").with_action(|v| {
                v.data.bump_counter("fine", 1);
                Ok(())
            }))
            .unwrap();

        let (ada, bram) = (Villager::new("Ada"), Villager::new("Bram"));
        let (ada_id, bram_id) = (ada.id, bram.id);
        let mut directory = directory_with(vec![ada, bram]);
        scheduler.schedule_quirk_check(ada_id);
        scheduler.schedule_quirk_check(bram_id);
        clock.advance_to(600);

        let report = scheduler.perform_scheduled_checks(&registry, &mut directory);
        assert_eq!(report.tasks_run, 2);
        assert_eq!(report.failed_count(), 2);
        assert_eq!(report.applied_count(), 2);
        assert_eq!(directory[&ada_id].data.counter("fine"), 1);
        assert_eq!(directory[&bram_id].data.counter("fine"), 1);

        let failure = report.outcomes.iter().find_map(|o| o.result.as_ref().err()).unwrap();
        assert!(failure.to_string().contains("panicked: kicked the bucket"));
        assert_eq!(scheduler.pending(), 2);
    }

    #[test]
    fn test_stale_villager_skipped() {
        let (clock, mut scheduler) = setup(0);
        let registry = QuirkRegistry::new();
        let mut directory: HashMap<VillagerId, Villager> = HashMap::new();

        scheduler.schedule_quirk_check(VillagerId::new());
        clock.advance_to(600);
        let report = scheduler.perform_scheduled_checks(&registry, &mut directory);
        assert_eq!(report.tasks_run, 1);
        assert_eq!(report.stale_skipped, 1);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_duplicate_schedules_coexist() {
        let (clock, mut scheduler) = setup(0);
        let counter = Arc::new(AtomicUsize::new(0));
        let registry = QuirkRegistry::new();
        let calls = counter.clone();
        registry
            .register(QuirkDefinition::new("count", "Count").with_action(move |_| {
                calls.fetch_add(1, AtomicOrdering::SeqCst);
                Ok(())
            }))
            .unwrap();

        let villager = Villager::new("Ada");
        let id = villager.id;
        let mut directory = directory_with(vec![villager]);
        scheduler.schedule_quirk_check(id);
        scheduler.schedule_quirk_check(id);
        clock.advance_to(600);

        scheduler.perform_scheduled_checks(&registry, &mut directory);
        assert_eq!(counter.load(AtomicOrdering::SeqCst), 2);
    }

    #[test]
    fn test_disabled_quirks_pop_without_applying() {
        let (clock, mut scheduler) = setup(0);
        scheduler.set_quirks_enabled(false);
        let registry = QuirkRegistry::new();
        registry
            .register(QuirkDefinition::new("mark", "Mark").with_action(|v| {
                v.data.bump_counter("marks", 1);
                Ok(())
            }))
            .unwrap();

        let villager = Villager::new("Ada");
        let id = villager.id;
        let mut directory = directory_with(vec![villager]);
        scheduler.schedule_quirk_check(id);
        clock.advance_to(600);

        let report = scheduler.perform_scheduled_checks(&registry, &mut directory);
        assert_eq!(report.tasks_run, 1);
        assert!(report.outcomes.is_empty());
        assert_eq!(directory[&id].data.counter("marks"), 0);
        assert_eq!(scheduler.next_due(), Some(1200));
    }

    #[test]
    fn test_without_reschedule_drains_queue() {
        let clock = Arc::new(SimClock::new(0));
        let mut scheduler = RitualScheduler::new(clock.clone(), &AiConfig::default()).without_reschedule();
        let registry = QuirkRegistry::new();
        let villager = Villager::new("Ada");
        let id = villager.id;
        let mut directory = directory_with(vec![villager]);

        scheduler.schedule_quirk_check(id);
        clock.advance_to(600);
        scheduler.perform_scheduled_checks(&registry, &mut directory);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_zero_interval_runs_once_per_call() {
        let clock = Arc::new(SimClock::new(0));
        let mut config = AiConfig::default();
        config.quirk_check_interval = 0;
        let mut scheduler = RitualScheduler::new(clock.clone(), &config);
        let registry = QuirkRegistry::new();
        let villager = Villager::new("Ada");
        let id = villager.id;
        let mut directory = directory_with(vec![villager]);

        scheduler.schedule_quirk_check(id);
        let report = scheduler.perform_scheduled_checks(&registry, &mut directory);
        assert_eq!(report.tasks_run, 1);
        assert_eq!(scheduler.next_due(), Some(1));
    }
}
