//! Tick source shared by every villager.

use bevy_ecs::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Anything that can report the current simulation tick.
pub trait TickSource: Send + Sync {
    fn current_tick(&self) -> u64;
}

impl<F> TickSource for F
where
    F: Fn() -> u64 + Send + Sync,
{
    fn current_tick(&self) -> u64 {
        self()
    }
}

/// Monotonic tick counter safe to read from worker threads.
#[derive(Debug, Default)]
pub struct SimClock {
    tick: AtomicU64,
}

impl SimClock {
    pub fn new(start: u64) -> Self {
        Self {
            tick: AtomicU64::new(start),
        }
    }

    /// Advances by one tick and returns the new value.
    pub fn advance(&self) -> u64 {
        self.tick.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Moves the clock forward to `tick`. Never moves it backwards.
    pub fn advance_to(&self, tick: u64) {
        self.tick.fetch_max(tick, Ordering::AcqRel);
    }
}

impl TickSource for SimClock {
    fn current_tick(&self) -> u64 {
        self.tick.load(Ordering::Acquire)
    }
}

/// ECS handle on the shared clock.
#[derive(Resource, Clone)]
pub struct Clock(pub Arc<SimClock>);

impl Clock {
    pub fn now(&self) -> u64 {
        self.0.current_tick()
    }
}
