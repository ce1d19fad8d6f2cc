//! Villager Component
//!
//! The agent capability the behaviour core works against: a stable id, a
//! display name, an opaque persistent-data blob and the brain.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::brain::VillagerBrain;

/// Stable villager identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VillagerId(pub Uuid);

impl VillagerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for VillagerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VillagerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque save/restore target owned by the platform layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistentData(pub serde_json::Map<String, serde_json::Value>);

impl PersistentData {
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.0.insert(key.into(), value);
    }

    /// Integer counter stored under `key`, 0 when absent or not a number.
    pub fn counter(&self, key: &str) -> i64 {
        self.0.get(key).and_then(|v| v.as_i64()).unwrap_or(0)
    }

    pub fn bump_counter(&mut self, key: &str, by: i64) -> i64 {
        let value = self.counter(key) + by;
        self.insert(key, serde_json::Value::from(value));
        value
    }
}

/// Position in the village ring of homes; neighbours are nearby slots.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeSlot(pub usize);

/// A villager entity.
#[derive(Component, Debug, Clone)]
pub struct Villager {
    pub id: VillagerId,
    pub name: String,
    pub profession: String,
    pub age: u32,
    pub spouse: Option<VillagerId>,
    pub brain: VillagerBrain,
    pub data: PersistentData,
}

impl Villager {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(VillagerId::new(), name)
    }

    pub fn with_id(id: VillagerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            profession: "none".to_string(),
            age: 0,
            spouse: None,
            brain: VillagerBrain::default(),
            data: PersistentData::default(),
        }
    }

    pub fn with_profession(mut self, profession: impl Into<String>) -> Self {
        self.profession = profession.into();
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    pub fn with_brain(mut self, brain: VillagerBrain) -> Self {
        self.brain = brain;
        self
    }

    pub fn with_spouse(mut self, spouse: VillagerId) -> Self {
        self.spouse = Some(spouse);
        self
    }

    pub fn has_spouse(&self) -> bool {
        self.spouse.is_some()
    }
}
