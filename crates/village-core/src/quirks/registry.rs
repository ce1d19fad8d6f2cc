//! Quirk Registry
//!
//! Process-wide catalog of quirk definitions. Registration happens at
//! startup; lookups may come from any worker thread.

use bevy_ecs::prelude::*;
use std::sync::{Arc, PoisonError, RwLock};

use super::definition::QuirkDefinition;
use crate::components::Villager;
use crate::config::AiConfig;
use crate::error::RegistryError;

#[derive(Resource, Debug)]
pub struct QuirkRegistry {
    quirks: RwLock<Vec<Arc<QuirkDefinition>>>,
    default_weight: f32,
}

impl Default for QuirkRegistry {
    fn default() -> Self {
        Self::from_config(&AiConfig::default())
    }
}

impl QuirkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AiConfig) -> Self {
        Self {
            quirks: RwLock::new(Vec::new()),
            default_weight: config.default_quirk_weight,
        }
    }

    /// Weight reported for quirks that declare none.
    pub fn default_weight(&self) -> f32 {
        self.default_weight
    }

    /// Adds a quirk. Ids are unique; a second registration under the same id
    /// is rejected and leaves the registry unchanged.
    pub fn register(&self, quirk: QuirkDefinition) -> Result<(), RegistryError> {
        let mut quirks = self.quirks.write().unwrap_or_else(PoisonError::into_inner);
        if quirks.iter().any(|q| q.id() == quirk.id()) {
            return Err(RegistryError::DuplicateQuirk {
                id: quirk.id().to_string(),
            });
        }
        tracing::debug!(quirk = quirk.id(), "registered quirk");
        quirks.push(Arc::new(quirk));
        Ok(())
    }

    /// Quirks whose precondition holds for `villager`, in registration order.
    pub fn get_applicable_quirks(&self, villager: Option<&Villager>) -> Vec<Arc<QuirkDefinition>> {
        let Some(villager) = villager else {
            return Vec::new();
        };
        self.quirks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|q| q.can_apply(villager))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<Arc<QuirkDefinition>> {
        self.quirks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|q| q.id() == id)
            .cloned()
    }

    /// Weight of `quirk` for `villager`, falling back to the configured default.
    pub fn weight_of(&self, quirk: &QuirkDefinition, villager: &Villager) -> f32 {
        quirk.get_weight(villager, self.default_weight)
    }

    pub fn clear(&self) {
        self.quirks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.quirks.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
