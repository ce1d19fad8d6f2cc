//! Quirk Definitions
//!
//! A quirk is a small, optional behaviour attached to villagers whose state
//! satisfies its precondition. Definitions are immutable once registered.

use std::fmt;
use std::sync::Arc;

use crate::components::Villager;
use crate::error::QuirkError;

pub type QuirkPrecondition = Arc<dyn Fn(&Villager) -> bool + Send + Sync>;
pub type QuirkWeight = Arc<dyn Fn(&Villager) -> f32 + Send + Sync>;
pub type QuirkAction = Arc<dyn Fn(&mut Villager) -> Result<(), QuirkError> + Send + Sync>;

/// A named quirk with optional precondition, weight and action.
#[derive(Clone)]
pub struct QuirkDefinition {
    id: String,
    name: String,
    precondition: Option<QuirkPrecondition>,
    weight: Option<QuirkWeight>,
    action: Option<QuirkAction>,
}

impl QuirkDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            precondition: None,
            weight: None,
            action: None,
        }
    }

    pub fn with_precondition<F>(mut self, precondition: F) -> Self
    where
        F: Fn(&Villager) -> bool + Send + Sync + 'static,
    {
        self.precondition = Some(Arc::new(precondition));
        self
    }

    pub fn with_weight<F>(mut self, weight: F) -> Self
    where
        F: Fn(&Villager) -> f32 + Send + Sync + 'static,
    {
        self.weight = Some(Arc::new(weight));
        self
    }

    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut Villager) -> Result<(), QuirkError> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when no precondition was supplied.
    pub fn can_apply(&self, villager: &Villager) -> bool {
        self.precondition.as_ref().map_or(true, |check| check(villager))
    }

    /// The quirk's weight for `villager`, or `default_weight` if it declares none.
    pub fn get_weight(&self, villager: &Villager, default_weight: f32) -> f32 {
        self.weight
            .as_ref()
            .map_or(default_weight, |weight| weight(villager))
    }

    /// Runs the action. A quirk without an action succeeds and changes nothing.
    pub fn apply(&self, villager: &mut Villager) -> Result<(), QuirkError> {
        match &self.action {
            Some(action) => action(villager),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for QuirkDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuirkDefinition")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("has_precondition", &self.precondition.is_some())
            .field("has_weight", &self.weight.is_some())
            .field("has_action", &self.action.is_some())
            .finish()
    }
}
