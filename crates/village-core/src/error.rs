//! Error Types
//!
//! Configuration mistakes fail the call that made them. Execution failures
//! are values the caller logs and moves past.

use thiserror::Error;
use uuid::Uuid;

use crate::social::SocialRole;

/// Errors raised by the quirk registry.
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("quirk '{id}' is already registered")]
    DuplicateQuirk { id: String },
}

/// A quirk action that could not complete.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QuirkError {
    #[error("quirk '{quirk}' failed: {reason}")]
    Failed { quirk: String, reason: String },
}

impl QuirkError {
    pub fn failed(quirk: impl Into<String>, reason: impl Into<String>) -> Self {
        QuirkError::Failed {
            quirk: quirk.into(),
            reason: reason.into(),
        }
    }
}

/// Why an action's execution did not take effect.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    #[error("no villagers nearby")]
    NoNearbyVillagers,
    #[error("precondition no longer holds: {0}")]
    PreconditionLost(String),
}

/// Errors from mutating villager state.
#[derive(Debug, Error)]
pub enum VillagerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("role transition {from} -> {to} is not allowed")]
    ForbiddenRoleTransition { from: SocialRole, to: SocialRole },
    #[error("villager {0} not found")]
    NotFound(Uuid),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}
