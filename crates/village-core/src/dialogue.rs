//! Dialogue Outbox
//!
//! Requests for generated dialogue are queued here during a tick and handed
//! to the platform afterwards. Nothing in the core waits on a reply.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::VillagerId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueRequest {
    pub villager: VillagerId,
    pub partner: Option<VillagerId>,
    pub topic: String,
    pub tick: u64,
}

#[derive(Resource, Debug, Default)]
pub struct DialogueOutbox {
    requests: Vec<DialogueRequest>,
}

impl DialogueOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, request: DialogueRequest) {
        self.requests.push(request);
    }

    pub fn drain(&mut self) -> Vec<DialogueRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }
}
