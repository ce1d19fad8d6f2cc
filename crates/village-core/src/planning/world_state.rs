//! World State
//!
//! A sparse, typed fact store. Reading a fact that was never set (or was
//! set with another type) yields the type's default rather than an error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single fact value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fact {
    Bool(bool),
    Int(i64),
    Float(f32),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    facts: HashMap<String, Fact>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bool(mut self, key: impl Into<String>, value: bool) -> Self {
        self.set_bool(key, value);
        self
    }

    pub fn with_int(mut self, key: impl Into<String>, value: i64) -> Self {
        self.set_int(key, value);
        self
    }

    pub fn with_float(mut self, key: impl Into<String>, value: f32) -> Self {
        self.set_float(key, value);
        self
    }

    pub fn get_bool(&self, key: &str) -> bool {
        match self.facts.get(key) {
            Some(Fact::Bool(value)) => *value,
            _ => false,
        }
    }

    pub fn get_int(&self, key: &str) -> i64 {
        match self.facts.get(key) {
            Some(Fact::Int(value)) => *value,
            _ => 0,
        }
    }

    pub fn get_float(&self, key: &str) -> f32 {
        match self.facts.get(key) {
            Some(Fact::Float(value)) => *value,
            _ => 0.0,
        }
    }

    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) {
        self.facts.insert(key.into(), Fact::Bool(value));
    }

    pub fn set_int(&mut self, key: impl Into<String>, value: i64) {
        self.facts.insert(key.into(), Fact::Int(value));
    }

    pub fn set_float(&mut self, key: impl Into<String>, value: f32) {
        self.facts.insert(key.into(), Fact::Float(value));
    }

    pub fn get(&self, key: &str) -> Option<Fact> {
        self.facts.get(key).copied()
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.facts.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.facts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Fact)> {
        self.facts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Overwrites every fact present in `effects`.
    pub fn apply_effects(&mut self, effects: &WorldState) {
        for (key, value) in &effects.facts {
            self.facts.insert(key.clone(), *value);
        }
    }

    /// True if `desired` is non-empty and every desired fact holds here.
    pub fn satisfies(&self, desired: &WorldState) -> bool {
        !desired.is_empty()
            && desired
                .facts
                .iter()
                .all(|(key, value)| self.facts.get(key) == Some(value))
    }
}
