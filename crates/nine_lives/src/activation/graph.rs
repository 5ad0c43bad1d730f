//! Activator → activatable wiring
//!
//! Objects name the activator that drives them by id. The graph keeps, per
//! id, the objects in registration order and evaluates every activator once
//! per frame: tick it, then push its output to each dependent.

use std::collections::HashMap;

use log::{debug, warn};
use slotmap::SlotMap;
use thiserror::Error;

use super::{Activatable, Activator, ActivatorKey};
use crate::objects::ObjectKey;
use crate::physics::WorldContext;

/// Errors raised while wiring the graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActivationError {
    /// Two activators share one id
    #[error("duplicate activator id '{0}'")]
    DuplicateId(String),
}

/// Activators and the objects they drive
#[derive(Debug, Default)]
pub struct ActivationGraph {
    activators: SlotMap<ActivatorKey, Activator>,
    by_id: HashMap<String, ActivatorKey>,
    relations: HashMap<String, Vec<ObjectKey>>,
}

impl ActivationGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an activator under its id
    pub fn add_activator(&mut self, activator: Activator) -> Result<ActivatorKey, ActivationError> {
        if self.by_id.contains_key(activator.id()) {
            return Err(ActivationError::DuplicateId(activator.id().to_owned()));
        }

        let id = activator.id().to_owned();
        let key = self.activators.insert(activator);
        self.by_id.insert(id, key);
        Ok(key)
    }

    /// Drive `object` from the activator named `id`
    ///
    /// The activator does not have to exist yet. Objects under an id that
    /// never gets an activator are simply never signalled.
    pub fn connect(&mut self, id: impl Into<String>, object: ObjectKey) {
        self.relations.entry(id.into()).or_default().push(object);
    }

    /// Activator by key
    pub fn activator(&self, key: ActivatorKey) -> Option<&Activator> {
        self.activators.get(key)
    }

    /// Activator by id
    pub fn find(&self, id: &str) -> Option<&Activator> {
        self.by_id.get(id).and_then(|key| self.activators.get(*key))
    }

    /// Key of the activator named `id`
    pub fn key_of(&self, id: &str) -> Option<ActivatorKey> {
        self.by_id.get(id).copied()
    }

    /// All activators, in registration order
    pub fn activators(&self) -> impl Iterator<Item = (ActivatorKey, &Activator)> {
        self.activators.iter()
    }

    /// Objects driven by `id`, in registration order
    pub fn dependents(&self, id: &str) -> &[ObjectKey] {
        self.relations.get(id).map_or(&[], Vec::as_slice)
    }

    /// Ids that objects refer to but no activator carries
    pub fn dangling_ids(&self) -> impl Iterator<Item = &str> {
        self.relations
            .keys()
            .filter(|id| !self.by_id.contains_key(*id))
            .map(String::as_str)
    }

    /// Whether `key` names a live activator
    pub fn contains(&self, key: ActivatorKey) -> bool {
        self.activators.contains_key(key)
    }

    /// Record a fixture starting to press `key`
    pub fn press(&mut self, key: ActivatorKey) -> bool {
        match self.activators.get_mut(key) {
            Some(activator) => {
                activator.add_press();
                true
            }
            None => false,
        }
    }

    /// Record a fixture no longer pressing `key`
    pub fn release(&mut self, key: ActivatorKey) -> bool {
        match self.activators.get_mut(key) {
            Some(activator) => {
                activator.remove_press();
                true
            }
            None => false,
        }
    }

    /// Tick every activator and push its output to its dependents
    ///
    /// Runs once per frame, after the physics step. Keys that no longer
    /// resolve to an object are skipped.
    pub fn evaluate<O: Activatable>(
        &mut self,
        objects: &mut SlotMap<ObjectKey, O>,
        ctx: &mut WorldContext<'_>,
    ) {
        for activator in self.activators.values_mut() {
            if activator.tick() {
                debug!(
                    "Activator '{}' is now {}",
                    activator.id(),
                    if activator.is_active() { "on" } else { "off" }
                );
            }

            let signal = activator.is_active();
            let Some(dependents) = self.relations.get(activator.id()) else {
                continue;
            };

            for key in dependents {
                match objects.get_mut(*key) {
                    Some(object) => {
                        object.set_signal(signal, ctx);
                    }
                    None => warn!("Activator '{}' drives a missing object", activator.id()),
                }
            }
        }
    }
}
