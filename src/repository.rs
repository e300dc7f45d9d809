// 🗃️ Repository - Generic in-memory entity store
//
// Vec-backed and insertion-ordered. A pure data structure: integrity
// rules (does the owner exist, is the email taken) live in the facade,
// and a missing id is a routine Option / no-op outcome, never an error.

use crate::entities::{Entity, Patch};
use crate::error::Result;

pub struct InMemoryRepository<T: Entity> {
    items: Vec<T>,
}

impl<T: Entity> InMemoryRepository<T> {
    /// Create a new empty repository.
    pub fn new() -> Self {
        InMemoryRepository { items: Vec::new() }
    }

    /// Insert keyed by id. An existing id is overwritten silently,
    /// keeping its original position in the order.
    ///
    /// Callers never supply an existing id in practice (ids are
    /// generated, not user-supplied); the facade leans on the overwrite
    /// to write back modified clones.
    pub fn add(&mut self, entity: T) {
        match self.items.iter().position(|item| item.id() == entity.id()) {
            Some(index) => self.items[index] = entity,
            None => self.items.push(entity),
        }
    }

    /// Get an entity by id, or None.
    pub fn get(&self, id: &str) -> Option<T> {
        self.items.iter().find(|item| item.id() == id).cloned()
    }

    /// Snapshot of all entities in insertion order. Mutating the
    /// returned sequence does not affect the store.
    pub fn get_all(&self) -> Vec<T> {
        self.items.clone()
    }

    /// First entity (insertion order) whose named attribute matches.
    /// Used for uniqueness checks (email, amenity name).
    pub fn get_by_attribute(&self, name: &str, value: &str) -> Option<T> {
        self.items
            .iter()
            .find(|item| item.attribute(name).as_deref() == Some(value))
            .cloned()
    }

    /// Delegate a partial update to the stored entity's own `update`.
    /// Silently a no-op when the id is absent; existence reporting is
    /// the caller's concern.
    pub fn update(&mut self, id: &str, patch: &Patch) -> Result<()> {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(entity) => entity.update(patch),
            None => Ok(()),
        }
    }

    /// Remove the entry if present; no-op if absent.
    pub fn delete(&mut self, id: &str) {
        self.items.retain(|item| item.id() != id);
    }

    /// Count stored entities.
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
