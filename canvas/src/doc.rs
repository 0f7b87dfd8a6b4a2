//! Document model: the ordered entity store shared by both editors.
//!
//! Racks and wall images implement [`Entity`]; [`EntityStore`] owns them in
//! insertion order together with the editor's single selection. Mutations are
//! copy-on-write over an `Arc<Vec<_>>`, so a [`Snapshot`] handed to the
//! renderer or to a persistence request never changes underneath its holder.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt::Debug;
use std::sync::Arc;

/// Immutable view of a store's entities at one point in time.
pub type Snapshot<E> = Arc<Vec<E>>;

/// A placed, positioned object on an editor canvas.
pub trait Entity: Clone {
    /// Identifier, unique within one store.
    type Id: Clone + PartialEq + Debug;
    /// Sparse update; only present fields are applied.
    type Patch;

    fn id(&self) -> &Self::Id;

    fn set_id(&mut self, id: Self::Id);

    /// Pick an id for this entity that `taken` rejects nowhere, preferring
    /// the entity's current id when it is free.
    fn unique_id(&self, taken: &dyn Fn(&Self::Id) -> bool) -> Self::Id;

    /// Merge `patch` into this entity.
    fn apply(&mut self, patch: &Self::Patch);
}

/// In-memory, ordered store of entities keyed by unique id.
#[derive(Debug, Clone)]
pub struct EntityStore<E: Entity> {
    entities: Snapshot<E>,
    selected: Option<E::Id>,
}

impl<E: Entity> EntityStore<E> {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { entities: Arc::new(Vec::new()), selected: None }
    }

    /// Cheap shared view of the current entities.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<E> {
        Arc::clone(&self.entities)
    }

    /// Entities in insertion order (first = bottom of the stack).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &E> {
        self.entities.iter()
    }

    #[must_use]
    pub fn get(&self, id: &E::Id) -> Option<&E> {
        self.entities.iter().find(|e| e.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &E::Id) -> bool {
        self.get(id).is_some()
    }

    /// Append an entity, assigning it an id unique within the store.
    pub fn add(&mut self, mut entity: E) -> E::Id {
        let id = entity.unique_id(&|candidate| self.contains(candidate));
        entity.set_id(id.clone());
        Arc::make_mut(&mut self.entities).push(entity);
        id
    }

    /// Merge `patch` into the entity with `id`. Returns false (and changes
    /// nothing) if no such entity exists.
    pub fn update(&mut self, id: &E::Id, patch: &E::Patch) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        Arc::make_mut(&mut self.entities)[index].apply(patch);
        true
    }

    /// Remove an entity by id, returning it if it was present. Clears the
    /// selection when it pointed at the removed entity.
    pub fn remove(&mut self, id: &E::Id) -> Option<E> {
        let index = self.position(id)?;
        let removed = Arc::make_mut(&mut self.entities).remove(index);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        Some(removed)
    }

    /// Replace all entities wholesale. Later entries repeating an earlier id
    /// are dropped; returns how many were dropped.
    pub fn replace_all(&mut self, entities: Vec<E>) -> usize {
        let total = entities.len();
        let mut kept: Vec<E> = Vec::with_capacity(total);
        for entity in entities {
            if kept.iter().all(|k| k.id() != entity.id()) {
                kept.push(entity);
            }
        }
        let dropped = total - kept.len();
        self.entities = Arc::new(kept);
        if let Some(selected) = &self.selected {
            if !self.contains(selected) {
                self.selected = None;
            }
        }
        dropped
    }

    // --- Selection ---

    /// Select an entity. Returns false (selection unchanged) if `id` is absent.
    pub fn select(&mut self, id: &E::Id) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.selected = Some(id.clone());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub fn selected(&self) -> Option<&E::Id> {
        self.selected.as_ref()
    }

    /// The selected entity, if any.
    #[must_use]
    pub fn selected_entity(&self) -> Option<&E> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn position(&self, id: &E::Id) -> Option<usize> {
        self.entities.iter().position(|e| e.id() == id)
    }
}

impl<E: Entity> Default for EntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}
