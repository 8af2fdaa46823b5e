//! Slot store for simulation entities.
//!
//! Entities are killed in place while the tick iterates over them and the
//! dead slots are dropped in one [`Store::compact`] pass afterwards, so
//! removal never shifts indices under a running loop.

use brawl_common::EntityId;
use serde::{Deserialize, Serialize};

/// One stored entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot<T> {
    id: EntityId,
    alive: bool,
    /// The entity itself.
    pub value: T,
}

impl<T> Slot<T> {
    /// Id of the stored entity.
    #[must_use]
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Marks the entity for removal at the next compaction.
    pub fn kill(&mut self) {
        self.alive = false;
    }
}

/// Insertion-ordered entity collection with deferred removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Store<T> {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Appends a live entity.
    pub fn insert(&mut self, id: EntityId, value: T) {
        self.slots.push(Slot {
            id,
            alive: true,
            value,
        });
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.alive).count()
    }

    /// Whether no live entity remains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live entity by id.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.slots
            .iter()
            .find(|s| s.alive && s.id == id)
            .map(|s| &s.value)
    }

    /// Mutable live entity by id.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.slots
            .iter_mut()
            .find(|s| s.alive && s.id == id)
            .map(|s| &mut s.value)
    }

    /// Live entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.slots
            .iter()
            .filter(|s| s.alive)
            .map(|s| (s.id, &s.value))
    }

    /// Live slots, mutably, in insertion order.
    pub fn live_mut(&mut self) -> impl Iterator<Item = &mut Slot<T>> {
        self.slots.iter_mut().filter(|s| s.alive)
    }

    /// Mutable live entities in insertion order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.live_mut().map(|s| &mut s.value)
    }

    /// Drops dead slots. Returns how many were removed.
    pub fn compact(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|s| s.alive);
        before - self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> EntityId {
        EntityId::from_raw(n)
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = Store::new();
        store.insert(id(1), "a");
        store.insert(id(2), "b");

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(id(2)), Some(&"b"));
        assert_eq!(store.get(id(3)), None);
    }

    #[test]
    fn test_kill_hides_until_compact() {
        let mut store = Store::new();
        store.insert(id(1), 10);
        store.insert(id(2), 20);
        store.insert(id(3), 30);

        for slot in store.live_mut().filter(|s| s.id() == id(2)) {
            slot.kill();
        }
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(id(2)), None);

        assert_eq!(store.compact(), 1);
        assert_eq!(store.compact(), 0);
        let ids: Vec<_> = store.iter().map(|(id, _)| id.raw()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_kill_during_iteration() {
        let mut store = Store::new();
        for n in 1..=5 {
            store.insert(id(n), n);
        }

        for slot in store.live_mut() {
            if slot.value % 2 == 0 {
                slot.kill();
            }
        }

        let left: Vec<_> = store.iter().map(|(_, v)| *v).collect();
        assert_eq!(left, vec![1, 3, 5]);
    }
}
