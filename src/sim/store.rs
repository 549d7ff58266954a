//! Capacity-bounded, index-stable entity storage
//!
//! Entities are appended and never removed. A consumed entity keeps its slot so
//! indices recorded earlier (projectile ids, event payloads) stay valid.

use serde::{Deserialize, Serialize};

use super::error::SimError;

/// Whether an entity still takes part in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lifecycle {
    #[default]
    Active,
    /// Terminal. Position is frozen and the entity is skipped everywhere.
    Consumed,
}

/// Anything stored in an `EntityStore`
pub trait Entity {
    fn lifecycle(&self) -> Lifecycle;
    fn set_lifecycle(&mut self, lifecycle: Lifecycle);

    #[inline]
    fn is_active(&self) -> bool {
        self.lifecycle() == Lifecycle::Active
    }

    /// Mark consumed. Returns false if it already was.
    fn consume(&mut self) -> bool {
        if self.is_active() {
            self.set_lifecycle(Lifecycle::Consumed);
            true
        } else {
            false
        }
    }
}

/// Append-only storage with a hard capacity
#[derive(Debug, Clone)]
pub struct EntityStore<T> {
    name: &'static str,
    capacity: usize,
    items: Vec<T>,
}

impl<T: Entity> EntityStore<T> {
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            capacity,
            // Grow lazily; capacity is a cap, not a preallocation.
            items: Vec::new(),
        }
    }

    /// Append an entity, returning its index
    pub fn push(&mut self, item: T) -> Result<usize, SimError> {
        if self.items.len() >= self.capacity {
            return Err(SimError::CapacityExceeded {
                store: self.name,
                capacity: self.capacity,
            });
        }
        self.items.push(item);
        Ok(self.items.len() - 1)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total entities ever stored (active and consumed)
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// All slots in index order, consumed included
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    /// Active entities with their indices
    pub fn active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.items.iter().enumerate().filter(|(_, e)| e.is_active())
    }

    pub fn active_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.items
            .iter_mut()
            .enumerate()
            .filter(|(_, e)| e.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|e| e.is_active()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Default)]
    struct Dummy {
        life: Lifecycle,
    }

    impl Entity for Dummy {
        fn lifecycle(&self) -> Lifecycle {
            self.life
        }
        fn set_lifecycle(&mut self, lifecycle: Lifecycle) {
            self.life = lifecycle;
        }
    }

    #[test]
    fn test_push_until_full() {
        let mut store = EntityStore::new("dummy", 2);
        assert_eq!(store.push(Dummy::default()), Ok(0));
        assert_eq!(store.push(Dummy::default()), Ok(1));
        assert!(store.is_full());
        assert_eq!(
            store.push(Dummy::default()),
            Err(SimError::CapacityExceeded {
                store: "dummy",
                capacity: 2
            })
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_consume_once_keeps_slot() {
        let mut store = EntityStore::new("dummy", 4);
        store.push(Dummy::default()).unwrap();
        store.push(Dummy::default()).unwrap();

        assert!(store.get_mut(0).unwrap().consume());
        assert!(!store.get_mut(0).unwrap().consume());

        assert_eq!(store.len(), 2);
        assert_eq!(store.active_count(), 1);
        let active: Vec<usize> = store.active().map(|(i, _)| i).collect();
        assert_eq!(active, vec![1]);
    }

    proptest! {
        #[test]
        fn prop_push_respects_capacity(capacity in 1usize..64, pushes in 0usize..128) {
            let mut store = EntityStore::new("dummy", capacity);
            let accepted = (0..pushes)
                .filter(|_| store.push(Dummy::default()).is_ok())
                .count();
            prop_assert_eq!(accepted, pushes.min(capacity));
            prop_assert_eq!(store.len(), accepted);
        }
    }
}
