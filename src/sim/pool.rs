//! Live entity groups
//!
//! An unordered set of live entities with create/destroy lifecycle.
//! Iteration order carries no meaning; destroying swaps the last member
//! into the freed slot.

use serde::{Deserialize, Serialize};

/// Identifier handed out by [`EntityGroup::create`], never reused within a group
pub type EntityId = u32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityGroup<T> {
    members: Vec<(EntityId, T)>,
    next_id: EntityId,
}

impl<T> Default for EntityGroup<T> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> EntityGroup<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a live entity
    pub fn create(&mut self, entity: T) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.members.push((id, entity));
        id
    }

    /// Remove an entity, returning it if it was live
    pub fn destroy(&mut self, id: EntityId) -> Option<T> {
        let idx = self.members.iter().position(|(eid, _)| *eid == id)?;
        Some(self.members.swap_remove(idx).1)
    }

    /// Keep only entities matching `keep`; returns how many were destroyed
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) -> usize {
        let before = self.members.len();
        self.members.retain(|(_, e)| keep(e));
        before - self.members.len()
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.members.iter().find(|(eid, _)| *eid == id).map(|(_, e)| e)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.members.iter().map(|(id, e)| (*id, e))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.members.iter_mut().map(|(id, e)| (*id, e))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_destroy() {
        let mut group = EntityGroup::new();
        let a = group.create("a");
        let b = group.create("b");
        let c = group.create("c");
        assert_eq!(group.len(), 3);

        assert_eq!(group.destroy(a), Some("a"));
        assert_eq!(group.destroy(a), None);
        assert!(group.contains(b));
        assert!(group.contains(c));
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn test_ids_not_reused() {
        let mut group = EntityGroup::new();
        let a = group.create(1);
        group.destroy(a);
        let b = group.create(2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_retain_reports_removed() {
        let mut group = EntityGroup::new();
        for x in 0..10 {
            group.create(x);
        }
        let removed = group.retain(|x| x % 2 == 0);
        assert_eq!(removed, 5);
        assert!(group.iter().all(|(_, x)| x % 2 == 0));
    }
}
