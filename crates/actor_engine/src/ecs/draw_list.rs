//! # Draw List
//!
//! Sprites sorted ascending by draw order for back-to-front rendering.
//! Insertion goes before the first entry with a strictly greater order, so
//! sprites sharing an order keep their registration order. Reordering one
//! sprite is a remove plus a sorted insert; the list is never re-sorted as a
//! whole.

use crate::foundation::collections::{ActorId, SpriteKey};

/// One registered sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawEntry {
    /// Sprite being drawn
    pub key: SpriteKey,
    /// Its draw order at registration
    pub order: i32,
}

/// Ordered list of registered sprites
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    entries: Vec<DrawEntry>,
}

impl DrawList {
    /// Create an empty draw list
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sprite at its sorted position.
    ///
    /// Returns `false` without changing anything if the sprite is already
    /// registered.
    pub fn insert(&mut self, key: SpriteKey, order: i32) -> bool {
        if self.contains(key) {
            return false;
        }
        let index = self.entries.partition_point(|entry| entry.order <= order);
        self.entries.insert(index, DrawEntry { key, order });
        true
    }

    /// Remove a sprite, returning its order if it was registered
    pub fn remove(&mut self, key: SpriteKey) -> Option<i32> {
        let index = self.position(key)?;
        Some(self.entries.remove(index).order)
    }

    /// Move a registered sprite to the sorted position for a new order.
    ///
    /// The sprite lands after any existing sprites with the same order.
    pub fn reorder(&mut self, key: SpriteKey, order: i32) -> bool {
        if self.remove(key).is_none() {
            return false;
        }
        self.insert(key, order)
    }

    /// Remove every sprite owned by an actor, returning how many were removed
    pub fn remove_actor(&mut self, actor: ActorId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.key.actor != actor);
        before - self.entries.len()
    }

    /// Whether the sprite is registered
    pub fn contains(&self, key: SpriteKey) -> bool {
        self.position(key).is_some()
    }

    /// Registered order of a sprite
    pub fn order_of(&self, key: SpriteKey) -> Option<i32> {
        self.position(key).map(|index| self.entries[index].order)
    }

    /// Entries in draw order
    pub fn iter(&self) -> impl Iterator<Item = &DrawEntry> {
        self.entries.iter()
    }

    /// Sprite keys in draw order
    pub fn keys(&self) -> impl Iterator<Item = SpriteKey> + '_ {
        self.entries.iter().map(|entry| entry.key)
    }

    /// Number of registered sprites
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether orders are non-decreasing
    pub fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|pair| pair[0].order <= pair[1].order)
    }

    fn position(&self, key: SpriteKey) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::{ComponentId, SlotMap};

    fn keys(count: usize) -> Vec<SpriteKey> {
        let mut actors: SlotMap<ActorId, ()> = SlotMap::with_key();
        (0..count)
            .map(|_| SpriteKey::new(actors.insert(()), ComponentId::new(0)))
            .collect()
    }

    #[test]
    fn test_registration_order_scenario() {
        let k = keys(4);
        let mut list = DrawList::new();

        for (key, order) in k.iter().zip([50, 100, 100, 10]) {
            assert!(list.insert(*key, order));
        }

        let drawn: Vec<_> = list.keys().collect();
        assert_eq!(drawn, vec![k[3], k[0], k[1], k[2]]);
        assert!(list.is_sorted());
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let k = keys(1);
        let mut list = DrawList::new();

        assert!(list.insert(k[0], 5));
        assert!(!list.insert(k[0], 7));
        assert_eq!(list.len(), 1);
        assert_eq!(list.order_of(k[0]), Some(5));
    }

    #[test]
    fn test_reorder_moves_after_equal_orders() {
        let k = keys(3);
        let mut list = DrawList::new();
        list.insert(k[0], 100);
        list.insert(k[1], 100);
        list.insert(k[2], 200);

        assert!(list.reorder(k[0], 100));
        assert_eq!(list.keys().collect::<Vec<_>>(), vec![k[1], k[0], k[2]]);

        assert!(list.reorder(k[2], 1));
        assert_eq!(list.keys().collect::<Vec<_>>(), vec![k[2], k[1], k[0]]);
        assert!(!list.reorder(keys(1)[0], 3));
    }

    #[test]
    fn test_sorted_after_mixed_operations() {
        let k = keys(12);
        let mut list = DrawList::new();
        let orders = [7, -3, 7, 100, 0, 42, 7, -3, 15, 100, 8, 1];

        for (key, order) in k.iter().zip(orders) {
            list.insert(*key, order);
        }
        list.remove(k[3]);
        list.remove(k[7]);
        list.reorder(k[0], 50);
        list.reorder(k[5], -10);
        list.remove(k[11]);
        list.insert(k[11], 7);

        assert!(list.is_sorted());
        assert_eq!(list.len(), 11);

        // Equal orders keep the order they were (re)registered in
        let sevens: Vec<_> = list.iter().filter(|e| e.order == 7).map(|e| e.key).collect();
        assert_eq!(sevens, vec![k[2], k[6], k[11]]);
    }

    #[test]
    fn test_remove_actor_entries() {
        let mut actors: SlotMap<ActorId, ()> = SlotMap::with_key();
        let a = actors.insert(());
        let b = actors.insert(());
        let mut list = DrawList::new();
        list.insert(SpriteKey::new(a, ComponentId::new(0)), 1);
        list.insert(SpriteKey::new(b, ComponentId::new(0)), 2);
        list.insert(SpriteKey::new(a, ComponentId::new(1)), 3);

        assert_eq!(list.remove_actor(a), 2);
        assert_eq!(list.len(), 1);
        assert!(list.contains(SpriteKey::new(b, ComponentId::new(0))));
    }
}
