//! Sentinel-bounded doubly linked list stored in a [`SlotArena`].
//!
//! Two sentinel nodes are allocated when the list is created and are never
//! freed. Every real node always has a predecessor and a successor, so
//! linking and unlinking never branch on "is this the first/last node".
//!
//! ```text
//!   [HEAD] ◄──► [id_a] ◄──► [id_b] ◄──► [id_c] ◄──► [TAIL]
//!   sentinel     MRU                     LRU        sentinel
//! ```
//!
//! Nodes are addressed by [`SlotId`]; ids stay valid until the node is
//! removed. Sentinel ids are never handed out to callers.
//!
//! ## Performance
//! - `push_front`, `move_to_front`, `remove`, `pop_back`: O(1)
//! - `iter`, `check_invariants`: O(n)

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    // `None` only for the two sentinels.
    value: Option<T>,
    prev: SlotId,
    next: SlotId,
}

/// Recency-ordered list: front is most recently used, back is least.
#[derive(Debug)]
pub struct RecencyList<T> {
    arena: SlotArena<Node<T>>,
    head: SlotId,
    tail: SlotId,
}

impl<T> RecencyList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with room for `capacity` real nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut arena = SlotArena::with_capacity(capacity.saturating_add(2));
        let (head, tail) = Self::init_sentinels(&mut arena);
        Self { arena, head, tail }
    }

    fn init_sentinels(arena: &mut SlotArena<Node<T>>) -> (SlotId, SlotId) {
        let head = arena.insert(Node {
            value: None,
            prev: SlotId(0),
            next: SlotId(0),
        });
        let tail = arena.insert(Node {
            value: None,
            prev: head,
            next: SlotId(0),
        });
        if let Some(node) = arena.get_mut(head) {
            node.prev = head;
            node.next = tail;
        }
        if let Some(node) = arena.get_mut(tail) {
            node.next = tail;
        }
        (head, tail)
    }

    /// Number of real (non-sentinel) nodes.
    pub fn len(&self) -> usize {
        self.arena.len() - 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn is_sentinel(&self, id: SlotId) -> bool {
        id == self.head || id == self.tail
    }

    /// Returns `true` if `id` names a live real node.
    pub fn contains(&self, id: SlotId) -> bool {
        !self.is_sentinel(id) && self.arena.contains(id)
    }

    #[inline]
    fn links(&self, id: SlotId) -> Option<(SlotId, SlotId)> {
        self.arena.get(id).map(|node| (node.prev, node.next))
    }

    /// Id of the most recently used node.
    pub fn front_id(&self) -> Option<SlotId> {
        let (_, first) = self.links(self.head)?;
        (first != self.tail).then_some(first)
    }

    /// Id of the least recently used node.
    pub fn back_id(&self) -> Option<SlotId> {
        let (last, _) = self.links(self.tail)?;
        (last != self.head).then_some(last)
    }

    pub fn front(&self) -> Option<&T> {
        self.front_id().and_then(|id| self.get(id))
    }

    pub fn back(&self) -> Option<&T> {
        self.back_id().and_then(|id| self.get(id))
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        if self.is_sentinel(id) {
            return None;
        }
        self.arena.get(id).and_then(|node| node.value.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        if self.is_sentinel(id) {
            return None;
        }
        self.arena.get_mut(id).and_then(|node| node.value.as_mut())
    }

    /// Links a new node right after the head sentinel and returns its id.
    pub fn push_front(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value: Some(value),
            prev: self.head,
            next: self.tail,
        });
        self.link_after(self.head, id);
        id
    }

    /// Moves `id` to the front; returns `false` if `id` is not a live node.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.contains(id) {
            return false;
        }
        if self.front_id() == Some(id) {
            return true;
        }
        self.unlink(id);
        self.link_after(self.head, id);
        true
    }

    /// Unlinks `id`, frees its slot and returns the value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        self.unlink(id);
        self.arena.remove(id).and_then(|node| node.value)
    }

    /// Removes and returns the least recently used value.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.back_id()?;
        self.remove(id)
    }

    /// Removes and returns the most recently used value.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.front_id()?;
        self.remove(id)
    }

    /// Drops every real node; the sentinels are rebuilt.
    pub fn clear(&mut self) {
        self.arena.clear();
        let (head, tail) = Self::init_sentinels(&mut self.arena);
        self.head = head;
        self.tail = tail;
    }

    /// Iterates values from front (MRU) to back (LRU).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.links(self.head).map(|(_, next)| next),
            remaining: self.len(),
        }
    }

    fn unlink(&mut self, id: SlotId) {
        let Some((prev, next)) = self.links(id) else {
            return;
        };
        if let Some(node) = self.arena.get_mut(prev) {
            node.next = next;
        }
        if let Some(node) = self.arena.get_mut(next) {
            node.prev = prev;
        }
    }

    fn link_after(&mut self, anchor: SlotId, id: SlotId) {
        let Some((_, next)) = self.links(anchor) else {
            return;
        };
        if let Some(node) = self.arena.get_mut(id) {
            node.prev = anchor;
            node.next = next;
        }
        if let Some(node) = self.arena.get_mut(anchor) {
            node.next = id;
        }
        if let Some(node) = self.arena.get_mut(next) {
            node.prev = id;
        }
    }

    /// Walks the list head to tail and verifies link symmetry, sentinel
    /// placement and the node count.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let len = self.len();
        let mut current = self.head;
        let mut hops = 0usize;

        while current != self.tail {
            let node = self
                .arena
                .get(current)
                .ok_or_else(|| InvariantError::new(format!("dangling link to slot {}", current.0)))?;
            let next = node.next;
            let next_node = self
                .arena
                .get(next)
                .ok_or_else(|| InvariantError::new(format!("dangling link to slot {}", next.0)))?;
            if next_node.prev != current {
                return Err(InvariantError::new(format!(
                    "slot {} prev link does not point back to slot {}",
                    next.0, current.0
                )));
            }
            if next != self.tail && next_node.value.is_none() {
                return Err(InvariantError::new(format!(
                    "real node at slot {} carries no value",
                    next.0
                )));
            }
            hops += 1;
            if hops > len + 1 {
                return Err(InvariantError::new("cycle detected in recency list"));
            }
            current = next;
        }

        if hops != len + 1 {
            return Err(InvariantError::new(format!(
                "list walk visited {} nodes, expected {}",
                hops.saturating_sub(1),
                len
            )));
        }
        Ok(())
    }
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over list values from front to back.
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    current: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = Some(node.next);
        self.remaining -= 1;
        node.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(list: &RecencyList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn empty_list_has_only_sentinels() {
        let list: RecencyList<u32> = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.front_id(), None);
        assert_eq!(list.back_id(), None);
        assert_eq!(list.iter().count(), 0);
        list.check_invariants().unwrap();
    }

    #[test]
    fn push_front_orders_most_recent_first() {
        let mut list = RecencyList::new();
        list.push_front("a");
        list.push_front("b");
        list.push_front("c");

        assert_eq!(values(&list), vec!["c", "b", "a"]);
        assert_eq!(list.front(), Some(&"c"));
        assert_eq!(list.back(), Some(&"a"));
        list.check_invariants().unwrap();
    }

    #[test]
    fn move_to_front_from_middle_and_back() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        list.push_front("c");

        assert!(list.move_to_front(b));
        assert_eq!(values(&list), vec!["b", "c", "a"]);

        assert!(list.move_to_front(a));
        assert_eq!(values(&list), vec!["a", "b", "c"]);

        // already at the front
        assert!(list.move_to_front(a));
        assert_eq!(values(&list), vec!["a", "b", "c"]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn sentinel_ids_are_not_addressable() {
        let mut list = RecencyList::new();
        list.push_front(1);
        assert!(!list.contains(SlotId(0)));
        assert!(!list.contains(SlotId(1)));
        assert!(!list.move_to_front(SlotId(0)));
        assert_eq!(list.remove(SlotId(1)), None);
        assert_eq!(list.get(SlotId(0)), None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn remove_middle_and_ends() {
        let mut list = RecencyList::new();
        let a = list.push_front("a");
        let b = list.push_front("b");
        let c = list.push_front("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(values(&list), vec!["c", "a"]);
        assert_eq!(list.remove(b), None);

        assert_eq!(list.remove(a), Some("a"));
        assert_eq!(list.front_id(), Some(c));
        assert_eq!(list.back_id(), Some(c));

        assert_eq!(list.remove(c), Some("c"));
        assert!(list.is_empty());
        list.check_invariants().unwrap();
    }

    #[test]
    fn pop_back_returns_least_recent() {
        let mut list = RecencyList::new();
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);

        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_front(), Some(3));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), None);
        list.check_invariants().unwrap();
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut list = RecencyList::with_capacity(2);
        let a = list.push_front(1);
        list.remove(a);
        let b = list.push_front(2);
        assert_eq!(a, b);
        assert_eq!(list.get(b), Some(&2));
    }

    #[test]
    fn clear_rebuilds_sentinels() {
        let mut list = RecencyList::new();
        list.push_front(1);
        list.push_front(2);
        list.clear();
        assert!(list.is_empty());
        list.check_invariants().unwrap();

        list.push_front(3);
        assert_eq!(values(&list), vec![3]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn get_mut_updates_value_without_reordering() {
        let mut list = RecencyList::new();
        let a = list.push_front(10);
        list.push_front(20);
        if let Some(v) = list.get_mut(a) {
            *v = 11;
        }
        assert_eq!(values(&list), vec![20, 11]);
    }

    #[test]
    fn iter_reports_exact_size() {
        let mut list = RecencyList::new();
        for i in 0..5 {
            list.push_front(i);
        }
        assert_eq!(list.iter().len(), 5);
    }
}
