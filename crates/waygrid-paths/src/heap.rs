//! Indexed binary heap over items stored in an external arena.
//!
//! The queue holds arena indices; each item carries its own slot index and an
//! explicit "enqueued" flag so membership is O(1) and an improved item can be
//! repositioned in place.

use std::cmp::Ordering;

/// An arena item that can sit in a [`PriorityQueue`].
pub trait HeapItem {
    /// Slot this item occupies in the queue's backing storage.
    fn heap_index(&self) -> usize;
    fn set_heap_index(&mut self, index: usize);
    /// Whether the item is currently in the queue.
    fn is_enqueued(&self) -> bool;
    fn set_enqueued(&mut self, enqueued: bool);
    /// Priority order; `Less` means `self` should be popped first.
    fn priority_cmp(&self, other: &Self) -> Ordering;
}

/// Array-backed min-heap of arena indices with a fixed capacity.
#[derive(Debug, Clone)]
pub struct PriorityQueue {
    slots: Vec<usize>,
    capacity: usize,
}

impl PriorityQueue {
    /// Create an empty queue that can hold up to `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Raise the capacity to at least `capacity`. Never shrinks.
    pub fn reserve_capacity(&mut self, capacity: usize) {
        if capacity > self.capacity {
            self.slots.reserve(capacity - self.slots.len());
            self.capacity = capacity;
        }
    }

    /// Arena index of the best item, without removing it.
    #[inline]
    pub fn peek(&self) -> Option<usize> {
        self.slots.first().copied()
    }

    /// O(1) membership test based on the item's enqueued flag.
    #[inline]
    pub fn contains<T: HeapItem>(&self, items: &[T], id: usize) -> bool {
        items[id].is_enqueued()
    }

    /// Insert item `id`.
    ///
    /// # Panics
    ///
    /// Panics if the queue is full or the item is already enqueued.
    pub fn push<T: HeapItem>(&mut self, items: &mut [T], id: usize) {
        assert!(
            self.slots.len() < self.capacity,
            "priority queue capacity {} exceeded",
            self.capacity
        );
        assert!(!items[id].is_enqueued(), "item {id} pushed twice");
        let slot = self.slots.len();
        self.slots.push(id);
        items[id].set_heap_index(slot);
        items[id].set_enqueued(true);
        self.sift_up(items, slot);
    }

    /// Remove and return the best item, or `None` if the queue is empty.
    pub fn pop_best<T: HeapItem>(&mut self, items: &mut [T]) -> Option<usize> {
        let last = self.slots.pop()?;
        let best = if self.slots.is_empty() {
            last
        } else {
            let best = std::mem::replace(&mut self.slots[0], last);
            items[last].set_heap_index(0);
            self.sift_down(items, 0);
            best
        };
        items[best].set_enqueued(false);
        Some(best)
    }

    /// Move item `id` toward the root after its priority improved.
    ///
    /// Only ever sifts up: callers must not use this for a worsened priority.
    pub fn update_after_improvement<T: HeapItem>(&mut self, items: &mut [T], id: usize) {
        debug_assert!(items[id].is_enqueued(), "item {id} is not enqueued");
        let slot = items[id].heap_index();
        self.sift_up(items, slot);
    }

    /// Remove every item, clearing their enqueued flags.
    pub fn clear<T: HeapItem>(&mut self, items: &mut [T]) {
        for id in self.slots.drain(..) {
            items[id].set_enqueued(false);
        }
    }

    /// Whether heap order and index coupling hold for every slot.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants<T: HeapItem>(&self, items: &[T]) -> bool {
        self.slots.iter().enumerate().all(|(slot, &id)| {
            let item = &items[id];
            let coupled = item.is_enqueued() && item.heap_index() == slot;
            let ordered = slot == 0
                || items[self.slots[(slot - 1) / 2]].priority_cmp(item) != Ordering::Greater;
            coupled && ordered
        })
    }

    fn sift_up<T: HeapItem>(&mut self, items: &mut [T], mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            let (a, b) = (self.slots[slot], self.slots[parent]);
            if items[a].priority_cmp(&items[b]) != Ordering::Less {
                break;
            }
            self.swap(items, slot, parent);
            slot = parent;
        }
    }

    fn sift_down<T: HeapItem>(&mut self, items: &mut [T], mut slot: usize) {
        let len = self.slots.len();
        loop {
            let left = slot * 2 + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < len
                && items[self.slots[right]].priority_cmp(&items[self.slots[left]]) == Ordering::Less
            {
                child = right;
            }
            if items[self.slots[child]].priority_cmp(&items[self.slots[slot]]) != Ordering::Less {
                break;
            }
            self.swap(items, slot, child);
            slot = child;
        }
    }

    #[inline]
    fn swap<T: HeapItem>(&mut self, items: &mut [T], a: usize, b: usize) {
        self.slots.swap(a, b);
        items[self.slots[a]].set_heap_index(a);
        items[self.slots[b]].set_heap_index(b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Default)]
    struct Item {
        key: i32,
        slot: usize,
        queued: bool,
    }

    impl HeapItem for Item {
        fn heap_index(&self) -> usize {
            self.slot
        }
        fn set_heap_index(&mut self, index: usize) {
            self.slot = index;
        }
        fn is_enqueued(&self) -> bool {
            self.queued
        }
        fn set_enqueued(&mut self, enqueued: bool) {
            self.queued = enqueued;
        }
        fn priority_cmp(&self, other: &Self) -> Ordering {
            self.key.cmp(&other.key)
        }
    }

    fn items(keys: &[i32]) -> Vec<Item> {
        keys.iter()
            .map(|&key| Item {
                key,
                ..Item::default()
            })
            .collect()
    }

    #[test]
    fn pops_in_priority_order() {
        let mut it = items(&[5, 1, 4, 2, 3]);
        let mut q = PriorityQueue::with_capacity(it.len());
        for id in 0..it.len() {
            q.push(&mut it, id);
        }
        let mut keys = Vec::new();
        while let Some(id) = q.pop_best(&mut it) {
            keys.push(it[id].key);
        }
        assert_eq!(keys, vec![1, 2, 3, 4, 5]);
        assert!(q.pop_best(&mut it).is_none());
    }

    #[test]
    fn improvement_moves_item_to_front() {
        let mut it = items(&[10, 20, 30, 40]);
        let mut q = PriorityQueue::with_capacity(4);
        for id in 0..4 {
            q.push(&mut it, id);
        }
        it[3].key = 0;
        q.update_after_improvement(&mut it, 3);
        assert!(q.check_invariants(&it));
        assert_eq!(q.peek(), Some(3));
        assert_eq!(q.pop_best(&mut it), Some(3));
    }

    #[test]
    fn stale_index_does_not_alias() {
        // Item 0 is popped while its stale heap index (0) now belongs to item 1.
        let mut it = items(&[1, 2]);
        let mut q = PriorityQueue::with_capacity(2);
        q.push(&mut it, 0);
        q.push(&mut it, 1);
        assert_eq!(q.pop_best(&mut it), Some(0));
        assert_eq!(it[0].heap_index(), it[1].heap_index());
        assert!(!q.contains(&it, 0));
        assert!(q.contains(&it, 1));
    }

    #[test]
    fn clear_resets_flags() {
        let mut it = items(&[3, 1, 2]);
        let mut q = PriorityQueue::with_capacity(3);
        for id in 0..3 {
            q.push(&mut it, id);
        }
        q.clear(&mut it);
        assert!(q.is_empty());
        assert!(it.iter().all(|i| !i.queued));
    }

    #[test]
    #[should_panic(expected = "capacity 2 exceeded")]
    fn overflow_panics() {
        let mut it = items(&[1, 2, 3]);
        let mut q = PriorityQueue::with_capacity(2);
        for id in 0..3 {
            q.push(&mut it, id);
        }
    }

    #[test]
    #[should_panic(expected = "pushed twice")]
    fn double_push_panics() {
        let mut it = items(&[1]);
        let mut q = PriorityQueue::with_capacity(4);
        q.push(&mut it, 0);
        q.push(&mut it, 0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push(usize),
        Pop,
        Improve(usize, i32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..32).prop_map(Op::Push),
            Just(Op::Pop),
            (0usize..32, 1i32..50).prop_map(|(id, by)| Op::Improve(id, by)),
        ]
    }

    proptest! {
        #[test]
        fn interleaved_ops_keep_heap_and_membership(
            keys in prop::collection::vec(0i32..1000, 32),
            ops in prop::collection::vec(op(), 0..200),
        ) {
            let mut it = items(&keys);
            let mut q = PriorityQueue::with_capacity(it.len());
            let mut live = vec![false; it.len()];

            for op in ops {
                match op {
                    Op::Push(id) if !live[id] => {
                        q.push(&mut it, id);
                        live[id] = true;
                    }
                    Op::Push(_) => {}
                    Op::Pop => {
                        let expected = live
                            .iter()
                            .enumerate()
                            .filter(|(_, l)| **l)
                            .map(|(id, _)| it[id].key)
                            .min();
                        match q.pop_best(&mut it) {
                            Some(id) => {
                                prop_assert_eq!(Some(it[id].key), expected);
                                live[id] = false;
                            }
                            None => prop_assert!(expected.is_none()),
                        }
                    }
                    Op::Improve(id, by) if live[id] => {
                        it[id].key -= by;
                        q.update_after_improvement(&mut it, id);
                    }
                    Op::Improve(..) => {}
                }
                prop_assert!(q.check_invariants(&it));
                for (id, l) in live.iter().enumerate() {
                    prop_assert_eq!(q.contains(&it, id), *l);
                }
                prop_assert_eq!(q.len(), live.iter().filter(|l| **l).count());
            }
        }
    }
}
