//! Indexed min-heap over vertices
//!
//! A mutable priority map from vertex id to a [`Cost`] priority with
//! decrease-key, used by the potential-update loop and by Dijkstra.
//! Design based on CaDiCaL's heap.hpp via the VSIDS heap: a binary heap of
//! vertex ids plus a position map, with an invalid-position sentinel
//! marking ids that are not in the queue.

use csisat2_core::VarId;

use crate::graph::Cost;

/// Invalid heap position marker (vertex not in the queue).
const INVALID_POS: u32 = u32::MAX;

/// Indexed binary min-heap keyed by [`VarId`].
#[derive(Debug, Clone)]
pub(crate) struct IndexedHeap {
    /// Heap of vertex ids, ordered by `keys`.
    heap: Vec<u32>,
    /// Position of each vertex in `heap`, or `INVALID_POS`.
    pos: Vec<u32>,
    /// Current priority of each vertex; meaningful only while queued.
    keys: Vec<Cost>,
}

impl IndexedHeap {
    /// An empty queue over `num_vertices` ids.
    pub(crate) fn new(num_vertices: usize) -> Self {
        IndexedHeap {
            heap: Vec::with_capacity(num_vertices),
            pos: vec![INVALID_POS; num_vertices],
            keys: vec![Cost::ZERO; num_vertices],
        }
    }

    /// True when no vertex is queued.
    #[allow(dead_code)]
    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether `v` is currently queued.
    #[allow(dead_code)]
    pub(crate) fn contains(&self, v: VarId) -> bool {
        self.pos[v.index()] != INVALID_POS
    }

    /// The queued priority of `v`, if any.
    #[allow(dead_code)]
    pub(crate) fn key(&self, v: VarId) -> Option<Cost> {
        self.contains(v).then(|| self.keys[v.index()])
    }

    /// Insert `v` with priority `key`, or decrease its priority to `key`.
    ///
    /// Increases are ignored; returns true when the queue changed.
    pub(crate) fn insert_or_decrease(&mut self, v: VarId, key: Cost) -> bool {
        let idx = v.index();
        if self.pos[idx] == INVALID_POS {
            self.keys[idx] = key;
            self.pos[idx] = self.heap.len() as u32;
            self.heap.push(v.0);
            self.sift_up(self.heap.len() - 1);
            true
        } else if key < self.keys[idx] {
            self.keys[idx] = key;
            self.sift_up(self.pos[idx] as usize);
            true
        } else {
            false
        }
    }

    /// The minimum entry without removing it.
    pub(crate) fn peek(&self) -> Option<(VarId, Cost)> {
        let &top = self.heap.first()?;
        Some((VarId(top), self.keys[top as usize]))
    }

    /// Remove `v` from the queue, returning its priority.
    pub(crate) fn remove(&mut self, v: VarId) -> Option<Cost> {
        let idx = v.index();
        let pos = self.pos[idx];
        if pos == INVALID_POS {
            return None;
        }
        let pos = pos as usize;
        let last = self.heap.len() - 1;
        self.heap.swap(pos, last);
        self.pos[self.heap[pos] as usize] = pos as u32;
        self.heap.pop();
        self.pos[idx] = INVALID_POS;
        if pos < self.heap.len() {
            // The swapped-in id may violate the order in either direction.
            self.sift_down(pos);
            self.sift_up(self.pos[self.heap[pos] as usize] as usize);
        }
        Some(self.keys[idx])
    }

    /// Remove and return the minimum entry.
    pub(crate) fn pop_min(&mut self) -> Option<(VarId, Cost)> {
        let (v, key) = self.peek()?;
        self.remove(v);
        Some((v, key))
    }

    fn key_at(&self, pos: usize) -> Cost {
        self.keys[self.heap[pos] as usize]
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.key_at(pos) < self.key_at(parent) {
                self.swap_entries(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        loop {
            let left = 2 * pos + 1;
            if left >= self.heap.len() {
                break;
            }
            let right = left + 1;
            let mut smallest = left;
            if right < self.heap.len() && self.key_at(right) < self.key_at(left) {
                smallest = right;
            }
            if self.key_at(smallest) < self.key_at(pos) {
                self.swap_entries(pos, smallest);
                pos = smallest;
            } else {
                break;
            }
        }
    }

    fn swap_entries(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.pos[self.heap[a] as usize] = a as u32;
        self.pos[self.heap[b] as usize] = b as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost(w: f64) -> Cost {
        Cost::new(w, 0)
    }

    #[test]
    fn pops_in_priority_order() {
        let mut heap = IndexedHeap::new(5);
        assert!(heap.is_empty());
        heap.insert_or_decrease(VarId(3), cost(2.0));
        heap.insert_or_decrease(VarId(1), cost(-1.0));
        heap.insert_or_decrease(VarId(4), cost(0.5));
        assert_eq!(heap.pop_min(), Some((VarId(1), cost(-1.0))));
        assert_eq!(heap.pop_min(), Some((VarId(4), cost(0.5))));
        assert_eq!(heap.pop_min(), Some((VarId(3), cost(2.0))));
        assert_eq!(heap.pop_min(), None);
    }

    #[test]
    fn decrease_key_reorders() {
        let mut heap = IndexedHeap::new(4);
        heap.insert_or_decrease(VarId(0), cost(3.0));
        heap.insert_or_decrease(VarId(1), cost(2.0));
        // Increases are ignored.
        assert!(!heap.insert_or_decrease(VarId(1), cost(5.0)));
        assert_eq!(heap.key(VarId(1)), Some(cost(2.0)));
        assert!(heap.insert_or_decrease(VarId(0), cost(-1.0)));
        assert_eq!(heap.peek(), Some((VarId(0), cost(-1.0))));
    }

    #[test]
    fn epsilon_counts_break_weight_ties() {
        let mut heap = IndexedHeap::new(3);
        heap.insert_or_decrease(VarId(0), Cost::new(1.0, 0));
        heap.insert_or_decrease(VarId(1), Cost::new(1.0, -1));
        assert_eq!(heap.pop_min().map(|(v, _)| v), Some(VarId(1)));
    }

    #[test]
    fn remove_keeps_heap_consistent() {
        let mut heap = IndexedHeap::new(6);
        for (i, w) in [4.0, 1.0, 3.0, 0.0, 2.0].iter().enumerate() {
            heap.insert_or_decrease(VarId(i as u32), cost(*w));
        }
        assert_eq!(heap.remove(VarId(3)), Some(cost(0.0)));
        assert!(!heap.contains(VarId(3)));
        assert_eq!(heap.remove(VarId(3)), None);
        let mut order = Vec::new();
        while let Some((v, _)) = heap.pop_min() {
            order.push(v.0);
        }
        assert_eq!(order, vec![1, 4, 2, 0]);
    }
}
