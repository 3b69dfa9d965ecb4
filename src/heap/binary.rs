use std::hash::Hash;

use fxhash::FxHashMap;

use crate::errors::{FlowError, FlowResult};

use super::MinHeap;

/// A heap entry; `seq` breaks ties between equal values so entries are
/// totally ordered even when `V` only implements `PartialOrd`.
struct Entry<K, V> {
    value: V,
    seq: u64,
    key: K,
}

impl<K, V: PartialOrd> Entry<K, V> {
    fn before(&self, other: &Self) -> bool {
        self.value < other.value || (self.value == other.value && self.seq < other.seq)
    }
}

/// A binary heap with lazy deletion.
///
/// There is no efficient way to locate a key inside the array, so updates
/// push a fresh `(value, seq, key)` entry without removing the old one. The
/// side map from key to its current value is authoritative: entries whose
/// recorded value no longer matches it are stale and skipped by
/// `min`/`pop`.
pub struct LazyBinaryHeap<K, V> {
    heap: Vec<Entry<K, V>>,
    values: FxHashMap<K, V>,
    seq: u64,
}

impl<K, V> Default for LazyBinaryHeap<K, V> {
    fn default() -> Self {
        Self {
            heap: Vec::new(),
            values: FxHashMap::default(),
            seq: 0,
        }
    }
}

impl<K, V> LazyBinaryHeap<K, V>
where
    K: Copy + Eq + Hash,
    V: PartialOrd + Copy,
{
    fn push(&mut self, key: K, value: V) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Entry { value, seq, key });
        self.sift_up(self.heap.len() - 1);
    }

    /// Removes the root entry and restores the heap invariant
    fn pop_entry(&mut self) -> Entry<K, V> {
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let entry = self.heap.pop().unwrap();
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        entry
    }

    /// Returns *true* if the root entry matches the authoritative value map
    fn root_is_live(&self) -> bool {
        let root = &self.heap[0];
        self.values.get(&root.key) == Some(&root.value)
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.heap[pos].before(&self.heap[parent]) {
                self.heap.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let mut child = 2 * pos + 1;
            if child >= len {
                break;
            }
            if child + 1 < len && self.heap[child + 1].before(&self.heap[child]) {
                child += 1;
            }
            if self.heap[child].before(&self.heap[pos]) {
                self.heap.swap(pos, child);
                pos = child;
            } else {
                break;
            }
        }
    }
}

impl<K, V> MinHeap<K, V> for LazyBinaryHeap<K, V>
where
    K: Copy + Eq + Hash,
    V: PartialOrd + Copy,
{
    fn len(&self) -> usize {
        self.values.len()
    }

    fn contains(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    fn get(&self, key: &K) -> Option<V> {
        self.values.get(key).copied()
    }

    fn min(&mut self) -> FlowResult<(K, V)> {
        if self.values.is_empty() {
            return Err(FlowError::EmptyHeap);
        }

        // Drop stale entries until a live one surfaces
        while !self.root_is_live() {
            self.pop_entry();
        }

        let root = &self.heap[0];
        Ok((root.key, root.value))
    }

    fn pop(&mut self) -> FlowResult<(K, V)> {
        if self.values.is_empty() {
            return Err(FlowError::EmptyHeap);
        }

        loop {
            let live = self.root_is_live();
            let entry = self.pop_entry();
            if live {
                self.values.remove(&entry.key);
                return Ok((entry.key, entry.value));
            }
        }
    }

    fn insert(&mut self, key: K, value: V, allow_increase: bool) -> bool {
        match self.values.get(&key) {
            Some(&old) => {
                if value < old || (allow_increase && value > old) {
                    self.values.insert(key, value);
                    self.push(key, value);
                    true
                } else {
                    false
                }
            }
            None => {
                self.values.insert(key, value);
                self.push(key, value);
                true
            }
        }
    }
}
