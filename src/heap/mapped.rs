use std::hash::Hash;

use fxhash::FxHashMap;

use crate::errors::{FlowError, FlowResult};

/// A min-heap with an exact element-to-position index.
///
/// Unlike [`LazyBinaryHeap`](super::LazyBinaryHeap), the index always maps
/// each live element to its physical array position, so arbitrary elements
/// can be removed or updated in `O(log n)` without stale entries. Duplicate
/// elements are forbidden: pushing an existing element is a no-op.
pub struct MappedQueue<T> {
    heap: Vec<T>,
    position: FxHashMap<T, usize>,
}

impl<T> Default for MappedQueue<T> {
    fn default() -> Self {
        Self {
            heap: Vec::new(),
            position: FxHashMap::default(),
        }
    }
}

impl<T> MappedQueue<T>
where
    T: PartialOrd + Copy + Eq + Hash,
{
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a queue from an initial set of elements.
    /// ** Panics if the elements contain duplicates **
    pub fn from_elements(elements: impl IntoIterator<Item = T>) -> Self {
        let mut queue = Self::new();
        for elt in elements {
            assert!(queue.push(elt));
        }
        queue
    }

    /// Returns the number of elements in the queue
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns *true* if the queue holds no elements
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns *true* if `elt` is present
    pub fn contains(&self, elt: &T) -> bool {
        self.position.contains_key(elt)
    }

    /// Adds an element to the queue.
    /// Returns *false* without modification if it is already present.
    pub fn push(&mut self, elt: T) -> bool {
        if self.position.contains_key(&elt) {
            return false;
        }

        let pos = self.heap.len();
        self.heap.push(elt);
        self.position.insert(elt, pos);
        self.sift_up(pos);
        true
    }

    /// Queries the smallest element.
    /// Fails with [`FlowError::EmptyHeap`] on an empty queue.
    pub fn min(&self) -> FlowResult<T> {
        self.heap.first().copied().ok_or(FlowError::EmptyHeap)
    }

    /// Removes and returns the smallest element.
    /// Fails with [`FlowError::EmptyHeap`] on an empty queue.
    pub fn pop(&mut self) -> FlowResult<T> {
        let elt = self.min()?;
        self.position.remove(&elt);

        let last = self.heap.pop().unwrap();
        if !self.heap.is_empty() {
            self.heap[0] = last;
            self.position.insert(last, 0);
            self.reheapify(0);
        }

        Ok(elt)
    }

    /// Replaces an element with a new one and restores the heap invariant
    /// locally. Returns *false* if `old` is absent or `new` already present.
    pub fn update(&mut self, old: T, new: T) -> bool {
        if old != new && self.position.contains_key(&new) {
            return false;
        }
        let Some(pos) = self.position.remove(&old) else {
            return false;
        };

        self.heap[pos] = new;
        self.position.insert(new, pos);
        self.reheapify(pos);
        true
    }

    /// Removes an arbitrary element from the queue.
    /// Returns *false* if it is absent.
    pub fn remove(&mut self, elt: &T) -> bool {
        let Some(pos) = self.position.remove(elt) else {
            return false;
        };

        let last = self.heap.pop().unwrap();
        if pos < self.heap.len() {
            self.heap[pos] = last;
            self.position.insert(last, pos);
            self.reheapify(pos);
        }

        true
    }

    /// The replacement at `pos` may be smaller than its parent or larger
    /// than a child; sift toward the leaves first, then toward the root.
    fn reheapify(&mut self, pos: usize) {
        let pos = self.sift_down(pos);
        self.sift_up(pos);
    }

    fn sift_up(&mut self, mut pos: usize) -> usize {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.heap[pos] < self.heap[parent] {
                self.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
        pos
    }

    fn sift_down(&mut self, mut pos: usize) -> usize {
        let len = self.heap.len();
        loop {
            let mut child = 2 * pos + 1;
            if child >= len {
                break;
            }
            if child + 1 < len && self.heap[child + 1] < self.heap[child] {
                child += 1;
            }
            if self.heap[child] < self.heap[pos] {
                self.swap(pos, child);
                pos = child;
            } else {
                break;
            }
        }
        pos
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position.insert(self.heap[a], a);
        self.position.insert(self.heap[b], b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{seq::IndexedRandom, Rng, SeedableRng};
    use rand_pcg::Pcg64;

    #[test]
    fn push_and_pop_ascending() {
        let mut q = MappedQueue::from_elements([916, 50, 4609, 493, 237]);
        assert!(q.push(1310));
        assert!(!q.push(1310));

        let mut popped = Vec::new();
        while let Ok(x) = q.pop() {
            popped.push(x);
        }
        assert_eq!(popped, vec![50, 237, 493, 916, 1310, 4609]);
        assert!(q.is_empty());
    }

    #[test]
    fn remove_and_update() {
        let mut q = MappedQueue::from_elements([916, 50, 4609, 493, 237]);
        assert!(q.remove(&493));
        assert!(!q.remove(&493));
        assert!(q.update(237, 1117));

        let mut popped = Vec::new();
        while let Ok(x) = q.pop() {
            popped.push(x);
        }
        assert_eq!(popped, vec![50, 916, 1117, 4609]);
    }

    #[test]
    fn update_missing_element() {
        let mut q = MappedQueue::from_elements([1, 2, 3]);
        assert!(!q.update(7, 9));
        assert!(!q.update(1, 2));
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn position_index_stays_exact() {
        let rng = &mut Pcg64::seed_from_u64(555);

        let mut q = MappedQueue::new();
        let mut live: Vec<i64> = Vec::new();

        for _ in 0..3000 {
            match rng.random_range(0..4) {
                0..=1 => {
                    let x = rng.random_range(-1000..1000i64);
                    assert_eq!(q.push(x), !live.contains(&x));
                    if !live.contains(&x) {
                        live.push(x);
                    }
                }
                2 => {
                    if let Some(&x) = live.choose(rng) {
                        assert!(q.remove(&x));
                        live.retain(|&y| y != x);
                    }
                }
                _ => {
                    if live.is_empty() {
                        assert!(q.pop().is_err());
                    } else {
                        let x = q.pop().unwrap();
                        assert_eq!(x, *live.iter().min().unwrap());
                        live.retain(|&y| y != x);
                    }
                }
            }

            assert_eq!(q.len(), live.len());
            // Every live element is indexed at its physical location
            for (pos, &x) in q.heap.iter().enumerate() {
                assert_eq!(q.position[&x], pos);
            }
        }

        let mut drained = Vec::new();
        while let Ok(x) = q.pop() {
            drained.push(x);
        }
        live.sort_unstable();
        assert_eq!(drained, live.iter().copied().collect_vec());
    }
}
