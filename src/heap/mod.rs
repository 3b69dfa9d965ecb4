/*!
# Min-Heaps

A family of key-value min-heaps backing priority-driven traversals:
- [`PairingHeap`]: a pairing heap stored as an arena of index-linked nodes,
- [`LazyBinaryHeap`]: an array heap with lazy deletion via a side map,
- [`MappedQueue`]: an array heap with an exact element-to-position index
  supporting arbitrary removal and update.

All heaps order values via `PartialOrd` so that `f64` priorities work
directly; NaN values are not supported. Ties are broken by insertion order
where the structure requires a total order.
*/

mod binary;
mod mapped;
mod pairing;

pub use binary::LazyBinaryHeap;
pub use mapped::MappedQueue;
pub use pairing::PairingHeap;

use std::hash::Hash;

use crate::errors::FlowResult;

/// A collection of key-value pairs ordered by their values.
///
/// Supports querying the minimum pair, inserting a new pair, decreasing the
/// value of an existing pair and deleting the minimum pair.
pub trait MinHeap<K, V>: Default
where
    K: Copy + Eq + Hash,
    V: PartialOrd + Copy,
{
    /// Creates an empty heap
    fn new() -> Self {
        Self::default()
    }

    /// Returns the number of key-value pairs in the heap
    fn len(&self) -> usize;

    /// Returns *true* if the heap holds no pairs
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns *true* if `key` is present in the heap
    fn contains(&self, key: &K) -> bool;

    /// Returns the value associated with `key` or `None` if absent
    fn get(&self, key: &K) -> Option<V>;

    /// Queries the key-value pair with the minimum value.
    /// Fails with [`FlowError::EmptyHeap`](crate::errors::FlowError::EmptyHeap)
    /// on an empty heap.
    fn min(&mut self) -> FlowResult<(K, V)>;

    /// Deletes and returns the key-value pair with the minimum value.
    /// Fails with [`FlowError::EmptyHeap`](crate::errors::FlowError::EmptyHeap)
    /// on an empty heap.
    fn pop(&mut self) -> FlowResult<(K, V)>;

    /// Inserts a new key-value pair or modifies the value of an existing one.
    ///
    /// A new key is always inserted. An existing key is updated if the new
    /// value is smaller, or if it is larger and `allow_increase` is set.
    /// Returns *true* exactly if the heap changed.
    fn insert(&mut self, key: K, value: V, allow_increase: bool) -> bool;
}
