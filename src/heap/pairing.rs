use std::hash::Hash;

use fxhash::FxHashMap;

use crate::errors::{FlowError, FlowResult};

use super::MinHeap;

/// Index into the node arena
type Slot = u32;

/// Sentinel for absent links
const NIL: Slot = Slot::MAX;

/// A node in the left-child, right-sibling representation.
/// `prev` points to the left sibling, or is `NIL` for the leftmost child.
struct PairNode<K, V> {
    key: K,
    value: V,
    left: Slot,
    next: Slot,
    prev: Slot,
    parent: Slot,
}

/// A pairing heap.
///
/// Trees are stored in an arena of index-linked nodes; freed slots are
/// recycled. Decrease-key cuts the node and links it with the root. An
/// increase (with `allow_increase`) merges the node's children and links the
/// merged subtree with the root, leaving the node in place; this direct
/// relink is simpler than the textbook cut-and-reinsert and is kept as the
/// defined behavior. No Fibonacci-style amortized bounds are claimed.
pub struct PairingHeap<K, V> {
    arena: Vec<PairNode<K, V>>,
    free: Vec<Slot>,
    root: Slot,
    index: FxHashMap<K, Slot>,
}

impl<K, V> Default for PairingHeap<K, V> {
    fn default() -> Self {
        Self {
            arena: Vec::new(),
            free: Vec::new(),
            root: NIL,
            index: FxHashMap::default(),
        }
    }
}

impl<K, V> PairingHeap<K, V>
where
    K: Copy + Eq + Hash,
    V: PartialOrd + Copy,
{
    fn alloc(&mut self, key: K, value: V) -> Slot {
        let node = PairNode {
            key,
            value,
            left: NIL,
            next: NIL,
            prev: NIL,
            parent: NIL,
        };

        if let Some(slot) = self.free.pop() {
            self.arena[slot as usize] = node;
            slot
        } else {
            self.arena.push(node);
            (self.arena.len() - 1) as Slot
        }
    }

    /// Links two roots, making the one with the smaller value the parent
    /// of the other. Returns the surviving root.
    fn link(&mut self, root: Slot, other: Slot) -> Slot {
        let (root, other) = if self.arena[other as usize].value < self.arena[root as usize].value {
            (other, root)
        } else {
            (root, other)
        };

        let first = self.arena[root as usize].left;
        self.arena[other as usize].next = first;
        if first != NIL {
            self.arena[first as usize].prev = other;
        }
        self.arena[other as usize].prev = NIL;
        self.arena[other as usize].parent = root;
        self.arena[root as usize].left = other;

        root
    }

    /// Merges the subtrees of `root` with the standard two-pass method and
    /// detaches the result from `root`. Returns `NIL` if there are none.
    fn merge_children(&mut self, root: Slot) -> Slot {
        let mut node = self.arena[root as usize].left;
        self.arena[root as usize].left = NIL;
        if node == NIL {
            return NIL;
        }

        // Pass 1: merge pairs of consecutive subtrees from left to right.
        // Only the prev pointers of the resulting subtrees are meaningful
        // afterwards; pass 2 fixes the rest.
        let mut prev = NIL;
        loop {
            let next = self.arena[node as usize].next;
            if next == NIL {
                self.arena[node as usize].prev = prev;
                break;
            }
            let next_next = self.arena[next as usize].next;
            node = self.link(node, next);
            self.arena[node as usize].prev = prev;
            prev = node;
            if next_next == NIL {
                break;
            }
            node = next_next;
        }

        // Pass 2: merge the pass-1 subtrees right to left into the rightmost.
        let mut prev = self.arena[node as usize].prev;
        while prev != NIL {
            let prev_prev = self.arena[prev as usize].prev;
            node = self.link(prev, node);
            prev = prev_prev;
        }

        let merged = &mut self.arena[node as usize];
        merged.prev = NIL;
        merged.next = NIL;
        merged.parent = NIL;
        node
    }

    /// Cuts a node from its parent
    fn cut(&mut self, node: Slot) {
        let prev = self.arena[node as usize].prev;
        let next = self.arena[node as usize].next;

        if prev != NIL {
            self.arena[prev as usize].next = next;
        } else {
            let parent = self.arena[node as usize].parent;
            self.arena[parent as usize].left = next;
        }
        if next != NIL {
            self.arena[next as usize].prev = prev;
        }

        let cut = &mut self.arena[node as usize];
        cut.prev = NIL;
        cut.next = NIL;
        cut.parent = NIL;
    }
}

impl<K, V> MinHeap<K, V> for PairingHeap<K, V>
where
    K: Copy + Eq + Hash,
    V: PartialOrd + Copy,
{
    fn len(&self) -> usize {
        self.index.len()
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn get(&self, key: &K) -> Option<V> {
        self.index.get(key).map(|&slot| self.arena[slot as usize].value)
    }

    fn min(&mut self) -> FlowResult<(K, V)> {
        if self.root == NIL {
            return Err(FlowError::EmptyHeap);
        }
        let root = &self.arena[self.root as usize];
        Ok((root.key, root.value))
    }

    fn pop(&mut self) -> FlowResult<(K, V)> {
        if self.root == NIL {
            return Err(FlowError::EmptyHeap);
        }

        let min_node = self.root;
        self.root = self.merge_children(min_node);
        let (key, value) = {
            let node = &self.arena[min_node as usize];
            (node.key, node.value)
        };
        self.index.remove(&key);
        self.free.push(min_node);

        Ok((key, value))
    }

    fn insert(&mut self, key: K, value: V, allow_increase: bool) -> bool {
        if let Some(&node) = self.index.get(&key) {
            let old = self.arena[node as usize].value;

            if value < old {
                self.arena[node as usize].value = value;
                let parent = self.arena[node as usize].parent;
                if node != self.root && value < self.arena[parent as usize].value {
                    self.cut(node);
                    let root = self.root;
                    self.root = self.link(root, node);
                }
                true
            } else if allow_increase && value > old {
                // The node keeps its place: its subtrees are merged and
                // linked with the root, so heap order is restored without
                // detaching the node itself.
                self.arena[node as usize].value = value;
                let child = self.merge_children(node);
                if child != NIL {
                    let root = self.root;
                    self.root = self.link(root, child);
                }
                true
            } else {
                false
            }
        } else {
            let node = self.alloc(key, value);
            self.index.insert(key, node);
            self.root = if self.root == NIL {
                node
            } else {
                let root = self.root;
                self.link(root, node)
            };
            true
        }
    }
}
