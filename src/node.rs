/*!
# Node Representation

We choose `Node = u32` as almost all use-cases involve less than `2^32` nodes.
This saves space compared to `usize/u64` and allows manipulating node values
directly without abstracting over them.

Arc capacities are plain `f64`: `f64::INFINITY` marks an unbounded arc and is
projected onto a finite sentinel when a residual network is built.
*/

use stream_bitset::bitset::BitSetImpl;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// BitSet for Nodes
pub type NodeBitSet = BitSetImpl<Node>;

/// Arc capacities and flow values. `f64::INFINITY` denotes an unbounded arc.
/// NaN capacities are not supported.
pub type Capacity = f64;
