/*!
`capgraphs` is a maximum-flow & connectivity library for capacitated graphs that are
- **unlabelled** : Nodes are numbered `0` to `n - 1`
- **capacitated** : Every arc carries an `f64` capacity (`f64::INFINITY` marks unbounded arcs)
- **directed or undirected** : Directedness is a compile-time marker type

# Representation

We represent **nodes** as `u32` in the range `0..n` where `n` is the number of nodes of the graph.
Capacitated arcs are the tuple-struct `CapEdge(Node, Node, Capacity)`; the uncapacitated
`Edge(Node, Node)` is used wherever only the endpoints matter, e.g. for reported cut sets.

Graphs are stored as adjacency arrays, see the [`repr`] module:

- [`CapAdjArray`](crate::repr::CapAdjArray) (directed)
- [`CapAdjUndir`](crate::repr::CapAdjUndir) (undirected, both endpoints list each edge)

Flow computations do not run on these inputs directly but on a [`residual::ResidualNetwork`],
a flat arc array in which every arc is paired with its reverse (arc `a` and arc `a ^ 1`).

# Design

All algorithms are provided as configurable structs that one can alter to their needs using
either the *Builder* / *Setter* pattern before calling the configured algorithm on a provided
graph. The most common queries are additionally implemented via blanket traits on the graph
itself, e.g. `graph.max_flow_value(s, t)` or `graph.edge_connectivity()`.

# Usage

There are *3* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, arcs, basic graph operations, the graph
  representations, and the error types,
- [`algo`] includes the maximum-flow engines ([`algo::ShortestAugmentingPath`],
  [`algo::EdmondsKarp`]), flow-based cut & connectivity queries, and a heap-driven
  shortest-path traversal,
- [`heap`] includes the keyed min-heaps ([`heap::PairingHeap`], [`heap::LazyBinaryHeap`])
  and the position-indexed [`heap::MappedQueue`].

In most use-cases, `use capgraphs::{prelude::*, algo::*};` suffices for your needs.

Fallible operations return [`errors::FlowResult`]; flows on networks whose infinite-capacity
arcs admit an unbounded s-t path report [`errors::FlowError::UnboundedFlow`] instead of
diverging.
*/

pub mod algo;
pub mod edge;
pub mod errors;
pub mod heap;
pub mod node;
pub mod ops;
pub mod repr;
pub mod residual;

/// `capgraphs::prelude` includes definitions for nodes and arcs, all basic graph operation
/// traits, the graph representations, and the error types.
pub mod prelude {
    pub use super::{edge::*, errors::*, node::*, ops::*, repr::*, residual::ResidualNetwork};
}
