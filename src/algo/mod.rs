/*!
# Flow & Connectivity Algorithms

This module provides the algorithms built on top of the graph
representations in this crate. All algorithms are re-exported at the top
level of this module, so you can simply do:
```rust
use capgraphs::algo::*;
```
and gain access to the max-flow engines, cut/connectivity queries and the
heap-driven shortest-path traversal.

Algorithms are configurable structs (*Setter* / *Builder* pattern); the most
common queries are additionally available through blanket traits on the
graphs themselves, e.g. `graph.max_flow_value(s, t)`.
*/

mod cuts;
mod dijkstra;
mod edmonds_karp;
mod shortest_augmenting_path;

pub use cuts::*;
pub use dijkstra::*;
pub use edmonds_karp::*;
pub use shortest_augmenting_path::*;

use crate::{
    errors::{FlowError, FlowResult},
    node::{Capacity, Node, NumNodes},
    ops::*,
    residual::ResidualNetwork,
};

/// Source and sink must be distinct nodes of the graph
pub(crate) fn validate_endpoints(n: NumNodes, s: Node, t: Node) -> FlowResult<()> {
    if s >= n {
        return Err(FlowError::NodeNotFound(s));
    }
    if t >= n {
        return Err(FlowError::NodeNotFound(t));
    }
    if s == t {
        return Err(FlowError::InvalidInput("source and sink are the same node"));
    }
    Ok(())
}

/// Maximum-flow queries available on every capacitated graph
pub trait MaxFlow: CapacitatedArcs + GraphType {
    /// Computes the maximum s-t flow value
    fn max_flow_value(&self, s: Node, t: Node) -> FlowResult<Capacity> {
        Ok(self.max_flow(s, t)?.flow_value())
    }

    /// Computes a maximum s-t flow and returns the resulting residual
    /// network with per-arc flows and the flow value
    fn max_flow(&self, s: Node, t: Node) -> FlowResult<ResidualNetwork> {
        ShortestAugmentingPath::new().run(self, s, t)
    }
}

impl<G: CapacitatedArcs + GraphType> MaxFlow for G {}
