/*!
# Graph Representations

Adjacency-array backed storage for capacitated graphs:
- [`CapAdjArray`]: directed, each arc `(u, v)` is stored once at `u`,
- [`CapAdjUndir`]: undirected, each edge is mirrored into both endpoint lists.

Both keep arcs as `(head, capacity)` pairs. Parallel arcs are rejected,
self-loops are allowed at construction but skipped by the residual builder.
*/

use crate::{edge::*, node::*, ops::*};

/// A directed graph with one capacitated arc list per node
#[derive(Clone, Default)]
pub struct CapAdjArray {
    arcs: Vec<Vec<(Node, Capacity)>>,
    num_edges: NumEdges,
}

/// An undirected graph; every edge appears in both endpoint lists
#[derive(Clone, Default)]
pub struct CapAdjUndir {
    arcs: Vec<Vec<(Node, Capacity)>>,
    num_edges: NumEdges,
}

macro_rules! impl_common_graph_ops {
    ($graph:ident, $dir:ident) => {
        impl GraphType for $graph {
            type Dir = $dir;
        }

        impl GraphNodeOrder for $graph {
            fn number_of_nodes(&self) -> NumNodes {
                self.arcs.len() as NumNodes
            }

            fn vertices(&self) -> impl Iterator<Item = Node> + '_ {
                self.vertices_range()
            }
        }

        impl GraphEdgeOrder for $graph {
            fn number_of_edges(&self) -> NumEdges {
                self.num_edges
            }
        }

        impl CapacitatedArcs for $graph {
            fn arcs_of(&self, u: Node) -> impl Iterator<Item = (Node, Capacity)> + '_ {
                self.arcs[u as usize].iter().copied()
            }

            fn degree_of(&self, u: Node) -> NumNodes {
                self.arcs[u as usize].len() as NumNodes
            }
        }

        impl AdjacencyTest for $graph {
            fn has_edge(&self, u: Node, v: Node) -> bool {
                assert!(v < self.number_of_nodes());
                self.arcs[u as usize].iter().any(|&(w, _)| w == v)
            }
        }

        impl GraphNew for $graph {
            fn new(n: NumNodes) -> Self {
                Self {
                    arcs: vec![Vec::new(); n as usize],
                    num_edges: 0,
                }
            }
        }
    };
}

impl_common_graph_ops!(CapAdjArray, Directed);
impl_common_graph_ops!(CapAdjUndir, Undirected);

impl GraphArcEditing for CapAdjArray {
    fn try_add_arc(&mut self, u: Node, v: Node, capacity: Capacity) -> bool {
        if self.has_edge(u, v) {
            return false;
        }

        self.arcs[u as usize].push((v, capacity));
        self.num_edges += 1;
        true
    }
}

impl GraphArcEditing for CapAdjUndir {
    fn try_add_arc(&mut self, u: Node, v: Node, capacity: Capacity) -> bool {
        if self.has_edge(u, v) {
            return false;
        }

        self.arcs[u as usize].push((v, capacity));
        if u != v {
            self.arcs[v as usize].push((u, capacity));
        }
        self.num_edges += 1;
        true
    }
}
