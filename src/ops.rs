/*!
# Graph Operations

Trait suite shared by all graph representations. Graphs are unlabelled with
nodes `0..n`; every arc carries a capacity. Directedness is a compile-time
marker so algorithms can branch on it without trait objects.
*/

use std::ops::Range;

use itertools::Itertools;

use crate::{edge::*, node::*};

/// Marker trait for the directedness of a graph
pub trait Direction {
    /// *true* for directed graphs
    const DIRECTED: bool;
}

/// Marker type for directed graphs
pub struct Directed;

/// Marker type for undirected graphs
pub struct Undirected;

impl Direction for Directed {
    const DIRECTED: bool = true;
}

impl Direction for Undirected {
    const DIRECTED: bool = false;
}

/// Associates a graph with its directedness marker
pub trait GraphType {
    /// Either [`Directed`] or [`Undirected`]
    type Dir: Direction;

    /// Returns *true* if the graph is directed
    fn is_directed() -> bool {
        Self::Dir::DIRECTED
    }
}

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    fn vertices(&self) -> impl Iterator<Item = Node> + '_;

    /// Returns empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.number_of_nodes())
    }

    /// Returns full bitset with one entry per node
    fn vertex_bitset_set(&self) -> NodeBitSet {
        NodeBitSet::new_all_set(self.number_of_nodes())
    }

    /// Returns the range of vertices. In contrast to `self.vertices()`, the
    /// returned range does not borrow self and hence may be used where
    /// additional mutable references of self are needed
    fn vertices_range(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns *true* if the graph has no nodes (and thus no arcs)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns *true* if `u` is a valid node of the graph
    fn has_node(&self, u: Node) -> bool {
        u < self.number_of_nodes()
    }
}

/// Provides getters pertaining to the arc-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph.
    /// Undirected edges are counted once.
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_singleton(&self) -> bool {
        self.number_of_edges() == 0
    }
}

macro_rules! node_iterator {
    ($iter : ident, $single : ident, $type : ty) => {
        fn $iter(&self) -> impl Iterator<Item = $type> + '_ {
            self.vertices().map(|u| self.$single(u))
        }
    };
}

/// Getters for capacitated neighborhoods & arcs
pub trait CapacitatedArcs: GraphNodeOrder + GraphType + Sized {
    /// Returns an iterator over the outgoing arcs of a given vertex as
    /// `(head, capacity)` pairs.
    /// ** Panics if `u >= n` **
    fn arcs_of(&self, u: Node) -> impl Iterator<Item = (Node, Capacity)> + '_;

    /// Returns an iterator over the (out-)neighbors of a given vertex.
    /// ** Panics if `u >= n` **
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.arcs_of(u).map(|(v, _)| v)
    }

    /// Returns the number of (outgoing) neighbors of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes;

    /// Returns the capacity of the arc `(u, v)` or `None` if it is absent.
    /// ** Panics if `u >= n` **
    fn capacity_of(&self, u: Node, v: Node) -> Option<Capacity> {
        self.arcs_of(u).find(|&(w, _)| w == v).map(|(_, c)| c)
    }

    /// Returns the maximum degree in the graph
    fn max_degree(&self) -> NumNodes {
        self.degrees().max().unwrap_or(0)
    }

    /// Returns a vertex of minimum degree or `None` for empty graphs
    fn min_degree_vertex(&self) -> Option<Node> {
        self.vertices().min_by_key(|&u| self.degree_of(u))
    }

    node_iterator!(degrees, degree_of, NumNodes);

    /// Returns the neighborhood of a given vertex as a bitset.
    /// ** Panics if `u >= n` **
    fn neighbors_of_as_bitset(&self, u: Node) -> NodeBitSet {
        NodeBitSet::new_with_bits_set(self.number_of_nodes(), self.neighbors_of(u))
    }

    /// Returns an iterator over outgoing capacitated arcs of a given vertex.
    /// ** Panics if `u >= n` **
    fn cap_edges_of(&self, u: Node) -> impl Iterator<Item = CapEdge> + '_ {
        self.arcs_of(u).map(move |(v, c)| CapEdge(u, v, c))
    }

    /// Returns an iterator over all arcs of the graph. For undirected graphs
    /// each edge is reported once in normalized orientation.
    fn cap_edges(&self) -> impl Iterator<Item = CapEdge> + '_ {
        self.vertices_range()
            .flat_map(move |u| self.cap_edges_of(u))
            .filter(|e| Self::Dir::DIRECTED || e.0 <= e.1)
    }

    /// Returns all arcs in sorted order; mainly useful in tests
    fn ordered_cap_edges(&self) -> Vec<CapEdge> {
        let mut edges = self.cap_edges().collect_vec();
        edges.sort_by(|a, b| a.partial_cmp(b).unwrap());
        edges
    }
}

/// Trait to test existence of certain structures in a graph.
pub trait AdjacencyTest: GraphNodeOrder {
    /// Returns *true* if the edge (u,v) exists in the graph.
    /// ** Panics if `u >= n || v >= n` **
    fn has_edge(&self, u: Node, v: Node) -> bool;

    /// Returns *true* if a self-loop (u,u) exists.
    /// ** Panics if `u >= n` **
    fn has_self_loop(&self, u: Node) -> bool {
        self.has_edge(u, u)
    }
}

/// Trait for creating a new empty graph
pub trait GraphNew {
    /// Creates an empty graph with n singleton nodes
    fn new(n: NumNodes) -> Self;
}

/// Provides functions to insert capacitated arcs
pub trait GraphArcEditing: GraphNew {
    /// Adds the arc *(u,v)* with given capacity to the graph.
    /// ** Panics if `u >= n || v >= n` or the arc was already present **
    fn add_arc(&mut self, u: Node, v: Node, capacity: Capacity) {
        assert!(self.try_add_arc(u, v, capacity));
    }

    /// Adds the arc `(u, v)` with given capacity to the graph.
    /// Returns *true* exactly if the arc was not present previously.
    /// ** Panics if `u >= n || v >= n` **
    fn try_add_arc(&mut self, u: Node, v: Node, capacity: Capacity) -> bool;

    /// Adds all arcs in the collection
    fn add_arcs(&mut self, arcs: impl IntoIterator<Item = impl Into<CapEdge>>) {
        for CapEdge(u, v, c) in arcs.into_iter().map(|d| d.into()) {
            self.add_arc(u, v, c);
        }
    }
}

/// A super trait for creating a graph from scratch from a set of
/// capacitated arcs and a number of nodes
pub trait GraphFromScratch {
    /// Create a graph from a number of nodes and an iterator over arcs
    fn from_arcs(n: NumNodes, arcs: impl IntoIterator<Item = impl Into<CapEdge>>) -> Self;

    /// Create a graph where every arc has unit capacity
    fn from_unit_arcs(n: NumNodes, arcs: impl IntoIterator<Item = impl Into<Edge>>) -> Self
    where
        Self: Sized,
    {
        Self::from_arcs(
            n,
            arcs.into_iter().map(|e| {
                let Edge(u, v) = e.into();
                CapEdge(u, v, 1.0)
            }),
        )
    }
}

impl<G: GraphNew + GraphArcEditing> GraphFromScratch for G {
    fn from_arcs(n: NumNodes, arcs: impl IntoIterator<Item = impl Into<CapEdge>>) -> Self {
        let mut graph = Self::new(n);
        graph.add_arcs(arcs);
        graph
    }
}
