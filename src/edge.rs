use std::fmt::{Debug, Display};

use stream_bitset::bitset::BitSetImpl;

use crate::node::{Capacity, Node};

/// An edge is defined by two nodes/endpoints.
/// It is up to the user whether an Edge is directed or not.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub Node, pub Node);

/// We limit the number of edges to `2^32 - 1`.
pub type NumEdges = u32;

/// A BitSet over NumEdges
pub type EdgeBitSet = BitSetImpl<NumEdges>;

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Edge {
    /// Normalizes the edge such that the endpoint with smaller value comes first
    pub fn normalized(&self) -> Self {
        Edge(self.0.min(self.1), self.0.max(self.1))
    }

    /// Returns true if the endpoint with smaller index comes first
    pub fn is_normalized(&self) -> bool {
        self.0 <= self.1
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints
    pub fn reverse(&self) -> Self {
        Edge(self.1, self.0)
    }
}

impl From<(Node, Node)> for Edge {
    fn from(value: (Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&(Node, Node)> for Edge {
    fn from(value: &(Node, Node)) -> Self {
        Edge(value.0, value.1)
    }
}

impl From<&Edge> for Edge {
    fn from(value: &Edge) -> Self {
        *value
    }
}

/// An edge together with its capacity
#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct CapEdge(pub Node, pub Node, pub Capacity);

impl CapEdge {
    /// The endpoints without the capacity
    pub fn edge(&self) -> Edge {
        Edge(self.0, self.1)
    }

    /// Returns true if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.0 == self.1
    }
}

impl Display for CapEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.0, self.1, self.2)
    }
}

impl Debug for CapEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl From<(Node, Node, Capacity)> for CapEdge {
    fn from(value: (Node, Node, Capacity)) -> Self {
        CapEdge(value.0, value.1, value.2)
    }
}

impl From<&(Node, Node, Capacity)> for CapEdge {
    fn from(value: &(Node, Node, Capacity)) -> Self {
        CapEdge(value.0, value.1, value.2)
    }
}

/// An edge without an explicit capacity defaults to an unbounded arc
impl From<(Node, Node)> for CapEdge {
    fn from(value: (Node, Node)) -> Self {
        CapEdge(value.0, value.1, Capacity::INFINITY)
    }
}

impl From<&CapEdge> for CapEdge {
    fn from(value: &CapEdge) -> Self {
        *value
    }
}
