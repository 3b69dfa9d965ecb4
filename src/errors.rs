/*!
# Error Taxonomy

All fallible operations of the flow engines and heaps share a single error
enum. Errors are detected synchronously and propagated immediately; a failed
flow computation leaves no usable partial residual network.
*/

use thiserror::Error;

use crate::node::Node;

/// Errors raised by flow computations and heap queries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// A source/sink node lies outside the graph's node range
    #[error("node {0} not in graph")]
    NodeNotFound(Node),

    /// Malformed query, e.g. source and sink coincide
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// An all-infinite-capacity augmenting path exists, max-flow is undefined
    #[error("infinite capacity path, flow unbounded above")]
    UnboundedFlow,

    /// `min`/`pop` on an empty heap
    #[error("heap is empty")]
    EmptyHeap,
}

/// Shorthand for results of flow computations
pub type FlowResult<T> = Result<T, FlowError>;
