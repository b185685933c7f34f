use thiserror::Error;

/// Errors raised by the contraction machinery.
///
/// Apart from [`GraphError::InvalidInput`], every variant signals a broken
/// internal invariant: the driver or a caller moved the structure into a
/// state the algorithm forbids. None of these are retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A vertex lookup failed.
    #[error("vertex not found")]
    VertexNotFound,

    /// Contraction was requested on an edge that is not live: endpoints
    /// equal, missing, or not adjacent.
    #[error("invalid edge: {0}")]
    InvalidEdge(String),

    /// Edge selection was attempted on a graph with no arcs.
    #[error("edge selection on a graph with no arcs")]
    EmptyGraph,

    /// An operation needed at least two live vertices.
    #[error("fewer than two live vertices remain")]
    Underflow,

    /// An arc index did not resolve against the current arc multiset.
    #[error("arc index {index} out of range for {arcs} arcs")]
    IndexOutOfRange { index: usize, arcs: usize },

    /// The cut inspector received sets that do not bipartition the
    /// original vertex set.
    #[error("inconsistent partition: {0}")]
    InconsistentPartition(String),

    /// Malformed caller input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl GraphError {
    /// Creates a [`GraphError::InvalidInput`] from any displayable message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        GraphError::InvalidInput(msg.into())
    }

    /// Creates a [`GraphError::InvalidEdge`] from any displayable message.
    pub fn invalid_edge(msg: impl Into<String>) -> Self {
        GraphError::InvalidEdge(msg.into())
    }

    /// Creates a [`GraphError::InconsistentPartition`] from any displayable message.
    pub fn inconsistent_partition(msg: impl Into<String>) -> Self {
        GraphError::InconsistentPartition(msg.into())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;
