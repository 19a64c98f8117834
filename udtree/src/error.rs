use thiserror::Error;

/// Graph processing error.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum GraphError {
    #[error("dependent {dependent:?} is out of bounds for tree with {node_count:?} nodes")]
    DependentOutOfBounds { dependent: usize, node_count: usize },

    #[error("head {head:?} is out of bounds for tree with {node_count:?} nodes")]
    HeadOutOfBounds { head: usize, node_count: usize },

    #[error("token {node} has no head")]
    Headless { node: usize },

    #[error("tree has no root edge")]
    MissingRootEdge,

    #[error("root has multiple dependents: {dependents:?}")]
    MultipleRootEdges { dependents: Vec<usize> },

    #[error("token {node} is not dominated by the root")]
    Cycle { node: usize },
}
