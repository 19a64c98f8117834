use thiserror::Error;

/// Binarization error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The tree violates a structural invariant.
    #[error(transparent)]
    Graph(#[from] udtree::GraphError),

    /// A relation is missing from the obliqueness table.
    ///
    /// Guessing a score would corrupt the combination order, so an
    /// unknown relation aborts the sentence.
    #[error("unknown dependency relation: {relation:?}")]
    UnknownRelation { relation: String },

    /// The obliqueness table lists a relation twice.
    #[error("duplicate relation in obliqueness table: {name:?}")]
    DuplicateRelation { name: String },

    /// The obliqueness table could not be parsed.
    #[error("cannot parse obliqueness table")]
    TableFormat(#[from] serde_json::Error),

    /// A lifted node's ancestor chain does not reach the root.
    #[error("node {node} lost the path to the root while lifting")]
    LostRootPath { node: usize },
}
