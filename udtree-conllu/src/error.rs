use std::io;

use thiserror::Error;
use udtree::GraphError;

/// CoNLL-U IO error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IOError {
    /// Error in file IO.
    #[error("error reading treebank")]
    IO(#[from] io::Error),

    /// CoNLL-U parsing error.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// CoNLL-U parsing errors.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum ParseError {
    /// Error constructing the tree.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A token line has fewer fields than the format requires.
    #[error("token line has too few fields: {line:?}")]
    MissingFields { line: String },

    /// A head index refers to a token that was dropped or never read.
    #[error("head {head} refers to a dropped or missing token")]
    UnknownHead { head: usize },
}
