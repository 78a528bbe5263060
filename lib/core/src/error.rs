use crate::graph::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid node: {0}")]
    InvalidNode(NodeId),

    #[error("Edge already exists: {start} -> {end}")]
    DuplicateEdge { start: NodeId, end: NodeId },

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Edge not found: {start} -> {end}")]
    EdgeNotFound { start: NodeId, end: NodeId },

    #[error("Malformed graph file at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Error::Malformed {
            line,
            reason: reason.into(),
        }
    }
}
