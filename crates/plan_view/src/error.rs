use crate::VertexId;
use plan_tree_layout::{LayoutError, TreeError};
use thiserror::Error;

fn join_ids(ids: &[VertexId]) -> String {
    ids.iter()
        .map(VertexId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reasons a vertex list cannot be turned into a tree
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("plan has no vertices")]
    Empty,

    #[error("vertex {0} is listed more than once")]
    DuplicateVertex(VertexId),

    #[error("plan graph contains a cycle through vertex {0}")]
    Cycle(VertexId),

    #[error("plan has {} root vertices: {}", .0.len(), join_ids(.0))]
    MultipleRoots(Vec<VertexId>),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("failed to build plan tree")]
    Build(#[from] BuildError),

    #[error("failed to lay out plan tree")]
    Layout(#[from] LayoutError),

    #[error("no node with id {0}")]
    UnknownNode(VertexId),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid view config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to write view config: {0}")]
    Write(#[from] ron::Error),
}
