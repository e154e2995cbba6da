//! Structural-integrity errors raised before any config output is produced.

use thiserror::Error;

/// A pipeline that cannot be compiled. These are graph-shape problems the
/// editor should have prevented; the compiler refuses to render rather than
/// silently emit a malformed document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructuralError {
    #[error("edge {edge_id} references unknown node: {node_id}")]
    UnknownNode { edge_id: String, node_id: String },

    #[error("node {node_id} has no plugin name")]
    MissingPlugin { node_id: String },

    #[error("duplicate node id: {node_id}")]
    DuplicateNodeId { node_id: String },
}
