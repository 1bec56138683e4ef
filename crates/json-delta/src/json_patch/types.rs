//! Core types for the JSON Patch output.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("INVALID_OP: {0}")]
    InvalidOp(String),
    #[error("INVALID_POINTER: {0}")]
    InvalidPointer(String),
}

/// A single JSON Patch operation, addressed by RFC 6901 pointer strings.
///
/// The empty path addresses the whole document. The differ only produces
/// the four operations it can derive from a structural comparison; `copy`
/// and `test` have no source events to come from.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOp {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Move { path: String, from: String },
}

impl PatchOp {
    /// The RFC 6902 `op` member for this operation.
    pub fn op_name(&self) -> &'static str {
        match self {
            PatchOp::Add { .. } => "add",
            PatchOp::Remove { .. } => "remove",
            PatchOp::Replace { .. } => "replace",
            PatchOp::Move { .. } => "move",
        }
    }

    /// The target location of the operation.
    pub fn path(&self) -> &str {
        match self {
            PatchOp::Add { path, .. } => path,
            PatchOp::Remove { path } => path,
            PatchOp::Replace { path, .. } => path,
            PatchOp::Move { path, .. } => path,
        }
    }
}
