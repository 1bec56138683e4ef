//! json-delta — minimal deltas between JSON documents.
//!
//! Computes the set of edit operations that transform one
//! `serde_json::Value` into another, expressed as JSON Patch (RFC 6902)
//! add/remove/replace/move operations addressed by JSON Pointer
//! (RFC 6901) paths. Callers ship the delta instead of the full document:
//! config sync, change feeds, optimistic-update reconciliation.
//!
//! The engine is a pure, single-pass structural comparison — it produces
//! patches but does not apply them, and it favors a cheap heuristic over
//! a globally minimal edit script.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//!
//! let src = json!({"user": {"name": "ann", "tags": ["a", "b"]}});
//! let dst = json!({"user": {"name": "ann", "tags": ["b", "a"]}});
//! let patch = json_delta::diff(&src, &dst);
//! assert_eq!(
//!     json_delta::json_patch::codec::to_json_patch(&patch),
//!     json!([{"op": "move", "path": "/user/tags/1", "from": "/user/tags/0"}]),
//! );
//! ```

pub mod json_patch;
pub mod json_patch_diff;

pub use json_patch::types::{PatchError, PatchOp};
pub use json_patch_diff::diff;
