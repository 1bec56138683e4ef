//! JSON Patch (RFC 6902) output surface: operation records and their
//! JSON wire codec.

pub mod codec;
pub mod types;

pub use types::{PatchError, PatchOp};
