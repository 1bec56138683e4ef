//! JSON codec for patch operations.
//!
//! Renders operations to their RFC 6902 wire form
//! (`{"op":"add","path":"/a","value":1}`) and parses that form back.

use serde_json::{json, Value};

use json_delta_json_pointer::validate_json_pointer;

use crate::json_patch::types::{PatchError, PatchOp};

// ── Serialization ─────────────────────────────────────────────────────────

/// Serialize one operation to its JSON object form.
pub fn to_json(op: &PatchOp) -> Value {
    match op {
        PatchOp::Add { path, value } => json!({
            "op": "add",
            "path": path,
            "value": value
        }),
        PatchOp::Remove { path } => json!({
            "op": "remove",
            "path": path
        }),
        PatchOp::Replace { path, value } => json!({
            "op": "replace",
            "path": path,
            "value": value
        }),
        PatchOp::Move { path, from } => json!({
            "op": "move",
            "path": path,
            "from": from
        }),
    }
}

/// Serialize a whole patch to a JSON array.
pub fn to_json_patch(ops: &[PatchOp]) -> Value {
    Value::Array(ops.iter().map(to_json).collect())
}

// ── Deserialization ───────────────────────────────────────────────────────

fn decode_pointer(obj: &serde_json::Map<String, Value>, key: &str) -> Result<String, PatchError> {
    let raw = obj
        .get(key)
        .ok_or_else(|| PatchError::InvalidOp(format!("missing '{key}' field")))?;
    let s = raw
        .as_str()
        .ok_or_else(|| PatchError::InvalidOp(format!("'{key}' must be a string")))?;
    validate_json_pointer(s).map_err(|_| PatchError::InvalidPointer(s.to_string()))?;
    Ok(s.to_string())
}

/// Parse one JSON object into an operation.
pub fn from_json(v: &Value) -> Result<PatchOp, PatchError> {
    let obj = v
        .as_object()
        .ok_or_else(|| PatchError::InvalidOp("operation must be an object".into()))?;
    let op_str = obj
        .get("op")
        .and_then(|v| v.as_str())
        .ok_or_else(|| PatchError::InvalidOp("missing 'op' field".into()))?;

    let path = decode_pointer(obj, "path")?;

    match op_str {
        "add" => {
            let value = obj
                .get("value")
                .ok_or_else(|| PatchError::InvalidOp("add requires 'value'".into()))?
                .clone();
            Ok(PatchOp::Add { path, value })
        }
        "remove" => Ok(PatchOp::Remove { path }),
        "replace" => {
            let value = obj
                .get("value")
                .ok_or_else(|| PatchError::InvalidOp("replace requires 'value'".into()))?
                .clone();
            Ok(PatchOp::Replace { path, value })
        }
        "move" => {
            let from = decode_pointer(obj, "from")?;
            Ok(PatchOp::Move { path, from })
        }
        other => Err(PatchError::InvalidOp(format!("unknown op: {other}"))),
    }
}

/// Parse a JSON array into a whole patch.
pub fn from_json_patch(v: &Value) -> Result<Vec<PatchOp>, PatchError> {
    let arr = v
        .as_array()
        .ok_or_else(|| PatchError::InvalidOp("patch must be an array".into()))?;
    arr.iter().map(from_json).collect()
}
