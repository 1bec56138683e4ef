//! Value-keyed store used to pair pending adds with pending removes.
//!
//! Two stores per side: scalar values key a hash map through an owned
//! [`ScalarKey`]; composite values (arrays, objects) cannot serve as
//! stable hash keys, so they fall back to a linear side list scanned
//! most-recent-first. Both paths sit behind the same `store` /
//! `take_last` interface and both are LIFO: the handle stored last for a
//! value is the first one handed back, and a taken handle is no longer
//! discoverable.

use std::collections::HashMap;

use serde_json::{Number, Value};

use super::op_log::EntryId;

/// Which half of a potential move pairing an entry is waiting on.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Side {
    PendingAdd = 0,
    PendingRemove = 1,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ScalarKey {
    Null,
    Bool(bool),
    Num(Number),
    Str(String),
}

/// The capability check: scalars hash, composites do not.
fn scalar_key(value: &Value) -> Option<ScalarKey> {
    match value {
        Value::Null => Some(ScalarKey::Null),
        Value::Bool(b) => Some(ScalarKey::Bool(*b)),
        Value::Number(n) => Some(ScalarKey::Num(n.clone())),
        Value::String(s) => Some(ScalarKey::Str(s.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[derive(Default)]
pub(crate) struct ValueIndex {
    scalars: [HashMap<ScalarKey, Vec<EntryId>>; 2],
    deep: [Vec<(Value, EntryId)>; 2],
}

impl ValueIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `id` as the most recent pending entry for `value`.
    pub fn store(&mut self, value: &Value, id: EntryId, side: Side) {
        match scalar_key(value) {
            Some(key) => self.scalars[side as usize]
                .entry(key)
                .or_default()
                .push(id),
            None => self.deep[side as usize].push((value.clone(), id)),
        }
    }

    /// Takes the most recently stored handle for `value`, if any.
    pub fn take_last(&mut self, value: &Value, side: Side) -> Option<EntryId> {
        match scalar_key(value) {
            Some(key) => self.scalars[side as usize].get_mut(&key)?.pop(),
            None => {
                let list = &mut self.deep[side as usize];
                let at = list.iter().rposition(|(stored, _)| stored == value)?;
                Some(list.remove(at).1)
            }
        }
    }
}
