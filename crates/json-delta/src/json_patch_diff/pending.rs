//! Pending-operation records held in the log while move pairing is
//! unresolved, and the index-adjustment arithmetic between them.

use serde_json::Value;

use json_delta_json_pointer::append_component;

use crate::json_patch::types::PatchOp;

/// Position of an edit inside its parent container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Key {
    /// The whole document. Only the synthetic root replace carries this;
    /// it renders as the parent pointer unchanged.
    Root,
    /// An object member name.
    Member(String),
    /// An array index. Signed: sibling adjustments can push a recorded
    /// index below zero before a later event reconciles it.
    Index(i64),
}

/// Renders `path` extended by `key` as an RFC 6901 pointer.
pub(crate) fn join_pointer(path: &str, key: &Key) -> String {
    match key {
        Key::Root => path.to_string(),
        Key::Member(name) => append_component(path, name),
        Key::Index(index) => format!("{path}/{index}"),
    }
}

/// One tentatively recorded edit.
///
/// Held by value in its log entry so a Remove can be rewritten to a Move
/// without the entry changing position. A Remove's value is owned by the
/// value-index entry that may pair it, so it is not duplicated here.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PendingOp {
    Add {
        path: String,
        key: Key,
        value: Value,
    },
    Remove {
        path: String,
        key: Key,
    },
    Replace {
        path: String,
        key: Key,
        value: Value,
    },
    Move {
        from_path: String,
        from_key: Key,
        path: String,
        key: Key,
    },
}

impl PendingOp {
    /// Target parent path (for Move, the destination side).
    pub fn path(&self) -> &str {
        match self {
            PendingOp::Add { path, .. }
            | PendingOp::Remove { path, .. }
            | PendingOp::Replace { path, .. }
            | PendingOp::Move { path, .. } => path,
        }
    }

    /// Target key (for Move, the destination side).
    pub fn key(&self) -> &Key {
        match self {
            PendingOp::Add { key, .. }
            | PendingOp::Remove { key, .. }
            | PendingOp::Replace { key, .. }
            | PendingOp::Move { key, .. } => key,
        }
    }

    /// Recomputes indices when a pending remove at (`path`, `key`) is
    /// cancelled by a later add of the same value. Mutates this entry's
    /// own index where affected and returns the caller's corrected key.
    ///
    /// Only integer keys at the same parent path shift; member keys and
    /// foreign paths pass through untouched.
    pub fn adjust_for_undone_remove(&mut self, path: &str, key: i64) -> i64 {
        match self {
            PendingOp::Add {
                path: own_path,
                key: own_key,
                ..
            } => add_rule_undone_remove(own_path, own_key, path, key),
            PendingOp::Remove {
                path: own_path,
                key: own_key,
            } => remove_rule_undone_remove(own_path, own_key, path, key),
            PendingOp::Replace { .. } => key,
            PendingOp::Move {
                from_path,
                from_key,
                path: to_path,
                key: to_key,
            } => {
                // Origin behaves as the underlying remove, destination as
                // the underlying add; the two corrections chain.
                let key = remove_rule_undone_remove(from_path, from_key, path, key);
                add_rule_undone_remove(to_path, to_key, path, key)
            }
        }
    }

    /// Mirror of [`PendingOp::adjust_for_undone_remove`] for a pending
    /// add cancelled by a later remove of the same value.
    pub fn adjust_for_undone_add(&mut self, path: &str, key: i64) -> i64 {
        match self {
            PendingOp::Add {
                path: own_path,
                key: own_key,
                ..
            } => add_rule_undone_add(own_path, own_key, path, key),
            PendingOp::Remove {
                path: own_path,
                key: own_key,
            } => remove_rule_undone_add(own_path, own_key, path, key),
            PendingOp::Replace { .. } => key,
            PendingOp::Move {
                from_path,
                from_key,
                path: to_path,
                key: to_key,
            } => {
                let key = remove_rule_undone_add(from_path, from_key, path, key);
                add_rule_undone_add(to_path, to_key, path, key)
            }
        }
    }

    /// Renders the resolved operation as a concrete patch record.
    pub fn render(&self) -> PatchOp {
        match self {
            PendingOp::Add { path, key, value } => PatchOp::Add {
                path: join_pointer(path, key),
                value: value.clone(),
            },
            PendingOp::Remove { path, key } => PatchOp::Remove {
                path: join_pointer(path, key),
            },
            PendingOp::Replace { path, key, value } => PatchOp::Replace {
                path: join_pointer(path, key),
                value: value.clone(),
            },
            PendingOp::Move {
                from_path,
                from_key,
                path,
                key,
            } => PatchOp::Move {
                path: join_pointer(path, key),
                from: join_pointer(from_path, from_key),
            },
        }
    }
}

fn add_rule_undone_remove(own_path: &str, own_key: &mut Key, path: &str, key: i64) -> i64 {
    if own_path == path {
        if let Key::Index(own) = own_key {
            if *own > key {
                *own += 1;
            } else {
                return key + 1;
            }
        }
    }
    key
}

fn add_rule_undone_add(own_path: &str, own_key: &mut Key, path: &str, key: i64) -> i64 {
    if own_path == path {
        if let Key::Index(own) = own_key {
            if *own > key {
                *own -= 1;
            } else {
                return key + 1;
            }
        }
    }
    key
}

fn remove_rule_undone_remove(own_path: &str, own_key: &mut Key, path: &str, key: i64) -> i64 {
    if own_path == path {
        if let Key::Index(own) = own_key {
            if *own >= key {
                *own += 1;
            } else {
                return key - 1;
            }
        }
    }
    key
}

fn remove_rule_undone_add(own_path: &str, own_key: &mut Key, path: &str, key: i64) -> i64 {
    if own_path == path {
        if let Key::Index(own) = own_key {
            if *own > key {
                *own -= 1;
            } else {
                return key - 1;
            }
        }
    }
    key
}
