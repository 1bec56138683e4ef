//! JSON Patch diff: derive an RFC 6902 operation list from two documents.
//!
//! The comparator walks both values in parallel and records tentative
//! add/remove/replace edits in a discovery-ordered log. Values act as
//! content fingerprints: when a value removed somewhere reappears as an
//! add elsewhere in the same comparison (or vice versa), the two pending
//! half-events are collapsed into a single move. Because sequences are
//! compared slot by slot, pending integer indices are recorded relative
//! to the walk's current position and must be re-adjusted whenever a
//! sibling pairing cancels an earlier event — that arithmetic lives in
//! [`pending`]. A final pass linearizes the log, merging an adjacent
//! remove/add on the identical location into a replace.
//!
//! Sequences are deliberately never recursed into: a changed slot becomes
//! a remove plus an add of the whole element value, which is exactly what
//! makes element relocations visible to the pairing store. The result is
//! a single-pass heuristic, not a minimal edit script.

mod op_log;
mod pending;
mod value_index;

use serde_json::{Map, Value};

use crate::json_patch::types::PatchOp;

use op_log::{EntryId, OpLog};
use pending::{join_pointer, Key, PendingOp};
use value_index::{Side, ValueIndex};

/// Computes a patch that transforms `src` into `dst`.
///
/// The returned operations apply in order; callers must not assume they
/// are sorted by path.
///
/// # Example
///
/// ```
/// use serde_json::json;
///
/// let patch = json_delta::diff(&json!({"a": 1}), &json!({"b": 1}));
/// assert_eq!(
///     json_delta::json_patch::codec::to_json_patch(&patch),
///     json!([{"op": "move", "path": "/b", "from": "/a"}]),
/// );
/// ```
pub fn diff(src: &Value, dst: &Value) -> Vec<PatchOp> {
    let mut builder = DiffBuilder::new();
    builder.compare_values("", &Key::Root, src, dst);
    builder.into_patch()
}

/// Which half of a pairing was cancelled, selecting the adjustment rule
/// applied during the reconciliation walk.
#[derive(Clone, Copy)]
enum Undone {
    Add,
    Remove,
}

/// One comparison session. Owns the log and the pairing index; not
/// reusable across input pairs.
struct DiffBuilder {
    log: OpLog,
    index: ValueIndex,
}

impl DiffBuilder {
    fn new() -> Self {
        Self {
            log: OpLog::new(),
            index: ValueIndex::new(),
        }
    }

    // ── Structural comparator ─────────────────────────────────────────

    fn compare_values(&mut self, path: &str, key: &Key, src: &Value, dst: &Value) {
        if src == dst {
            return;
        }
        match (src, dst) {
            (Value::Object(s), Value::Object(d)) => {
                self.compare_objects(&join_pointer(path, key), s, d);
            }
            (Value::Array(s), Value::Array(d)) => {
                self.compare_arrays(&join_pointer(path, key), s, d);
            }
            _ => self.value_replaced(path, key.clone(), dst),
        }
    }

    fn compare_objects(&mut self, path: &str, src: &Map<String, Value>, dst: &Map<String, Value>) {
        for (name, value) in src {
            if !dst.contains_key(name) {
                self.value_removed(path, Key::Member(name.clone()), value);
            }
        }
        for (name, value) in dst {
            if !src.contains_key(name) {
                self.value_added(path, Key::Member(name.clone()), value);
            }
        }
        for (name, src_value) in src {
            if let Some(dst_value) = dst.get(name) {
                self.compare_values(path, &Key::Member(name.clone()), src_value, dst_value);
            }
        }
    }

    fn compare_arrays(&mut self, path: &str, src: &[Value], dst: &[Value]) {
        let min_len = src.len().min(dst.len());
        let max_len = src.len().max(dst.len());
        for i in 0..max_len {
            if i < min_len {
                if src[i] == dst[i] {
                    continue;
                }
                self.value_removed(path, Key::Index(i as i64), &src[i]);
                self.value_added(path, Key::Index(i as i64), &dst[i]);
            } else if src.len() > dst.len() {
                // Tail truncation: each surplus element is removed at the
                // shorter length, modelling repeated removal of the same
                // position as the sequence shrinks.
                self.value_removed(path, Key::Index(dst.len() as i64), &src[i]);
            } else {
                self.value_added(path, Key::Index(i as i64), &dst[i]);
            }
        }
    }

    // ── Move pairing ──────────────────────────────────────────────────

    fn value_added(&mut self, path: &str, key: Key, value: &Value) {
        let Some(removed) = self.index.take_last(value, Side::PendingRemove) else {
            let entry = self.log.push_back(PendingOp::Add {
                path: path.to_owned(),
                key,
                value: value.clone(),
            });
            self.index.store(value, entry, Side::PendingAdd);
            return;
        };

        let (from_path, from_key) = {
            let op = self.log.op(removed);
            (op.path().to_owned(), op.key().clone())
        };
        let from_key = self.reconcile_index(removed, &from_path, from_key, Undone::Remove);
        self.log.unlink(removed);

        if from_path != path || from_key != key {
            self.log.push_back(PendingOp::Move {
                from_path,
                from_key,
                path: path.to_owned(),
                key,
            });
        }
        // Identical location after adjustment: the remove and the add
        // cancel exactly and nothing remains.
    }

    fn value_removed(&mut self, path: &str, key: Key, value: &Value) {
        let paired = self.index.take_last(value, Side::PendingAdd);
        let entry = self.log.push_back(PendingOp::Remove {
            path: path.to_owned(),
            key,
        });
        let Some(added) = paired else {
            self.index.store(value, entry, Side::PendingRemove);
            return;
        };

        let (to_path, to_key) = {
            let op = self.log.op(added);
            (op.path().to_owned(), op.key().clone())
        };
        // The walk visits the remove pushed above, so its own index may
        // shift; re-read it before deciding whether the pair cancels.
        let to_key = self.reconcile_index(added, &to_path, to_key, Undone::Add);
        self.log.unlink(added);

        let (from_path, from_key) = {
            let op = self.log.op(entry);
            (op.path().to_owned(), op.key().clone())
        };
        if from_path != to_path || from_key != to_key {
            self.log.set(
                entry,
                PendingOp::Move {
                    from_path,
                    from_key,
                    path: to_path,
                    key: to_key,
                },
            );
        } else {
            self.log.unlink(entry);
        }
    }

    fn value_replaced(&mut self, path: &str, key: Key, value: &Value) {
        self.log.push_back(PendingOp::Replace {
            path: path.to_owned(),
            key,
            value: value.clone(),
        });
    }

    /// Replays every event logged after `after` onto the cancelled
    /// entry's recorded index, in strict log order. Each visited sibling
    /// applies its own rule once and may shift its own index in turn.
    /// Non-integer keys never shift.
    fn reconcile_index(&mut self, after: EntryId, path: &str, key: Key, undone: Undone) -> Key {
        let mut index = match key {
            Key::Index(index) => index,
            other => return other,
        };
        let mut cursor = self.log.next_of(after);
        while let Some(id) = cursor {
            index = match undone {
                Undone::Remove => self.log.op_mut(id).adjust_for_undone_remove(path, index),
                Undone::Add => self.log.op_mut(id).adjust_for_undone_add(path, index),
            };
            cursor = self.log.next_of(id);
        }
        Key::Index(index)
    }

    // ── Executor ──────────────────────────────────────────────────────

    /// Linearizes the log into concrete patch records, merging an
    /// adjacent remove/add pair on the identical path and key into one
    /// replace. Strictly local single lookahead; never reorders.
    fn into_patch(self) -> Vec<PatchOp> {
        let mut out = Vec::new();
        let mut cursor = self.log.head();
        while let Some(id) = cursor {
            let next = self.log.next_of(id);
            if let Some(next_id) = next {
                if let (
                    PendingOp::Remove {
                        path: rm_path,
                        key: rm_key,
                    },
                    PendingOp::Add { path, key, value },
                ) = (self.log.op(id), self.log.op(next_id))
                {
                    if rm_path == path && rm_key == key {
                        out.push(PatchOp::Replace {
                            path: join_pointer(path, key),
                            value: value.clone(),
                        });
                        cursor = self.log.next_of(next_id);
                        continue;
                    }
                }
            }
            out.push(self.log.op(id).render());
            cursor = next;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identical_documents_produce_empty_patch() {
        let doc = json!({"a": [1, {"b": "c"}], "d": null});
        assert_eq!(diff(&doc, &doc), vec![]);
        assert_eq!(diff(&json!(null), &json!(null)), vec![]);
    }

    #[test]
    fn add_object_member() {
        assert_eq!(
            diff(&json!({}), &json!({"a": 1})),
            vec![PatchOp::Add {
                path: "/a".into(),
                value: json!(1)
            }]
        );
    }

    #[test]
    fn remove_object_member() {
        assert_eq!(
            diff(&json!({"a": 1}), &json!({})),
            vec![PatchOp::Remove { path: "/a".into() }]
        );
    }

    #[test]
    fn replace_object_member() {
        assert_eq!(
            diff(&json!({"a": 1}), &json!({"a": 2})),
            vec![PatchOp::Replace {
                path: "/a".into(),
                value: json!(2)
            }]
        );
    }

    #[test]
    fn relocated_value_becomes_move() {
        assert_eq!(
            diff(&json!({"a": 1}), &json!({"b": 1})),
            vec![PatchOp::Move {
                path: "/b".into(),
                from: "/a".into()
            }]
        );
    }

    #[test]
    fn append_to_sequence() {
        assert_eq!(
            diff(&json!([1, 2]), &json!([1, 2, 3])),
            vec![PatchOp::Add {
                path: "/2".into(),
                value: json!(3)
            }]
        );
    }

    #[test]
    fn truncate_sequence_tail() {
        assert_eq!(
            diff(&json!([1, 2, 3]), &json!([1, 2])),
            vec![PatchOp::Remove { path: "/2".into() }]
        );
        // Multi-element truncation removes the same position repeatedly.
        assert_eq!(
            diff(&json!([1, 2, 3, 4]), &json!([1])),
            vec![
                PatchOp::Remove { path: "/1".into() },
                PatchOp::Remove { path: "/1".into() },
                PatchOp::Remove { path: "/1".into() },
            ]
        );
    }

    #[test]
    fn nested_member_replace() {
        assert_eq!(
            diff(&json!({"a": {"b": 1}}), &json!({"a": {"b": 2}})),
            vec![PatchOp::Replace {
                path: "/a/b".into(),
                value: json!(2)
            }]
        );
    }

    #[test]
    fn same_slot_scalar_change_compacts_to_replace() {
        assert_eq!(
            diff(&json!([1]), &json!([2])),
            vec![PatchOp::Replace {
                path: "/0".into(),
                value: json!(2)
            }]
        );
    }

    #[test]
    fn root_scalar_replace_uses_empty_pointer() {
        assert_eq!(
            diff(&json!(1), &json!("x")),
            vec![PatchOp::Replace {
                path: "".into(),
                value: json!("x")
            }]
        );
    }

    #[test]
    fn type_mismatch_is_replace_not_recursion() {
        assert_eq!(
            diff(&json!({"a": [1, 2]}), &json!({"a": {"0": 1}})),
            vec![PatchOp::Replace {
                path: "/a".into(),
                value: json!({"0": 1})
            }]
        );
    }

    #[test]
    fn adjacent_swap_is_one_move() {
        assert_eq!(
            diff(&json!([1, 2]), &json!([2, 1])),
            vec![PatchOp::Move {
                path: "/1".into(),
                from: "/0".into()
            }]
        );
    }

    #[test]
    fn value_relocated_across_containers() {
        // The same composite value leaves one member and lands in
        // another; pairing finds it through the linear fallback store.
        assert_eq!(
            diff(
                &json!({"a": {"deep": [1, 2]}, "b": 0}),
                &json!({"b": 0, "c": {"deep": [1, 2]}})
            ),
            vec![PatchOp::Move {
                path: "/c".into(),
                from: "/a".into()
            }]
        );
    }

    #[test]
    fn no_spurious_move_for_unequal_values() {
        // A scalar change at one slot never pairs with a different value
        // elsewhere; both slots resolve independently.
        let patch = diff(&json!({"a": 1, "b": 2}), &json!({"a": 2, "b": 3}));
        assert!(patch.iter().all(|op| op.op_name() != "move"), "{patch:?}");
    }

    #[test]
    fn member_keys_with_reserved_characters_are_escaped() {
        assert_eq!(
            diff(&json!({}), &json!({"a/b~c": 1})),
            vec![PatchOp::Add {
                path: "/a~1b~0c".into(),
                value: json!(1)
            }]
        );
    }

    #[test]
    fn no_adjacent_remove_add_on_same_location_survives() {
        let docs = [
            (json!([1, 2, 3]), json!([4, 5, 6])),
            (json!({"xs": [0, 1, 2, 3]}), json!({"xs": [3, 2, 1, 0]})),
            (json!([[1], [2]]), json!([[2], [1]])),
        ];
        for (src, dst) in docs {
            let patch = diff(&src, &dst);
            for pair in patch.windows(2) {
                if let (PatchOp::Remove { path }, PatchOp::Add { path: add_path, .. }) =
                    (&pair[0], &pair[1])
                {
                    assert_ne!(path, add_path, "uncompacted pair in {patch:?}");
                }
            }
        }
    }

    #[test]
    fn move_inside_nested_sequence_path() {
        assert_eq!(
            diff(&json!({"xs": [1, 2]}), &json!({"xs": [2, 1]})),
            vec![PatchOp::Move {
                path: "/xs/1".into(),
                from: "/xs/0".into()
            }]
        );
    }

    #[test]
    fn duplicate_values_pair_across_slots() {
        // Both changed slots hold values that also occur elsewhere, so
        // every half-event finds a partner and the result is pure moves
        // (a surviving remove+add pair would have compacted to replace).
        let src = json!([1, 2, 1]);
        let dst = json!([2, 1, 1]);
        let patch = diff(&src, &dst);
        assert_eq!(
            patch,
            vec![PatchOp::Move {
                path: "/1".into(),
                from: "/0".into()
            }]
        );
    }
}
