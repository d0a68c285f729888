//! Pending-change tracking for updatable resources.
//!
//! Setters on updatable resources record each change here instead of
//! mutating the server's view directly; an update call then consumes the
//! accumulated changes into a wire payload.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::wire;

/// One recorded attribute change.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingChange {
    /// The value before the change.
    pub old: Value,
    /// The value after the change.
    pub new: Value,
}

/// Accumulated attribute changes awaiting an update call.
///
/// Keys are snake_case attribute names. Re-tracking an attribute keeps the
/// original `old` value so the full before/after span survives repeated
/// edits.
#[derive(Clone, Debug, Default)]
pub struct ChangeSet {
    changes: HashMap<String, PendingChange>,
}

impl ChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a change to the named attribute.
    ///
    /// A no-op when the value is unchanged.
    pub fn track(&mut self, name: impl Into<String>, old: Value, new: Value) {
        let name = name.into();
        match self.changes.get_mut(&name) {
            Some(existing) => {
                if existing.new != new {
                    existing.new = new;
                }
            }
            None => {
                if old != new {
                    self.changes.insert(name, PendingChange { old, new });
                }
            }
        }
    }

    /// Returns the pending change for an attribute, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PendingChange> {
        self.changes.get(name)
    }

    /// Returns true when no changes are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Returns the number of pending changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Drains the named attributes into a wire-cased payload map.
    ///
    /// Only attributes listed in `names` are taken; anything else stays
    /// pending. Attributes with no pending change are skipped.
    #[must_use]
    pub fn consume(&mut self, names: &[&str]) -> Map<String, Value> {
        let mut payload = Map::new();
        for &name in names {
            if let Some(change) = self.changes.remove(name) {
                payload.insert(wire::camelize(name), change.new);
            }
        }
        payload
    }

    /// Discards all pending changes.
    pub fn clear(&mut self) {
        self.changes.clear();
    }
}
