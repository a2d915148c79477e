//! Set reconciliation for many-to-many links.
//!
//! A link sync is a pure function of the ids currently linked and the ids the
//! caller wants linked. The join-table writers apply the resulting delta.

use std::collections::BTreeSet;

/// Rows to insert and rows to remove so that `current` becomes `desired`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncDelta {
    pub attach: Vec<i64>,
    pub detach: Vec<i64>,
}

impl SyncDelta {
    pub fn is_empty(&self) -> bool {
        self.attach.is_empty() && self.detach.is_empty()
    }
}

/// Computes the delta turning `current` into `desired`. Both outputs are sorted.
pub fn reconcile(current: &BTreeSet<i64>, desired: &BTreeSet<i64>) -> SyncDelta {
    SyncDelta {
        attach: desired.difference(current).copied().collect(),
        detach: current.difference(desired).copied().collect(),
    }
}

/// Collapses a requested id list into a set. Repeated ids link once.
pub fn desired_set(ids: &[i64]) -> BTreeSet<i64> {
    ids.iter().copied().collect()
}
