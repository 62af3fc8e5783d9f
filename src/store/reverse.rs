use std::collections::HashMap;

use tracing::{trace, warn};

use crate::types::LabelId;

/// Lazily rebuilt id -> label cache.
///
/// Never authoritative: it is re-derived from the forward index whenever it
/// is stale. A fresh index is stale until its first rebuild.
#[derive(Debug, Clone)]
pub struct ReverseIndex {
    id_to_label: HashMap<LabelId, String>,
    dirty: bool,
    rebuilds: u64,
}

impl Default for ReverseIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl ReverseIndex {
    pub fn new() -> Self {
        Self {
            id_to_label: HashMap::new(),
            dirty: true,
            rebuilds: 0,
        }
    }

    /// Mark the cache stale after the forward index changed.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_stale(&self) -> bool {
        self.dirty
    }

    /// Number of rebuilds performed so far.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Rebuild from `(label, id)` pairs in forward order.
    ///
    /// When two labels share an id the later one wins; the earlier label is
    /// unreachable through this index until the collision goes away.
    pub fn rebuild<'a, I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (&'a String, &'a LabelId)>,
    {
        self.id_to_label.clear();
        for (label, id) in entries {
            if let Some(previous) = self.id_to_label.insert(*id, label.clone()) {
                warn!(
                    id = %id,
                    dropped = %previous,
                    kept = %label,
                    "duplicate id in label map, reverse lookup keeps the later label"
                );
            }
        }
        self.dirty = false;
        self.rebuilds += 1;
        trace!(entries = self.id_to_label.len(), "rebuilt reverse index");
    }

    /// Rebuild only if stale.
    pub fn refresh<'a, I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (&'a String, &'a LabelId)>,
    {
        if self.dirty {
            self.rebuild(entries);
        }
    }

    pub fn lookup(&self, id: &LabelId) -> Option<&str> {
        self.id_to_label.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.id_to_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_label.is_empty()
    }
}
