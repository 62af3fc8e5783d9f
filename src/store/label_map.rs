use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::allocator::IdAllocator;
use super::reverse::ReverseIndex;
use crate::config::LabelMapConfig;
use crate::error::{LabelMapError, Result};
use crate::fingerprint::{self, MapFingerprint};
use crate::render::{self, RenderOptions};
use crate::source::Table;
use crate::types::{IdType, LabelId, LoadSummary};

/// Bidirectional label <-> id registry.
///
/// The forward index (label -> id) is authoritative and keeps labels in
/// first-seen order. The reverse index is a cache rebuilt on the first
/// `to_text` after any mutation. Every instance owns its own state; nothing
/// is shared between maps.
#[derive(Debug, Clone)]
pub struct LabelMap {
    forward: IndexMap<String, LabelId>,
    reverse: ReverseIndex,
    allocator: IdAllocator,
    id_type: IdType,
    source: Option<Table>,
}

impl Default for LabelMap {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelMap {
    /// Empty map with integer ids.
    pub fn new() -> Self {
        Self::with_id_type(IdType::Int)
    }

    pub fn with_id_type(id_type: IdType) -> Self {
        Self {
            forward: IndexMap::new(),
            reverse: ReverseIndex::new(),
            allocator: IdAllocator::new(),
            id_type,
            source: None,
        }
    }

    /// Build a map from an already-parsed table and retain the table.
    pub fn from_table(
        table: Table,
        label_column: &str,
        id_column: Option<&str>,
        id_type: IdType,
    ) -> Result<Self> {
        let mut map = Self::with_id_type(id_type);
        map.populate_from_table(table, label_column, id_column)?;
        Ok(map)
    }

    /// Build a map from its configuration surface.
    ///
    /// The id type is validated first, also when no source is configured. A
    /// source without a label column is rejected before the source is read.
    pub fn from_config(config: LabelMapConfig) -> Result<Self> {
        let id_type = config.parsed_id_type()?;
        let Some(source) = config.source else {
            return Ok(Self::with_id_type(id_type));
        };
        let label_column = config.label_column.ok_or_else(|| {
            LabelMapError::InvalidConfiguration(
                "label_column is required when a source table is given".to_string(),
            )
        })?;
        let table = source.load()?;
        Self::from_table(table, &label_column, config.id_column.as_deref(), id_type)
    }

    /// Insert every not-yet-seen label of `table`, in row order.
    ///
    /// Ids come from `id_column` when given, otherwise from the counter. The
    /// counter advances once per inserted label either way. Rows whose label
    /// is already present are skipped; the first occurrence wins. All rows are
    /// resolved before anything is inserted, so an unreadable id leaves the
    /// map unchanged. On success the table replaces the retained source.
    pub fn populate_from_table(
        &mut self,
        table: Table,
        label_column: &str,
        id_column: Option<&str>,
    ) -> Result<LoadSummary> {
        let label_idx = table.require_column(label_column)?;
        let id_col = match id_column {
            Some(name) => Some((table.require_column(name)?, name)),
            None => None,
        };
        table.validate()?;

        let mut pending: Vec<(String, Option<LabelId>)> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut skipped = 0;

        for (row_no, row) in table.rows().enumerate() {
            let label = row[label_idx].as_str();
            if self.forward.contains_key(label) || !seen.insert(label) {
                trace!(row = row_no, label, "skipping duplicate label");
                skipped += 1;
                continue;
            }
            let explicit = match id_col {
                Some((idx, name)) => match self.id_type.parse_id(&row[idx]) {
                    Some(id) => Some(id),
                    None => {
                        return Err(LabelMapError::InvalidId {
                            row: row_no,
                            column: name.to_string(),
                            value: row[idx].clone(),
                            id_type: self.id_type,
                        })
                    }
                },
                None => None,
            };
            pending.push((label.to_string(), explicit));
        }

        let summary = LoadSummary {
            rows: table.len(),
            inserted: pending.len(),
            skipped,
        };
        for (label, explicit) in pending {
            let id = explicit.unwrap_or_else(|| self.allocator.peek(self.id_type));
            self.forward.insert(label, id);
            self.allocator.advance();
        }
        if summary.inserted > 0 {
            self.reverse.invalidate();
        }
        self.source = Some(table);

        debug!(
            rows = summary.rows,
            inserted = summary.inserted,
            skipped = summary.skipped,
            next_id = self.allocator.value(),
            "loaded labels from table"
        );
        Ok(summary)
    }

    fn insert_next(&mut self, label: &str) -> LabelId {
        let id = self.allocator.peek(self.id_type);
        self.forward.insert(label.to_string(), id);
        self.allocator.advance();
        self.reverse.invalidate();
        id
    }

    /// Insert `label` with the next counter id. No-op if already present.
    pub fn add(&mut self, label: &str) {
        if !self.forward.contains_key(label) {
            self.insert_next(label);
        }
    }

    /// Id of `label`, inserting it first if absent. Never fails.
    pub fn force_get(&mut self, label: &str) -> LabelId {
        match self.forward.get(label) {
            Some(id) => *id,
            None => self.insert_next(label),
        }
    }

    /// Label owning `id`, rebuilding the reverse index if it is stale.
    pub fn to_text(&mut self, id: impl Into<LabelId>) -> Result<&str> {
        let id = id.into();
        self.reverse.refresh(self.forward.iter());
        self.reverse.lookup(&id).ok_or(LabelMapError::IdNotFound(id))
    }

    /// Id of `label`. Reads the forward index only.
    pub fn to_id(&self, label: &str) -> Result<LabelId> {
        self.forward
            .get(label)
            .copied()
            .ok_or_else(|| LabelMapError::LabelNotFound(label.to_string()))
    }

    /// Read-only view of the forward index.
    pub fn map(&self) -> &IndexMap<String, LabelId> {
        &self.forward
    }

    /// Labels in first-seen order. Each call starts a fresh iterator.
    pub fn labels(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.forward.keys().map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.forward.contains_key(label)
    }

    pub fn count(&self) -> usize {
        self.forward.len()
    }

    pub fn len(&self) -> usize {
        self.count()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// The table this map was loaded from, if any.
    pub fn source_table(&self) -> Option<&Table> {
        self.source.as_ref()
    }

    pub fn id_type(&self) -> IdType {
        self.id_type
    }

    /// Current counter value, i.e. the number of labels inserted so far.
    pub fn next_id(&self) -> u64 {
        self.allocator.value()
    }

    /// True while the reverse index does not reflect the forward index.
    pub fn is_dirty(&self) -> bool {
        self.reverse.is_stale()
    }

    pub fn render(&self) -> String {
        self.render_with(&RenderOptions::default())
    }

    pub fn render_with(&self, options: &RenderOptions) -> String {
        render::render_table(self, options)
    }

    pub fn fingerprint(&self) -> MapFingerprint {
        fingerprint::map_fingerprint(self)
    }
}

impl fmt::Display for LabelMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label_table(labels: &[&str]) -> Table {
        let mut table = Table::new(["label"]);
        for l in labels {
            table.push_row([*l]).unwrap();
        }
        table
    }

    #[test]
    fn new_map_is_empty_and_stale() {
        let map = LabelMap::new();
        assert_eq!(map.count(), 0);
        assert_eq!(map.id_type(), IdType::Int);
        assert!(map.is_dirty(), "reverse index has never been built");
        assert!(map.source_table().is_none());
    }

    #[test]
    fn add_is_idempotent() {
        let mut map = LabelMap::new();
        map.add("cat");
        let first = map.to_id("cat").unwrap();
        map.add("cat");
        assert_eq!(map.to_id("cat").unwrap(), first);
        assert_eq!(map.count(), 1);
        assert_eq!(map.next_id(), 1, "no-op add must not advance the counter");
    }

    #[test]
    fn noop_add_keeps_cache_clean() {
        let mut map = LabelMap::new();
        map.add("cat");
        map.to_text(0).unwrap();
        assert!(!map.is_dirty());
        map.add("cat");
        assert!(!map.is_dirty(), "re-adding a present label changes nothing");
        map.add("dog");
        assert!(map.is_dirty());
    }

    #[test]
    fn to_text_reuses_cache_between_mutations() {
        let mut map = LabelMap::new();
        map.add("cat");
        map.add("dog");
        assert_eq!(map.to_text(1).unwrap(), "dog");
        assert_eq!(map.to_text(0).unwrap(), "cat");
        assert_eq!(map.reverse.rebuilds(), 1);

        map.add("bird");
        assert_eq!(map.to_text(2).unwrap(), "bird");
        assert_eq!(map.reverse.rebuilds(), 2);
    }

    #[test]
    fn invalid_id_leaves_map_untouched() {
        let table = Table::new(["label", "id"])
            .with_row(["cat", "1"])
            .unwrap()
            .with_row(["dog", "two"])
            .unwrap();
        let mut map = LabelMap::new();
        map.add("fish");
        let err = map
            .populate_from_table(table, "label", Some("id"))
            .unwrap_err();
        assert!(
            matches!(err, LabelMapError::InvalidId { row: 1, ref value, .. } if value == "two"),
            "got {:?}",
            err
        );
        assert_eq!(map.labels().collect::<Vec<_>>(), ["fish"]);
        assert_eq!(map.next_id(), 1);
        assert!(map.source_table().is_none());
    }

    #[test]
    fn invalid_id_on_duplicate_row_is_ignored() {
        let table = Table::new(["label", "id"])
            .with_row(["cat", "1"])
            .unwrap()
            .with_row(["cat", "oops"])
            .unwrap();
        let map = LabelMap::from_table(table, "label", Some("id"), IdType::Int).unwrap();
        assert_eq!(map.to_id("cat").unwrap(), LabelId::Int(1));
    }

    #[test]
    fn summary_counts_rows() {
        let mut map = LabelMap::new();
        map.add("dog");
        let summary = map
            .populate_from_table(label_table(&["cat", "dog", "cat"]), "label", None)
            .unwrap();
        assert_eq!(
            summary,
            LoadSummary {
                rows: 3,
                inserted: 1,
                skipped: 2
            }
        );
        assert_eq!(map.to_id("cat").unwrap(), LabelId::Int(1));
    }

    #[test]
    fn missing_label_column_is_configuration_error() {
        let err = LabelMap::from_table(label_table(&["cat"]), "class", None, IdType::Int)
            .unwrap_err();
        assert!(matches!(err, LabelMapError::InvalidConfiguration(_)));
    }
}
