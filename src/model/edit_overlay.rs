//! Pending-edit overlay for batch mode
//!
//! Candidate values keyed by (row, column) that shadow the canonical store
//! until they are flushed or discarded.

use std::collections::HashMap;

use super::row::{Row, RowId};
use super::schema::ColumnId;
use super::value::CellValue;

/// Key of a single pending cell
pub type CellKey = (RowId, ColumnId);

/// Uncommitted edits
#[derive(Debug, Clone, Default)]
pub struct EditOverlay {
    entries: HashMap<CellKey, CellValue>,
}

impl EditOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, row: &RowId, column: &ColumnId) -> Option<&CellValue> {
        self.entries.get(&(row.clone(), column.clone()))
    }

    /// Record (or replace) the candidate value for a cell
    pub fn stage(&mut self, row: RowId, column: ColumnId, value: CellValue) {
        self.entries.insert((row, column), value);
    }

    /// Drop the pending value for one cell
    pub fn discard(&mut self, row: &RowId, column: &ColumnId) -> Option<CellValue> {
        self.entries.remove(&(row.clone(), column.clone()))
    }

    /// Drop every pending value for a row. Returns how many were dropped.
    pub fn drop_row(&mut self, row: &RowId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(r, _), _| r != row);
        before - self.entries.len()
    }

    pub fn rows_with_edits(&self) -> impl Iterator<Item = &RowId> {
        self.entries.keys().map(|(r, _)| r)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Take every entry, sorted by key so flushes are deterministic
    pub fn drain_sorted(&mut self) -> Vec<(CellKey, CellValue)> {
        let mut entries: Vec<_> = self.entries.drain().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Value a view should show: the overlay if present, else the canonical row
    pub fn effective<'a>(&'a self, row: &'a Row, column: &ColumnId) -> Option<&'a CellValue> {
        if self.entries.is_empty() {
            return row.values.get(column);
        }
        self.get(&row.id, column).or_else(|| row.values.get(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_prefers_overlay() {
        let row = Row::new("1").with("name", CellValue::Text("Alice".to_string()));
        let mut overlay = EditOverlay::new();
        let name = ColumnId::new("name");

        assert_eq!(
            overlay.effective(&row, &name),
            Some(&CellValue::Text("Alice".to_string()))
        );

        overlay.stage(RowId::new("1"), name.clone(), CellValue::Text("Alicia".to_string()));
        assert_eq!(
            overlay.effective(&row, &name),
            Some(&CellValue::Text("Alicia".to_string()))
        );
    }

    #[test]
    fn test_drop_row_only_touches_that_row() {
        let mut overlay = EditOverlay::new();
        overlay.stage(RowId::new("1"), ColumnId::new("name"), CellValue::Text("a".into()));
        overlay.stage(RowId::new("1"), ColumnId::new("role"), CellValue::Text("b".into()));
        overlay.stage(RowId::new("2"), ColumnId::new("name"), CellValue::Text("c".into()));

        assert_eq!(overlay.drop_row(&RowId::new("1")), 2);
        assert_eq!(overlay.len(), 1);
    }

    #[test]
    fn test_drain_sorted_empties_overlay() {
        let mut overlay = EditOverlay::new();
        overlay.stage(RowId::new("2"), ColumnId::new("name"), CellValue::Text("b".into()));
        overlay.stage(RowId::new("1"), ColumnId::new("name"), CellValue::Text("a".into()));

        let drained = overlay.drain_sorted();
        assert_eq!(drained[0].0 .0, RowId::new("1"));
        assert_eq!(drained.len(), 2);
        assert!(overlay.is_empty());
    }
}
