//! Grid model - the complete state of the table
//!
//! ```text
//! GridModel
//! ├── SchemaRegistry (ordered column definitions)
//! ├── RowStore (active + hidden partitions)
//! ├── TransactionManager (edit state + batch overlay)
//! └── ViewState (sort, filters, page, column visibility, selection)
//! ```
//!
//! Operations that touch more than one component live here so the cross
//! component invariants hold after every call: an overlay entry never
//! outlives its row, and only active rows can be selected.

pub mod edit_overlay;
mod partition;
pub mod row;
pub mod schema;
pub mod value;
pub mod view_state;

pub use edit_overlay::EditOverlay;
pub use row::{Row, RowId, RowStore};
pub use schema::{ColumnDefinition, ColumnId, SchemaRegistry, ACTIONS_COLUMN, SELECT_COLUMN};
pub use value::{CellValue, ValueKind};
pub use view_state::{ColumnFilter, ColumnVisibility, SortDirection, SortSpec, ViewState};

use crate::config::GridConfig;
use crate::error::Result;
use crate::transaction::TransactionManager;
use crate::view::{self, ViewSlice};

/// The complete grid model
#[derive(Debug, Clone)]
pub struct GridModel {
    pub schema: SchemaRegistry,
    pub rows: RowStore,
    pub tx: TransactionManager,
    pub view: ViewState,
    pub config: GridConfig,
}

impl Default for GridModel {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl GridModel {
    /// Empty model with the baseline schema
    pub fn new(config: GridConfig) -> Self {
        Self {
            schema: SchemaRegistry::baseline(),
            rows: RowStore::new(),
            tx: TransactionManager::new(config.edit_mode),
            view: ViewState::with_page_size(config.page_size),
            config,
        }
    }

    /// Model seeded with rows (no validation)
    pub fn with_rows(config: GridConfig, rows: Vec<Row>) -> Self {
        let mut model = Self::new(config);
        model.rows = RowStore::from_rows(rows);
        model
    }

    /// Recompute the displayed slice
    pub fn slice(&self) -> ViewSlice {
        view::recompute(&self.rows, self.tx.overlay(), &self.schema, &self.view)
    }

    /// Active rows after filter and sort, across all pages
    pub fn filtered_rows(&self) -> Vec<&Row> {
        view::filtered_sorted(self.rows.active(), self.tx.overlay(), &self.schema, &self.view)
    }

    // === View state ===

    /// Toggle sort on a sortable column. Returns false for other columns.
    pub fn toggle_sort(&mut self, column: &ColumnId) -> bool {
        match self.schema.get(column.as_str()) {
            Some(def) if def.sortable => {
                self.view.toggle_sort(column);
                true
            }
            _ => {
                tracing::debug!("Column '{}' is not sortable", column);
                false
            }
        }
    }

    /// Flip visibility of a hideable column, returning the new state
    pub fn toggle_column_visible(&mut self, column: &ColumnId) -> Option<bool> {
        let visible = !self.view.is_column_visible(column);
        self.view
            .set_column_visibility(&self.schema, column, visible)
            .then_some(visible)
    }

    /// Jump to a page, clamped to the last page
    pub fn set_page(&mut self, index: usize) {
        let pages = view::page_count(self.filtered_rows().len(), self.view.page_size);
        self.view.page_index = index.min(pages.saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        self.set_page(self.view.page_index + 1);
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.view.page_index.saturating_sub(1));
    }

    /// Toggle selection of an active row. Returns the new selection state,
    /// or `None` if the row is not active.
    pub fn toggle_row_selected(&mut self, row: &RowId) -> Option<bool> {
        if !self.rows.is_active(row) {
            tracing::warn!("toggle_row_selected: row '{}' is not active", row);
            return None;
        }
        if self.view.selection.remove(row) {
            Some(false)
        } else {
            self.view.selection.insert(row.clone());
            Some(true)
        }
    }

    /// Select every row on the current page, or clear them if all are selected
    pub fn toggle_all_page_rows_selected(&mut self) {
        let page: Vec<RowId> = self.slice().rows.into_iter().map(|r| r.id).collect();
        let all_selected = !page.is_empty() && page.iter().all(|id| self.view.is_selected(id));
        for id in page {
            if all_selected {
                self.view.selection.remove(&id);
            } else {
                self.view.selection.insert(id);
            }
        }
    }

    /// Drop selection entries for rows that are no longer active
    fn prune_selection(&mut self) {
        let rows = &self.rows;
        self.view.selection.retain(|id| rows.is_active(id));
    }

    // === Row partition ===

    /// Hide active rows: they leave the view and the selection, and lose any
    /// pending edits. Returns the ids actually hidden.
    pub fn hide_rows(&mut self, ids: &[RowId]) -> Vec<RowId> {
        let moved = self.rows.hide(ids);
        for id in &moved {
            self.tx.forget_row(id);
        }
        self.prune_selection();
        moved
    }

    /// Hide the currently selected rows
    pub fn hide_selected(&mut self) -> Vec<RowId> {
        let ids = self.view.selected_ids();
        self.hide_rows(&ids)
    }

    /// Bring every hidden row back (appended at the end)
    pub fn restore_all(&mut self) -> usize {
        self.rows.restore_all()
    }

    /// Permanently delete a row from either partition
    pub fn delete_row(&mut self, id: &RowId) -> bool {
        let removed = self.rows.remove(id).is_some();
        if removed {
            self.tx.forget_row(id);
            self.view.selection.remove(id);
        }
        removed
    }

    // === Schema ===

    pub fn add_column(&mut self, label: &str, kind: ValueKind) -> Result<ColumnDefinition> {
        self.schema.add_column(label, kind)
    }

    // === Import ===

    /// Replace every row. On failure nothing changes.
    pub fn replace_rows(&mut self, rows: Vec<Row>) -> Result<usize> {
        let count = self.rows.replace_all(rows)?;
        self.tx.reset();
        self.prune_selection();
        self.view.page_index = 0;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> GridModel {
        GridModel::with_rows(
            GridConfig::default(),
            (1..=3)
                .map(|i| Row::new(i.to_string()).with("name", CellValue::Text(format!("n{}", i))))
                .collect(),
        )
    }

    #[test]
    fn test_toggle_sort_ignores_unsortable_columns() {
        let mut model = model();
        model.add_column("Department", ValueKind::Text).unwrap();

        assert!(!model.toggle_sort(&ColumnId::new("department")));
        assert!(!model.toggle_sort(&ColumnId::new("actions")));
        assert!(model.view.sort.is_none());
        assert!(model.toggle_sort(&ColumnId::new("name")));
    }

    #[test]
    fn test_hide_clears_selection() {
        let mut model = model();
        model.toggle_row_selected(&RowId::new("1"));
        model.toggle_row_selected(&RowId::new("2"));

        let hidden = model.hide_selected();
        assert_eq!(hidden.len(), 2);
        assert!(model.view.selection.is_empty());
        assert_eq!(model.slice().rows.len(), 1);
        assert_eq!(model.slice().hidden_count, 2);
    }

    #[test]
    fn test_hidden_rows_cannot_be_selected() {
        let mut model = model();
        model.hide_rows(&[RowId::new("1")]);
        assert_eq!(model.toggle_row_selected(&RowId::new("1")), None);
    }

    #[test]
    fn test_toggle_all_page_rows_selected() {
        let mut model = model();
        model.toggle_all_page_rows_selected();
        assert_eq!(model.view.selection.len(), 3);
        model.toggle_all_page_rows_selected();
        assert!(model.view.selection.is_empty());
    }

    #[test]
    fn test_set_page_clamps() {
        let mut model = model();
        model.view.set_page_size(2);
        model.set_page(10);
        assert_eq!(model.view.page_index, 1);
        model.next_page();
        assert_eq!(model.view.page_index, 1);
        model.previous_page();
        model.previous_page();
        assert_eq!(model.view.page_index, 0);
    }

    #[test]
    fn test_toggle_column_visible() {
        let mut model = model();
        assert_eq!(model.toggle_column_visible(&ColumnId::new("city")), Some(false));
        assert_eq!(model.toggle_column_visible(&ColumnId::new("city")), Some(true));
        assert_eq!(model.toggle_column_visible(&ColumnId::new("select")), None);
    }
}
