//! View engine
//!
//! Pure derivation of the displayed slice from the row store, the edit
//! overlay, the schema and the view state. Order of operations is fixed:
//!
//! ```text
//! active rows (hidden partition excluded)
//!   -> global filter (visible data columns)
//!   -> per-column filters
//!   -> sort (single column)
//!   -> paginate
//!   -> column visibility
//! ```
//!
//! Nothing here mutates state; call [`recompute`] after every change.

mod filter;
mod sort;

pub use filter::{matches_column_filters, matches_global};
pub use sort::sort_rows;

use crate::model::edit_overlay::EditOverlay;
use crate::model::row::{Row, RowId, RowStore};
use crate::model::schema::{ColumnDefinition, SchemaRegistry};
use crate::model::value::CellValue;
use crate::model::view_state::{SortSpec, ViewState};

/// A display-ready row
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRow {
    pub id: RowId,
    /// One entry per visible column, in column order (`None` for blank and
    /// structural cells)
    pub cells: Vec<Option<CellValue>>,
    pub selected: bool,
    /// Row has uncommitted batch edits
    pub pending: bool,
}

/// Output of the view engine
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSlice {
    pub columns: Vec<ColumnDefinition>,
    pub rows: Vec<ViewRow>,
    pub sort: Option<SortSpec>,
    /// Rows that passed the filters, across all pages
    pub filtered_count: usize,
    /// Effective (clamped) page index
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub hidden_count: usize,
    pub selected_count: usize,
}

impl ViewSlice {
    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_ids(&self) -> Vec<&RowId> {
        self.rows.iter().map(|r| &r.id).collect()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id.as_str() == column)
    }

    /// Look up a cell of a displayed row by column id
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.cells.get(col)?.as_ref()
    }
}

/// Columns rendered by the view, in definition order
pub fn visible_columns<'a>(
    schema: &'a SchemaRegistry,
    state: &ViewState,
) -> Vec<&'a ColumnDefinition> {
    schema
        .columns()
        .iter()
        .filter(|c| state.is_column_visible(&c.id))
        .collect()
}

/// Steps 1-3: filter and sort the active rows, ignoring pagination
pub fn filtered_sorted<'a>(
    rows: &'a [Row],
    overlay: &EditOverlay,
    schema: &SchemaRegistry,
    state: &ViewState,
) -> Vec<&'a Row> {
    let searched: Vec<&ColumnDefinition> = visible_columns(schema, state)
        .into_iter()
        .filter(|c| !c.structural)
        .collect();

    let mut result: Vec<&Row> = rows
        .iter()
        .filter(|row| matches_global(row, overlay, &searched, &state.global_filter))
        .filter(|row| matches_column_filters(row, overlay, &state.column_filters))
        .collect();

    if let Some(spec) = &state.sort {
        match schema.get(spec.column.as_str()) {
            Some(column) if column.sortable => {
                sort_rows(&mut result, overlay, column, spec.direction)
            }
            _ => tracing::debug!("Ignoring sort on non-sortable column '{}'", spec.column),
        }
    }

    result
}

/// Number of pages for `len` rows (zero rows means zero pages)
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Derive the displayed slice
pub fn recompute(
    store: &RowStore,
    overlay: &EditOverlay,
    schema: &SchemaRegistry,
    state: &ViewState,
) -> ViewSlice {
    let ordered = filtered_sorted(store.active(), overlay, schema, state);
    let filtered_count = ordered.len();

    let page_size = state.page_size.max(1);
    let page_count = page_count(filtered_count, page_size);
    let page_index = state.page_index.min(page_count.saturating_sub(1));
    let start = (page_index * page_size).min(filtered_count);
    let end = (start + page_size).min(filtered_count);

    let columns: Vec<ColumnDefinition> = visible_columns(schema, state)
        .into_iter()
        .cloned()
        .collect();

    let rows = ordered[start..end]
        .iter()
        .map(|row| ViewRow {
            id: row.id.clone(),
            cells: columns
                .iter()
                .map(|c| {
                    if c.structural {
                        None
                    } else {
                        overlay.effective(row, &c.id).cloned()
                    }
                })
                .collect(),
            selected: state.is_selected(&row.id),
            pending: overlay.rows_with_edits().any(|id| id == &row.id),
        })
        .collect();

    ViewSlice {
        columns,
        rows,
        sort: state.sort.clone(),
        filtered_count,
        page_index,
        page_size,
        page_count,
        hidden_count: store.hidden_count(),
        selected_count: state.selection.len(),
    }
}
