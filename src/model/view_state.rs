//! View state: sort, filters, pagination, column visibility and selection

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::row::RowId;
use super::schema::{ColumnId, SchemaRegistry};

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Single active sort column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: ColumnId,
    pub direction: SortDirection,
}

/// Per-column substring filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub column: ColumnId,
    pub value: String,
}

/// Column id -> visible. Absent entries are visible.
pub type ColumnVisibility = BTreeMap<ColumnId, bool>;

/// Everything the view engine needs besides the data itself
#[derive(Debug, Clone)]
pub struct ViewState {
    pub sort: Option<SortSpec>,
    pub global_filter: String,
    pub column_filters: Vec<ColumnFilter>,
    pub page_index: usize,
    pub page_size: usize,
    pub column_visibility: ColumnVisibility,
    pub selection: HashSet<RowId>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl ViewState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            sort: None,
            global_filter: String::new(),
            column_filters: Vec::new(),
            page_index: 0,
            page_size: page_size.max(1),
            column_visibility: ColumnVisibility::new(),
            selection: HashSet::new(),
        }
    }

    /// Toggle sorting on a column: a new column starts ascending, repeated
    /// toggles alternate ascending and descending.
    pub fn toggle_sort(&mut self, column: &ColumnId) {
        let direction = match &self.sort {
            Some(spec) if &spec.column == column => spec.direction.flipped(),
            _ => SortDirection::Ascending,
        };
        self.sort = Some(SortSpec {
            column: column.clone(),
            direction,
        });
    }

    pub fn set_global_filter(&mut self, filter: &str) {
        self.global_filter = filter.to_string();
        self.page_index = 0;
    }

    /// Set (or clear, with an empty value) the filter for one column
    pub fn set_column_filter(&mut self, column: &ColumnId, value: &str) {
        self.column_filters.retain(|f| &f.column != column);
        if !value.is_empty() {
            self.column_filters.push(ColumnFilter {
                column: column.clone(),
                value: value.to_string(),
            });
        }
        self.page_index = 0;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page_index = 0;
    }

    pub fn is_column_visible(&self, column: &ColumnId) -> bool {
        self.column_visibility.get(column).copied().unwrap_or(true)
    }

    /// Returns false if the column cannot be hidden or does not exist
    pub fn set_column_visibility(
        &mut self,
        schema: &SchemaRegistry,
        column: &ColumnId,
        visible: bool,
    ) -> bool {
        match schema.get(column.as_str()) {
            Some(def) if def.hideable => {
                self.column_visibility.insert(column.clone(), visible);
                true
            }
            _ => {
                tracing::debug!("Column '{}' is not hideable", column);
                false
            }
        }
    }

    /// Apply a persisted visibility map, ignoring unknown and non-hideable columns
    pub fn apply_visibility(&mut self, schema: &SchemaRegistry, stored: &ColumnVisibility) {
        for (column, visible) in stored {
            self.set_column_visibility(schema, column, *visible);
        }
    }

    pub fn is_selected(&self, row: &RowId) -> bool {
        self.selection.contains(row)
    }

    /// Selected ids in a stable order
    pub fn selected_ids(&self) -> Vec<RowId> {
        let mut ids: Vec<RowId> = self.selection.iter().cloned().collect();
        ids.sort();
        ids
    }
}
