//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::csv::Delimiter;
use crate::model::row::RowId;
use crate::model::schema::ColumnId;
use crate::model::value::ValueKind;

/// View state messages (sort, filter, pagination, visibility, selection)
#[derive(Debug, Clone, PartialEq)]
pub enum ViewMsg {
    /// Sort by a column; repeated toggles alternate ascending/descending
    ToggleSort(ColumnId),
    /// Replace the global filter text
    SetGlobalFilter(String),
    /// Set (or clear, with an empty value) a per-column filter
    SetColumnFilter { column: ColumnId, value: String },
    /// Jump to a page (clamped)
    SetPage(usize),
    NextPage,
    PreviousPage,
    SetPageSize(usize),
    ToggleRowSelected(RowId),
    /// Select every row on the current page, or clear them all
    ToggleAllPageRowsSelected,
    ToggleColumnVisible(ColumnId),
}

/// Cell editing messages
#[derive(Debug, Clone, PartialEq)]
pub enum EditMsg {
    /// Start editing a cell (completes any edit in progress)
    Begin { row: RowId, column: ColumnId },
    /// Replace the draft text
    SetDraft(String),
    InsertChar(char),
    DeleteBackward,
    /// Finish editing the current cell (blur / Enter)
    Commit,
    /// Abandon the current cell edit
    Cancel,
    /// Edit several fields of one row together
    UpdateRow {
        row: RowId,
        fields: Vec<(ColumnId, String)>,
    },
    /// Flush every pending batch edit
    SaveAll,
    /// Discard every pending batch edit
    CancelAll,
}

/// Row partition and schema messages
#[derive(Debug, Clone, PartialEq)]
pub enum RowsMsg {
    Hide(Vec<RowId>),
    HideSelected,
    RestoreAll,
    Delete(RowId),
    AddColumn { label: String, kind: ValueKind },
}

/// Import/export messages
#[derive(Debug, Clone, PartialEq)]
pub enum IoMsg {
    /// Replace all rows with parsed delimited text. Without an explicit
    /// delimiter the configured one is used.
    Import {
        text: String,
        delimiter: Option<Delimiter>,
    },
    /// Serialize the filtered/sorted view
    Export,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum GridMsg {
    View(ViewMsg),
    Edit(EditMsg),
    Rows(RowsMsg),
    Io(IoMsg),
}

// Convenience constructors for common messages
impl GridMsg {
    pub fn toggle_sort(column: &str) -> Self {
        GridMsg::View(ViewMsg::ToggleSort(ColumnId::new(column)))
    }

    pub fn set_global_filter(text: &str) -> Self {
        GridMsg::View(ViewMsg::SetGlobalFilter(text.to_string()))
    }

    pub fn toggle_row_selected(row: &str) -> Self {
        GridMsg::View(ViewMsg::ToggleRowSelected(RowId::new(row)))
    }

    pub fn toggle_column_visible(column: &str) -> Self {
        GridMsg::View(ViewMsg::ToggleColumnVisible(ColumnId::new(column)))
    }

    pub fn begin_edit(row: &str, column: &str) -> Self {
        GridMsg::Edit(EditMsg::Begin {
            row: RowId::new(row),
            column: ColumnId::new(column),
        })
    }

    /// Begin, type and commit a single cell in one go
    pub fn edit_cell(row: &str, column: &str, text: &str) -> Vec<Self> {
        vec![
            Self::begin_edit(row, column),
            GridMsg::Edit(EditMsg::SetDraft(text.to_string())),
            GridMsg::Edit(EditMsg::Commit),
        ]
    }

    pub fn import(text: impl Into<String>) -> Self {
        GridMsg::Io(IoMsg::Import {
            text: text.into(),
            delimiter: None,
        })
    }
}
