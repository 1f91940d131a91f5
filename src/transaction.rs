//! Transaction manager
//!
//! The only writer of the row store during editing. Two disciplines:
//!
//! ```text
//! Immediate:  Viewing -> Editing(row, col) -> { Committed | Reverted } -> Viewing
//! Batch:      Viewing <-> Editing(row, col)        Clean <-> Dirty
//!             completed edits go to the overlay; SaveAll flushes, CancelAll discards
//! ```
//!
//! Numeric columns reject non-numeric input in both modes. A rejection only
//! reverts the cell being edited.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::model::edit_overlay::EditOverlay;
use crate::model::row::{RowId, RowStore};
use crate::model::schema::{ColumnDefinition, ColumnId, SchemaRegistry};
use crate::model::value::CellValue;

/// Which discipline governs cell edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// Each completed cell edit is written straight to the row store
    #[default]
    Immediate,
    /// Completed edits accumulate in the overlay until SaveAll/CancelAll
    Batch,
}

/// An in-progress cell edit
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub row_id: RowId,
    pub column_id: ColumnId,
    /// Value shown before editing started (overlay-shadowed in batch mode)
    pub original: Option<CellValue>,
    /// Text typed so far
    pub draft: String,
}

impl EditSession {
    fn new(row_id: RowId, column_id: ColumnId, original: Option<CellValue>) -> Self {
        let draft = original.as_ref().map(|v| v.to_string()).unwrap_or_default();
        Self {
            row_id,
            column_id,
            original,
            draft,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.draft
    }

    pub fn insert_char(&mut self, ch: char) {
        self.draft.push(ch);
    }

    pub fn delete_backward(&mut self) {
        self.draft.pop();
    }

    /// Check if the draft differs from the text shown before editing
    pub fn is_modified(&self) -> bool {
        let original = self.original.as_ref().map(|v| v.to_string()).unwrap_or_default();
        self.draft != original
    }
}

/// Editing state machine
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditState {
    #[default]
    Viewing,
    Editing(EditSession),
}

/// Why an edit ended without a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertReason {
    Unchanged,
    Cancelled,
}

/// Result of finishing a cell edit
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// Written to the row store (immediate mode)
    Committed {
        row_id: RowId,
        column_id: ColumnId,
        old: Option<CellValue>,
        new: CellValue,
    },
    /// Recorded in the overlay (batch mode)
    Staged {
        row_id: RowId,
        column_id: ColumnId,
        value: CellValue,
    },
    /// Nothing written
    Reverted {
        row_id: RowId,
        column_id: ColumnId,
        reason: RevertReason,
    },
    /// Input failed validation; the cell keeps its pre-edit value
    Rejected {
        row_id: RowId,
        column_id: ColumnId,
        error: GridError,
    },
}

/// Counts reported after a batch flush
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveSummary {
    pub cells: usize,
    pub rows: usize,
}

/// Governs how edits reach the row store
#[derive(Debug, Clone, Default)]
pub struct TransactionManager {
    mode: EditMode,
    state: EditState,
    overlay: EditOverlay,
}

impl TransactionManager {
    pub fn new(mode: EditMode) -> Self {
        Self {
            mode,
            state: EditState::Viewing,
            overlay: EditOverlay::new(),
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn overlay(&self) -> &EditOverlay {
        &self.overlay
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing(_))
    }

    pub fn editing(&self) -> Option<&EditSession> {
        match &self.state {
            EditState::Editing(session) => Some(session),
            EditState::Viewing => None,
        }
    }

    fn editing_mut(&mut self) -> Option<&mut EditSession> {
        match &mut self.state {
            EditState::Editing(session) => Some(session),
            EditState::Viewing => None,
        }
    }

    /// Batch mode with pending edits
    pub fn is_dirty(&self) -> bool {
        !self.overlay.is_empty()
    }

    /// Begin editing a cell.
    ///
    /// If another cell is being edited it is completed first, and its outcome
    /// is returned. Hidden rows and structural columns cannot be edited.
    pub fn begin_edit(
        &mut self,
        rows: &mut RowStore,
        schema: &SchemaRegistry,
        row_id: &RowId,
        column_id: &ColumnId,
    ) -> Result<Option<EditOutcome>> {
        if !rows.is_active(row_id) {
            return Err(GridError::UnknownRowId {
                id: row_id.to_string(),
            });
        }
        editable_column(schema, column_id)?;

        let previous = self.complete_edit(rows, schema);

        let original = match rows.get(row_id) {
            Some(row) => self.overlay.effective(row, column_id).cloned(),
            None => None,
        };
        tracing::debug!("Editing ({}, {})", row_id, column_id);
        self.state = EditState::Editing(EditSession::new(
            row_id.clone(),
            column_id.clone(),
            original,
        ));
        Ok(previous)
    }

    /// Replace the draft of the current edit
    pub fn set_draft(&mut self, text: &str) {
        if let Some(session) = self.editing_mut() {
            session.draft = text.to_string();
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        if let Some(session) = self.editing_mut() {
            session.insert_char(ch);
        }
    }

    pub fn delete_backward(&mut self) {
        if let Some(session) = self.editing_mut() {
            session.delete_backward();
        }
    }

    /// Abandon the current edit without writing anything
    pub fn cancel_edit(&mut self) -> Option<EditOutcome> {
        match std::mem::take(&mut self.state) {
            EditState::Editing(session) => Some(EditOutcome::Reverted {
                row_id: session.row_id,
                column_id: session.column_id,
                reason: RevertReason::Cancelled,
            }),
            EditState::Viewing => None,
        }
    }

    /// Finish the current edit (blur / Enter).
    ///
    /// Returns `None` when nothing was being edited.
    pub fn complete_edit(
        &mut self,
        rows: &mut RowStore,
        schema: &SchemaRegistry,
    ) -> Option<EditOutcome> {
        let EditState::Editing(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        let EditSession {
            row_id,
            column_id,
            original,
            draft,
        } = session;

        let column = match editable_column(schema, &column_id) {
            Ok(column) => column,
            Err(error) => {
                return Some(EditOutcome::Rejected {
                    row_id,
                    column_id,
                    error,
                })
            }
        };

        let new = match CellValue::parse(column.value_kind, column_id.as_str(), &draft) {
            Ok(value) => value,
            Err(error) => {
                tracing::debug!("Rejected edit of ({}, {}): {}", row_id, column_id, error);
                return Some(EditOutcome::Rejected {
                    row_id,
                    column_id,
                    error,
                });
            }
        };

        let unchanged = match &original {
            Some(value) => value == &new,
            None => draft.is_empty(),
        };
        if unchanged {
            return Some(EditOutcome::Reverted {
                row_id,
                column_id,
                reason: RevertReason::Unchanged,
            });
        }

        Some(self.apply(rows, row_id, column_id, new))
    }

    /// Route a validated value through the active discipline
    fn apply(
        &mut self,
        rows: &mut RowStore,
        row_id: RowId,
        column_id: ColumnId,
        new: CellValue,
    ) -> EditOutcome {
        match self.mode {
            EditMode::Immediate => {
                let old = rows.value(&row_id, &column_id).cloned();
                if rows.update(&row_id, &column_id, new.clone()) {
                    EditOutcome::Committed {
                        row_id,
                        column_id,
                        old,
                        new,
                    }
                } else {
                    let error = GridError::UnknownRowId {
                        id: row_id.to_string(),
                    };
                    EditOutcome::Rejected {
                        row_id,
                        column_id,
                        error,
                    }
                }
            }
            EditMode::Batch => {
                if rows.value(&row_id, &column_id) == Some(&new) {
                    // Back to the canonical value: nothing left pending
                    self.overlay.discard(&row_id, &column_id);
                } else {
                    self.overlay
                        .stage(row_id.clone(), column_id.clone(), new.clone());
                }
                EditOutcome::Staged {
                    row_id,
                    column_id,
                    value: new,
                }
            }
        }
    }

    /// Edit several fields of one row at once.
    ///
    /// Every field is validated before anything is written; one invalid field
    /// rejects the whole edit. Hidden rows are rejected like unknown ones.
    /// Returns the number of cells that changed.
    pub fn update_row(
        &mut self,
        rows: &mut RowStore,
        schema: &SchemaRegistry,
        row_id: &RowId,
        fields: &[(ColumnId, String)],
    ) -> Result<usize> {
        let Some(row) = rows.get(row_id).filter(|_| rows.is_active(row_id)) else {
            tracing::warn!("update_row: unknown or hidden row id '{}'", row_id);
            return Err(GridError::UnknownRowId {
                id: row_id.to_string(),
            });
        };

        let mut changes = Vec::with_capacity(fields.len());
        for (column_id, input) in fields {
            let column = editable_column(schema, column_id)?;
            let value = CellValue::parse(column.value_kind, column_id.as_str(), input)?;
            if self.overlay.effective(row, column_id) != Some(&value) {
                changes.push((column_id.clone(), value));
            }
        }

        if self.editing().map(|s| &s.row_id == row_id).unwrap_or(false) {
            self.cancel_edit();
        }

        let count = changes.len();
        for (column_id, value) in changes {
            self.apply(rows, row_id.clone(), column_id, value);
        }
        Ok(count)
    }

    /// Flush every pending overlay entry into the row store.
    ///
    /// Returns `None` when there is nothing to save.
    pub fn save_all(&mut self, rows: &mut RowStore) -> Option<SaveSummary> {
        if !self.is_dirty() {
            return None;
        }

        let entries = self.overlay.drain_sorted();
        let mut touched_rows: Vec<&RowId> = Vec::new();
        let mut cells = 0;
        for ((row_id, column_id), value) in &entries {
            if rows.update(row_id, column_id, value.clone()) {
                cells += 1;
                if touched_rows.last() != Some(&row_id) {
                    touched_rows.push(row_id);
                }
            }
        }

        let summary = SaveSummary {
            cells,
            rows: touched_rows.len(),
        };
        tracing::info!("Saved {} cells across {} rows", summary.cells, summary.rows);
        Some(summary)
    }

    /// Discard every pending edit, including one in progress.
    /// Returns the number of overlay entries dropped.
    pub fn cancel_all(&mut self) -> usize {
        self.cancel_edit();
        let count = self.overlay.len();
        self.overlay.clear();
        if count > 0 {
            tracing::info!("Discarded {} pending edits", count);
        }
        count
    }

    /// Drop all edit state for a row that left the active partition
    pub fn forget_row(&mut self, row_id: &RowId) -> usize {
        if self.editing().map(|s| &s.row_id == row_id).unwrap_or(false) {
            self.cancel_edit();
        }
        self.overlay.drop_row(row_id)
    }

    /// Drop everything (used when the row store is replaced)
    pub fn reset(&mut self) {
        self.state = EditState::Viewing;
        self.overlay.clear();
    }
}

fn editable_column<'a>(
    schema: &'a SchemaRegistry,
    column_id: &ColumnId,
) -> Result<&'a ColumnDefinition> {
    match schema.get(column_id.as_str()) {
        Some(column) if !column.structural => Ok(column),
        Some(_) => Err(GridError::validation(
            column_id.as_str(),
            "column is not editable",
        )),
        None => Err(GridError::validation(column_id.as_str(), "unknown column")),
    }
}
