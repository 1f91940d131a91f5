//! Row store
//!
//! Canonical, ordered collection of records. Rows are split into an active and
//! a hidden partition (see `partition.rs`); together they are the whole store.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::schema::{ColumnId, REQUIRED_FIELDS};
use super::value::CellValue;
use crate::error::{GridError, Result};

/// Stable row identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(String);

impl RowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RowId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single record. Columns missing from `values` are blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    pub values: HashMap<ColumnId, CellValue>,
}

impl Row {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: RowId::new(id),
            values: HashMap::new(),
        }
    }

    /// Builder-style setter, mostly for fixtures
    pub fn with(mut self, column: &str, value: CellValue) -> Self {
        self.values.insert(ColumnId::new(column), value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.values.get(&ColumnId::new(column))
    }

    pub fn set(&mut self, column: &ColumnId, value: CellValue) {
        self.values.insert(column.clone(), value);
    }
}

/// Canonical row collection
#[derive(Debug, Clone, Default)]
pub struct RowStore {
    pub(super) active: Vec<Row>,
    pub(super) hidden: Vec<Row>,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with all rows active (no validation)
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self {
            active: rows,
            hidden: Vec::new(),
        }
    }

    /// Rows currently shown by the view engine
    pub fn active(&self) -> &[Row] {
        &self.active
    }

    /// Rows set aside by `hide`
    pub fn hidden(&self) -> &[Row] {
        &self.hidden
    }

    /// Every row, active first
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.active.iter().chain(self.hidden.iter())
    }

    pub fn len(&self) -> usize {
        self.active.len() + self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.hidden.is_empty()
    }

    pub fn get(&self, id: &RowId) -> Option<&Row> {
        self.iter().find(|r| &r.id == id)
    }

    fn get_mut(&mut self, id: &RowId) -> Option<&mut Row> {
        self.active
            .iter_mut()
            .chain(self.hidden.iter_mut())
            .find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &RowId) -> bool {
        self.get(id).is_some()
    }

    pub fn is_active(&self, id: &RowId) -> bool {
        self.active.iter().any(|r| &r.id == id)
    }

    /// Current canonical value of a cell
    pub fn value(&self, id: &RowId, column: &ColumnId) -> Option<&CellValue> {
        self.get(id).and_then(|r| r.values.get(column))
    }

    /// Atomically replace every row.
    ///
    /// All rows are validated before anything is touched; on error the store
    /// is unchanged. Returns the number of rows loaded.
    pub fn replace_all(&mut self, rows: Vec<Row>) -> Result<usize> {
        let mut seen = HashSet::with_capacity(rows.len());

        for (idx, row) in rows.iter().enumerate() {
            let row_number = idx + 1;
            if row.id.as_str().trim().is_empty() {
                return Err(GridError::malformed(row_number, "missing required field 'id'"));
            }
            if !seen.insert(&row.id) {
                return Err(GridError::malformed(
                    row_number,
                    format!("duplicate id '{}'", row.id),
                ));
            }
            for field in REQUIRED_FIELDS.iter().filter(|f| **f != "id") {
                if row.get(field).is_none() {
                    return Err(GridError::malformed(
                        row_number,
                        format!("missing required field '{}'", field),
                    ));
                }
            }
            if row.get("age").and_then(CellValue::as_number).is_none() {
                return Err(GridError::malformed(row_number, "'age' is not numeric"));
            }
        }

        let count = rows.len();
        self.active = rows;
        self.hidden.clear();
        tracing::info!("Replaced row store with {} rows", count);
        Ok(count)
    }

    /// Direct canonical write. Returns false (and logs) if the row is unknown.
    pub fn update(&mut self, id: &RowId, column: &ColumnId, value: CellValue) -> bool {
        match self.get_mut(id) {
            Some(row) => {
                row.set(column, value);
                true
            }
            None => {
                tracing::warn!("update: unknown row id '{}'", id);
                false
            }
        }
    }

    /// Append a row to the active partition
    pub fn push(&mut self, row: Row) {
        self.active.push(row);
    }

    /// Permanently delete a row from whichever partition holds it
    pub fn remove(&mut self, id: &RowId) -> Option<Row> {
        if let Some(idx) = self.active.iter().position(|r| &r.id == id) {
            return Some(self.active.remove(idx));
        }
        if let Some(idx) = self.hidden.iter().position(|r| &r.id == id) {
            return Some(self.hidden.remove(idx));
        }
        tracing::warn!("remove: unknown row id '{}'", id);
        None
    }
}
