//! Active/hidden row partition
//!
//! Hidden rows are excluded from the view but kept for restoration. A row is
//! always in exactly one partition.

use std::collections::HashSet;

use super::row::{RowId, RowStore};

impl RowStore {
    /// Move the given active rows into the hidden partition, preserving their
    /// relative order. Ids that are already hidden or unknown are skipped.
    /// Returns the ids actually moved.
    pub fn hide(&mut self, ids: &[RowId]) -> Vec<RowId> {
        let wanted: HashSet<&RowId> = ids.iter().collect();
        let (moving, staying): (Vec<_>, Vec<_>) = std::mem::take(&mut self.active)
            .into_iter()
            .partition(|row| wanted.contains(&row.id));

        self.active = staying;
        let moved: Vec<RowId> = moving.iter().map(|r| r.id.clone()).collect();
        self.hidden.extend(moving);

        if moved.len() != wanted.len() {
            tracing::debug!(
                "hide: {} of {} ids were not active",
                wanted.len() - moved.len(),
                wanted.len()
            );
        }
        moved
    }

    /// Move every hidden row back to the end of the active partition.
    ///
    /// Original positions are not restored. Returns the number of rows restored.
    pub fn restore_all(&mut self) -> usize {
        let count = self.hidden.len();
        self.active.append(&mut self.hidden);
        count
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden.len()
    }

    pub fn has_hidden_rows(&self) -> bool {
        !self.hidden.is_empty()
    }

    pub fn is_hidden(&self, id: &RowId) -> bool {
        self.hidden.iter().any(|r| &r.id == id)
    }
}
