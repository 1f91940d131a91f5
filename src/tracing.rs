//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! edit transactions, row partitioning and view state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=message=debug,grid=debug` - scoped filtering
//! - `RUST_LOG=datagrid::transaction=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/datagrid/logs/datagrid.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::GridModel;
use crate::transaction::EditState;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes
/// to `<config dir>/logs/datagrid.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console goes to stderr so table output on stdout stays clean
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_NAME);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // try_init so tests and embedders that already installed a subscriber
    // don't panic
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of grid state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub active: usize,
    pub hidden: usize,
    pub columns: usize,
    pub pending: usize,
    pub selected: usize,
    pub page_index: usize,
    pub editing: Option<String>,
    pub sort: Option<String>,
    pub filter: String,
}

impl ViewSnapshot {
    pub fn from_model(model: &GridModel) -> Self {
        Self {
            active: model.rows.active().len(),
            hidden: model.rows.hidden_count(),
            columns: model.schema.len(),
            pending: model.tx.overlay().len(),
            selected: model.view.selection.len(),
            page_index: model.view.page_index,
            editing: match model.tx.state() {
                EditState::Viewing => None,
                EditState::Editing(s) => Some(format!("{}/{}", s.row_id, s.column_id)),
            },
            sort: model
                .view
                .sort
                .as_ref()
                .map(|s| format!("{} {:?}", s.column, s.direction)),
            filter: model.view.global_filter.clone(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &ViewSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.active != other.active || self.hidden != other.hidden {
            changes.push(format!(
                "rows: {}+{} → {}+{}",
                self.active, self.hidden, other.active, other.hidden
            ));
        }
        if self.columns != other.columns {
            changes.push(format!("columns: {} → {}", self.columns, other.columns));
        }
        if self.pending != other.pending {
            changes.push(format!("pending: {} → {}", self.pending, other.pending));
        }
        if self.selected != other.selected {
            changes.push(format!("selected: {} → {}", self.selected, other.selected));
        }
        if self.page_index != other.page_index {
            changes.push(format!("page: {} → {}", self.page_index, other.page_index));
        }
        if self.editing != other.editing {
            changes.push(format!(
                "editing: {} → {}",
                self.editing.as_deref().unwrap_or("-"),
                other.editing.as_deref().unwrap_or("-")
            ));
        }
        if self.sort != other.sort {
            changes.push(format!(
                "sort: {} → {}",
                self.sort.as_deref().unwrap_or("-"),
                other.sort.as_deref().unwrap_or("-")
            ));
        }
        if self.filter != other.filter {
            changes.push(format!("filter: {:?} → {:?}", self.filter, other.filter));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::row::{Row, RowId};
    use crate::config::GridConfig;

    #[test]
    fn test_snapshot_diff() {
        let mut model = GridModel::with_rows(
            GridConfig::default(),
            vec![Row::new("1"), Row::new("2")],
        );
        let before = ViewSnapshot::from_model(&model);
        assert_eq!(before.diff(&before), None);

        model.hide_rows(&[RowId::new("1")]);
        let after = ViewSnapshot::from_model(&model);
        assert_eq!(before.diff(&after).as_deref(), Some("rows: 2+0 → 1+1"));
    }
}
