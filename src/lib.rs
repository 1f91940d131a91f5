//! Datagrid - Elm-style tabular state engine
//!
//! This crate provides the core types and logic for an editable data grid:
//! typed columns, a canonical row store with hide/restore, immediate and
//! batch edit transactions, a pure view engine (filter, sort, paginate,
//! column visibility) and CSV import/export.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod csv;
pub mod error;
pub mod messages;
pub mod model;
pub mod preferences;
pub mod runtime;
pub mod tracing;
pub mod transaction;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::GridConfig;
pub use error::{GridError, Result};
pub use messages::GridMsg;
pub use model::GridModel;
pub use runtime::GridApp;
pub use view::ViewSlice;
