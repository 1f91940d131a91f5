//! Delimited-text import and export
//!
//! Bridges the row store and a CSV representation:
//!
//! ```text
//! import:  text ──parser──> Vec<Row> ──RowStore::replace_all──> store
//! export:  filtered/sorted rows + visible data columns ──writer──> text
//! ```
//!
//! The text table renderer used by the CLI lives here too since it shares
//! the same column layout rules.

mod model;
mod parser;
pub mod render;
mod writer;

pub use model::Delimiter;
pub use parser::{detect_delimiter, parse_import};
pub use writer::{export_rows, export_view};
