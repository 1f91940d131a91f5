//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use datagrid::commands::Cmd;
use datagrid::config::GridConfig;
use datagrid::messages::GridMsg;
use datagrid::model::{CellValue, Row, RowId};
use datagrid::preferences::MemoryPreferences;
use datagrid::runtime::{GridApp, MemoryExportSink, RecordingNotifier};
use datagrid::transaction::EditMode;
use datagrid::update::update;
use datagrid::GridModel;

/// App wired to in-memory collaborators
pub type TestApp = GridApp<MemoryPreferences, RecordingNotifier, MemoryExportSink>;

/// A complete row with the required fields filled in
pub fn person(id: &str, name: &str, age: f64) -> Row {
    Row::new(id)
        .with("name", CellValue::Text(name.to_string()))
        .with(
            "email",
            CellValue::Email(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
        )
        .with("age", CellValue::Number(age))
        .with("role", CellValue::Text("developer".to_string()))
}

/// Five people, ids "1".."5"
pub fn sample_rows() -> Vec<Row> {
    vec![
        person("1", "Bob Lee", 34.0).with("city", CellValue::Text("Oslo".to_string())),
        person("2", "Alice", 28.0).with("city", CellValue::Text("Bergen".to_string())),
        person("3", "Carol", 51.0).with("gender", CellValue::Text("F".to_string())),
        person("4", "Dave", 9.0).with("city", CellValue::Text("Oslo".to_string())),
        person("5", "Eve", 100.0),
    ]
}

pub const SAMPLE_CSV: &str = "\
id,name,email,age,role,city
1,Bob Lee,bob@example.com,34,developer,Oslo
2,Alice,alice@example.com,28,designer,Bergen
3,Carol,carol@example.com,51,manager,
";

pub fn config(mode: EditMode) -> GridConfig {
    GridConfig {
        edit_mode: mode,
        ..GridConfig::default()
    }
}

/// Model in the given edit mode, seeded with `sample_rows()`
pub fn test_model(mode: EditMode) -> GridModel {
    GridModel::with_rows(config(mode), sample_rows())
}

pub fn test_app(mode: EditMode) -> TestApp {
    let model = test_model(mode);
    GridApp::with_model(
        model,
        MemoryPreferences::new(),
        RecordingNotifier::default(),
        MemoryExportSink::default(),
    )
}

/// Run messages through `update`, collecting every returned command
pub fn run(model: &mut GridModel, msgs: impl IntoIterator<Item = GridMsg>) -> Vec<Cmd> {
    msgs.into_iter().filter_map(|msg| update(model, msg)).collect()
}

/// Value the row store holds for a cell, ignoring any overlay
pub fn stored(model: &GridModel, row: &str, column: &str) -> Option<CellValue> {
    model
        .rows
        .get(&RowId::new(row))
        .and_then(|r| r.get(column))
        .cloned()
}

/// Row ids on the current page, in display order
pub fn page_ids(model: &GridModel) -> Vec<String> {
    model
        .slice()
        .rows
        .iter()
        .map(|r| r.id.as_str().to_string())
        .collect()
}
