//! CSV export

use super::model::Delimiter;
use crate::error::{GridError, Result};
use crate::model::edit_overlay::EditOverlay;
use crate::model::row::Row;
use crate::model::schema::{ColumnDefinition, REQUIRED_FIELDS};
use crate::model::GridModel;

/// Serialize rows restricted to `columns`, reading overlay-shadowed values.
///
/// The header row carries column ids so that a re-import maps every value
/// back to the same column. Blank cells are written as empty fields.
pub fn export_rows(
    rows: &[&Row],
    columns: &[&ColumnDefinition],
    overlay: &EditOverlay,
    delimiter: Delimiter,
) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter.byte())
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(columns.iter().map(|c| c.id.as_str()))?;

    for row in rows {
        let record: Vec<String> = columns
            .iter()
            .map(|c| {
                overlay
                    .effective(row, &c.id)
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            })
            .collect();
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| GridError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| GridError::Export(e.to_string()))
}

/// Export every filtered and sorted active row (ignoring pagination) with
/// the visible data columns, in column-definition order.
///
/// Required fields are always written, even when hidden, so the file can be
/// imported again.
pub fn export_view(model: &GridModel, delimiter: Delimiter) -> Result<String> {
    let rows = model.filtered_rows();
    let columns = export_columns(model);

    let content = export_rows(&rows, &columns, model.tx.overlay(), delimiter)?;
    tracing::info!(
        "Exported {} rows x {} columns",
        rows.len(),
        columns.len()
    );
    Ok(content)
}

fn export_columns(model: &GridModel) -> Vec<&ColumnDefinition> {
    model
        .schema
        .columns()
        .iter()
        .filter(|c| !c.structural)
        .filter(|c| {
            model.view.is_column_visible(&c.id) || REQUIRED_FIELDS.contains(&c.id.as_str())
        })
        .collect()
}
