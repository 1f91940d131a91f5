//! Import/export update functions

use crate::commands::Cmd;
use crate::csv::{export_view, parse_import};
use crate::messages::IoMsg;
use crate::model::GridModel;

/// Handle import/export messages
pub fn update_io(model: &mut GridModel, msg: IoMsg) -> Option<Cmd> {
    match msg {
        IoMsg::Import { text, delimiter } => {
            let delimiter = delimiter.unwrap_or(model.config.delimiter);
            let result = parse_import(&text, delimiter, &model.schema)
                .and_then(|rows| model.replace_rows(rows));
            match result {
                Ok(count) => Some(Cmd::info(
                    "Import Successful",
                    format!("{} rows imported.", count),
                )),
                Err(e) => {
                    tracing::warn!("Import failed: {}", e);
                    Some(Cmd::error("Import Failed", e.to_string()))
                }
            }
        }
        IoMsg::Export => match export_view(model, model.config.delimiter) {
            Ok(content) => Some(Cmd::batch(vec![
                Cmd::SaveExport {
                    file_name: model.config.export_file_name.clone(),
                    content,
                },
                Cmd::info(
                    "Export Complete",
                    "The data has been exported to a CSV file.",
                ),
            ])),
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                Some(Cmd::error("Export Failed", e.to_string()))
            }
        },
    }
}
