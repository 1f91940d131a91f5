//! Row partition and schema update functions

use crate::commands::Cmd;
use crate::error::GridError;
use crate::messages::RowsMsg;
use crate::model::GridModel;

use super::rows_label;

/// Handle row and schema messages
pub fn update_rows(model: &mut GridModel, msg: RowsMsg) -> Option<Cmd> {
    match msg {
        RowsMsg::Hide(ids) => hidden_cmd(model.hide_rows(&ids).len()),
        RowsMsg::HideSelected => hidden_cmd(model.hide_selected().len()),
        RowsMsg::RestoreAll => {
            let restored = model.restore_all();
            if restored == 0 {
                return None;
            }
            Some(Cmd::info(
                "Rows Restored",
                format!("{} restored.", rows_label(restored)),
            ))
        }
        RowsMsg::Delete(id) => {
            if !model.delete_row(&id) {
                return None;
            }
            Some(Cmd::info(
                "Row deleted",
                "The row has been successfully deleted.",
            ))
        }
        RowsMsg::AddColumn { label, kind } => match model.add_column(&label, kind) {
            Ok(column) => Some(Cmd::info(
                "Column Added",
                format!("Column '{}' ({}) added.", column.label, column.value_kind),
            )),
            Err(e @ GridError::DuplicateColumnId { .. }) => {
                Some(Cmd::error("Duplicate Column", e.to_string()))
            }
            Err(e) => Some(Cmd::error("Invalid Column", e.to_string())),
        },
    }
}

fn hidden_cmd(count: usize) -> Option<Cmd> {
    if count == 0 {
        return None;
    }
    Some(Cmd::info(
        "Rows Hidden",
        format!("{} hidden.", rows_label(count)),
    ))
}
