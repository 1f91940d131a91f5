//! Cell editing update functions
//!
//! Routes edit messages through the transaction manager and turns the
//! outcomes into notifications.

use crate::commands::Cmd;
use crate::error::GridError;
use crate::messages::EditMsg;
use crate::model::value::ValueKind;
use crate::model::GridModel;
use crate::transaction::EditOutcome;

/// Handle cell editing messages
pub fn update_edit(model: &mut GridModel, msg: EditMsg) -> Option<Cmd> {
    match msg {
        EditMsg::Begin { row, column } => {
            match model
                .tx
                .begin_edit(&mut model.rows, &model.schema, &row, &column)
            {
                Ok(previous) => previous.and_then(|outcome| outcome_cmd(model, &outcome)),
                Err(e) => {
                    tracing::warn!("Cannot edit ({}, {}): {}", row, column, e);
                    None
                }
            }
        }
        EditMsg::SetDraft(text) => {
            model.tx.set_draft(&text);
            None
        }
        EditMsg::InsertChar(ch) => {
            model.tx.insert_char(ch);
            None
        }
        EditMsg::DeleteBackward => {
            model.tx.delete_backward();
            None
        }
        EditMsg::Commit => {
            let outcome = model.tx.complete_edit(&mut model.rows, &model.schema)?;
            outcome_cmd(model, &outcome)
        }
        EditMsg::Cancel => {
            model.tx.cancel_edit();
            None
        }
        EditMsg::UpdateRow { row, fields } => {
            match model
                .tx
                .update_row(&mut model.rows, &model.schema, &row, &fields)
            {
                Ok(_) => Some(Cmd::info(
                    "Row Saved",
                    "The changes to the row have been saved.",
                )),
                Err(GridError::UnknownRowId { .. }) => None,
                Err(e) => Some(Cmd::error("Invalid Input", invalid_input_text(model, &e))),
            }
        }
        EditMsg::SaveAll => {
            // Blur the cell being edited so its value is part of the flush
            let pending = model
                .tx
                .complete_edit(&mut model.rows, &model.schema)
                .and_then(|outcome| outcome_cmd(model, &outcome));

            let saved = model.tx.save_all(&mut model.rows).map(|summary| {
                Cmd::info(
                    "Changes Saved",
                    format!(
                        "{} {} saved across {}.",
                        summary.cells,
                        if summary.cells == 1 { "cell" } else { "cells" },
                        super::rows_label(summary.rows)
                    ),
                )
            });

            match (pending, saved) {
                (Some(a), Some(b)) => Some(Cmd::batch(vec![a, b])),
                (a, b) => a.or(b),
            }
        }
        EditMsg::CancelAll => {
            let was_editing = model.tx.is_editing();
            let discarded = model.tx.cancel_all();
            if discarded == 0 && !was_editing {
                return None;
            }
            Some(Cmd::info(
                "Changes Discarded",
                format!(
                    "{} pending {} discarded.",
                    discarded,
                    if discarded == 1 { "edit" } else { "edits" }
                ),
            ))
        }
    }
}

/// Notification for a finished cell edit
fn outcome_cmd(model: &GridModel, outcome: &EditOutcome) -> Option<Cmd> {
    match outcome {
        EditOutcome::Committed { .. } => Some(Cmd::info(
            "Cell Updated",
            "The cell has been successfully updated.",
        )),
        EditOutcome::Staged { .. } | EditOutcome::Reverted { .. } => None,
        EditOutcome::Rejected { error, .. } => {
            Some(Cmd::error("Invalid Input", invalid_input_text(model, error)))
        }
    }
}

fn invalid_input_text(model: &GridModel, error: &GridError) -> String {
    match error {
        GridError::Validation { column, reason } => match model.schema.get(column) {
            Some(c) if !c.structural && c.value_kind == ValueKind::Number => {
                format!("{} must be a number.", c.label)
            }
            Some(c) if !c.label.is_empty() => format!("{}: {}.", c.label, reason),
            _ => format!("{}: {}.", column, reason),
        },
        other => other.to_string(),
    }
}
