//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod edit;
mod io;
mod rows;
mod view;

use crate::commands::Cmd;
use crate::messages::GridMsg;
use crate::model::GridModel;

#[cfg(debug_assertions)]
use crate::tracing::ViewSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use edit::update_edit;
pub use io::update_io;
pub use rows::update_rows;
pub use view::update_view;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut GridModel, msg: GridMsg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut GridModel, msg: GridMsg) -> Option<Cmd> {
    match msg {
        GridMsg::View(m) => view::update_view(model, m),
        GridMsg::Edit(m) => edit::update_edit(model, m),
        GridMsg::Rows(m) => rows::update_rows(model, m),
        GridMsg::Io(m) => io::update_io(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after grid state and logs diffs for debugging.
/// Draft keystrokes are not logged individually.
#[cfg(debug_assertions)]
fn update_traced(model: &mut GridModel, msg: GridMsg) -> Option<Cmd> {
    use crate::messages::EditMsg;

    let is_noisy = matches!(
        &msg,
        GridMsg::Edit(EditMsg::InsertChar(_) | EditMsg::DeleteBackward | EditMsg::SetDraft(_))
    );

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = ViewSnapshot::from_model(model);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = ViewSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "grid", %diff, "state changed");
    }

    result
}

/// Get a display name for a message type
///
/// Uses Debug formatting to include variant names and arguments.
/// Imported text is elided.
#[cfg(debug_assertions)]
fn msg_type_name(msg: &GridMsg) -> String {
    use crate::messages::IoMsg;

    match msg {
        GridMsg::View(m) => format!("View::{:?}", m),
        GridMsg::Edit(m) => format!("Edit::{:?}", m),
        GridMsg::Rows(m) => format!("Rows::{:?}", m),
        GridMsg::Io(IoMsg::Import { text, .. }) => format!("Io::Import({} bytes)", text.len()),
        GridMsg::Io(m) => format!("Io::{:?}", m),
    }
}

/// Pluralize a count for notification text
pub(crate) fn rows_label(count: usize) -> String {
    if count == 1 {
        "1 row".to_string()
    } else {
        format!("{} rows", count)
    }
}
