//! Runtime module - drives the update loop
//!
//! `GridApp` owns the model and the collaborators. Every message goes through
//! [`update`], the returned command is executed against the collaborators,
//! and the view slice is recomputed so [`GridApp::slice`] is always current.
//!
//! - `collaborators` - notifier and export sink traits with stock impls

pub mod collaborators;

pub use collaborators::{
    ExportSink, FileExportSink, LogNotifier, MemoryExportSink, Notifier, RecordingNotifier,
};

use crate::commands::{Cmd, Notification};
use crate::config::GridConfig;
use crate::messages::GridMsg;
use crate::model::GridModel;
use crate::preferences::{load_column_visibility, save_column_visibility, PreferenceStore};
use crate::update::update;
use crate::view::ViewSlice;

/// The grid application
pub struct GridApp<P, N, E> {
    model: GridModel,
    slice: ViewSlice,
    preferences: P,
    notifier: N,
    export_sink: E,
}

impl<P, N, E> GridApp<P, N, E>
where
    P: PreferenceStore,
    N: Notifier,
    E: ExportSink,
{
    /// Create the app, restoring persisted column visibility
    pub fn new(config: GridConfig, preferences: P, notifier: N, export_sink: E) -> Self {
        Self::with_model(GridModel::new(config), preferences, notifier, export_sink)
    }

    pub fn with_model(mut model: GridModel, preferences: P, notifier: N, export_sink: E) -> Self {
        let stored = load_column_visibility(&preferences);
        if !stored.is_empty() {
            tracing::debug!("Restoring visibility for {} columns", stored.len());
            model.view.apply_visibility(&model.schema, &stored);
        }
        let slice = model.slice();
        Self {
            model,
            slice,
            preferences,
            notifier,
            export_sink,
        }
    }

    /// Process one message and recompute the view
    pub fn dispatch(&mut self, msg: GridMsg) -> &ViewSlice {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
        self.slice = self.model.slice();
        &self.slice
    }

    /// Process several messages, recomputing the view once at the end
    pub fn dispatch_all(&mut self, msgs: impl IntoIterator<Item = GridMsg>) -> &ViewSlice {
        for msg in msgs {
            if let Some(cmd) = update(&mut self.model, msg) {
                self.process_cmd(cmd);
            }
        }
        self.slice = self.model.slice();
        &self.slice
    }

    /// Execute a command. A batch stops at the first failed side effect so
    /// follow-up notifications never report success for it.
    fn process_cmd(&mut self, cmd: Cmd) -> bool {
        match cmd {
            Cmd::None => true,
            Cmd::Notify(notification) => {
                self.notifier.notify(&notification);
                true
            }
            Cmd::PersistColumnVisibility(visibility) => {
                save_column_visibility(&mut self.preferences, &visibility);
                true
            }
            Cmd::SaveExport { file_name, content } => {
                match self.export_sink.save(&file_name, &content) {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::error!("{:#}", e);
                        self.notifier
                            .notify(&Notification::error("Export Failed", format!("{:#}", e)));
                        false
                    }
                }
            }
            Cmd::Batch(cmds) => cmds.into_iter().all(|cmd| self.process_cmd(cmd)),
        }
    }

    pub fn slice(&self) -> &ViewSlice {
        &self.slice
    }

    pub fn model(&self) -> &GridModel {
        &self.model
    }

    pub fn preferences(&self) -> &P {
        &self.preferences
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn export_sink(&self) -> &E {
        &self.export_sink
    }
}
