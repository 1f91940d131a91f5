//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.
//! The runtime hands them to the collaborators; the model never waits on the
//! outcome.

use crate::model::view_state::ColumnVisibility;

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A toast-style message for the notification collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Commands returned by update functions
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Show a notification
    Notify(Notification),
    /// Write the column visibility map to the preference store
    PersistColumnVisibility(ColumnVisibility),
    /// Hand exported text to the export sink
    SaveExport { file_name: String, content: String },
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Cmd::Notify(Notification::info(title, description))
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Cmd::Notify(Notification::error(title, description))
    }

    /// Every notification carried by this command, in execution order
    pub fn notifications(&self) -> Vec<&Notification> {
        match self {
            Cmd::Notify(n) => vec![n],
            Cmd::Batch(cmds) => cmds.iter().flat_map(|c| c.notifications()).collect(),
            _ => Vec::new(),
        }
    }

    /// Title of the first notification, if any
    pub fn title(&self) -> Option<&str> {
        self.notifications().into_iter().next().map(|n| n.title.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_notifications_flatten() {
        let cmd = Cmd::batch(vec![
            Cmd::info("Rows Hidden", "2 rows hidden."),
            Cmd::PersistColumnVisibility(ColumnVisibility::new()),
            Cmd::batch(vec![Cmd::error("Invalid Input", "nope")]),
        ]);

        let titles: Vec<&str> = cmd.notifications().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Rows Hidden", "Invalid Input"]);
        assert_eq!(cmd.title(), Some("Rows Hidden"));
        assert_eq!(Cmd::None.title(), None);
    }
}
