//! Collaborators that carry out commands outside the model

use std::path::PathBuf;

use anyhow::Context;

use crate::commands::{Notification, NotificationLevel};

/// Delivers user-facing notifications
pub trait Notifier {
    fn notify(&mut self, notification: &Notification);
}

/// Receives exported text
pub trait ExportSink {
    fn save(&mut self, file_name: &str, content: &str) -> anyhow::Result<()>;
}

/// Routes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notification: &Notification) {
        match notification.level {
            NotificationLevel::Info => {
                tracing::info!("{}: {}", notification.title, notification.description)
            }
            NotificationLevel::Error => {
                tracing::error!("{}: {}", notification.title, notification.description)
            }
        }
    }
}

/// Keeps every notification, newest last
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    pub notifications: Vec<Notification>,
}

impl RecordingNotifier {
    pub fn titles(&self) -> Vec<&str> {
        self.notifications.iter().map(|n| n.title.as_str()).collect()
    }

    pub fn last(&self) -> Option<&Notification> {
        self.notifications.last()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }
}

/// Writes exports into a directory, or to one fixed path
#[derive(Debug, Clone)]
pub enum FileExportSink {
    Directory(PathBuf),
    Path(PathBuf),
}

impl ExportSink for FileExportSink {
    fn save(&mut self, file_name: &str, content: &str) -> anyhow::Result<()> {
        let path = match self {
            FileExportSink::Directory(dir) => dir.join(file_name),
            FileExportSink::Path(path) => path.clone(),
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write export to {}", path.display()))?;
        tracing::info!("Wrote export to {}", path.display());
        Ok(())
    }
}

/// Keeps exports in memory as `(file_name, content)` pairs
#[derive(Debug, Clone, Default)]
pub struct MemoryExportSink {
    pub files: Vec<(String, String)>,
}

impl ExportSink for MemoryExportSink {
    fn save(&mut self, file_name: &str, content: &str) -> anyhow::Result<()> {
        self.files.push((file_name.to_string(), content.to_string()));
        Ok(())
    }
}
