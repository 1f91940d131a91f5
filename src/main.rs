use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use datagrid::cli::CliArgs;
use datagrid::commands::NotificationLevel;
use datagrid::config::GridConfig;
use datagrid::csv::{render::render_table, Delimiter};
use datagrid::messages::{GridMsg, IoMsg};
use datagrid::preferences::{
    load_column_visibility, save_column_visibility, FilePreferences, MemoryPreferences,
};
use datagrid::runtime::{FileExportSink, GridApp, RecordingNotifier};

fn main() -> Result<()> {
    datagrid::tracing::init();

    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => GridConfig::load_from(path)?,
        None => GridConfig::load(),
    };

    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let input_delimiter = args.input_delimiter(&text);

    let sink = match &args.export {
        Some(path) => {
            if let Some(delimiter) = Delimiter::from_path(path) {
                config.delimiter = delimiter;
            }
            FileExportSink::Path(path.clone())
        }
        None => FileExportSink::Directory(PathBuf::from(".")),
    };

    // Stored column visibility applies, but flags from this run are not persisted
    let mut preferences = MemoryPreferences::new();
    if let Some(stored) = FilePreferences::load_default() {
        save_column_visibility(&mut preferences, &load_column_visibility(&stored));
    }

    let mut app = GridApp::new(config, preferences, RecordingNotifier::default(), sink);

    app.dispatch(GridMsg::Io(IoMsg::Import {
        text,
        delimiter: Some(input_delimiter),
    }));
    if let Some(failure) = last_error(&app) {
        bail!("{}: {}", args.input.display(), failure);
    }

    let slice = app.dispatch_all(args.view_messages());
    print!("{}", render_table(slice));

    if args.export.is_some() {
        app.dispatch(GridMsg::Io(IoMsg::Export));
        if let Some(failure) = last_error(&app) {
            bail!("{}", failure);
        }
        if let Some(note) = app.notifier().last() {
            eprintln!("{}", note.description);
        }
    }

    Ok(())
}

fn last_error(
    app: &GridApp<MemoryPreferences, RecordingNotifier, FileExportSink>,
) -> Option<String> {
    app.notifier()
        .last()
        .filter(|n| n.level == NotificationLevel::Error)
        .map(|n| n.description.clone())
}
