//! Configuration system tests
//!
//! Tests for config paths, grid config persistence and the preference store.

use datagrid::config::GridConfig;
use datagrid::config_paths;
use datagrid::csv::Delimiter;
use datagrid::model::ColumnId;
use datagrid::preferences::{
    load_column_visibility, save_column_visibility, FilePreferences, PreferenceStore,
    COLUMN_VISIBILITY_KEY,
};
use datagrid::transaction::EditMode;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_returns_some() {
    assert!(config_paths::config_dir().is_some());
}

#[test]
fn test_config_dir_contains_app_name() {
    let dir = config_paths::config_dir().unwrap();
    assert!(dir.to_string_lossy().contains("datagrid"));
}

#[test]
fn test_config_file_ends_with_yaml() {
    let path = config_paths::config_file().unwrap();
    assert_eq!(path.file_name().unwrap(), "config.yaml");
}

#[test]
fn test_preferences_file_ends_with_json() {
    let path = config_paths::preferences_file().unwrap();
    assert_eq!(path.file_name().unwrap(), "preferences.json");
}

#[test]
fn test_logs_dir_is_under_config_dir() {
    let config = config_paths::config_dir().unwrap();
    let logs = config_paths::logs_dir().unwrap();
    assert!(logs.starts_with(&config));
    assert!(logs.ends_with("logs"));
}

// ========================================================================
// GridConfig Tests
// ========================================================================

#[test]
fn test_config_save_and_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = GridConfig {
        edit_mode: EditMode::Batch,
        page_size: 50,
        export_file_name: "people.psv".to_string(),
        delimiter: Delimiter::Pipe,
    };
    config.save_to(&path).unwrap();

    let loaded = GridConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_config_partial_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "edit_mode: batch\n").unwrap();

    let loaded = GridConfig::load_from(&path).unwrap();
    assert_eq!(loaded.edit_mode, EditMode::Batch);
    assert_eq!(loaded.page_size, GridConfig::default().page_size);
    assert_eq!(loaded.delimiter, Delimiter::Comma);
}

#[test]
fn test_config_zero_page_size_is_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "page_size: 0\n").unwrap();

    assert_eq!(GridConfig::load_from(&path).unwrap().page_size, 1);
}

#[test]
fn test_config_invalid_yaml_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "edit_mode: sometimes\n").unwrap();

    assert!(GridConfig::load_from(&path).is_err());
}

#[test]
fn test_config_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(GridConfig::load_from(&dir.path().join("absent.yaml")).is_err());
}

// ========================================================================
// Preference Store Tests
// ========================================================================

#[test]
fn test_file_preferences_visibility_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");

    let mut prefs = FilePreferences::load(&path);
    let mut visibility = load_column_visibility(&prefs);
    visibility.insert(ColumnId::new("gender"), false);
    save_column_visibility(&mut prefs, &visibility);

    let reloaded = FilePreferences::load(&path);
    assert_eq!(load_column_visibility(&reloaded), visibility);
    assert_eq!(
        reloaded.get(COLUMN_VISIBILITY_KEY).as_deref(),
        Some(r#"{"gender":false}"#)
    );
}

#[test]
fn test_file_preferences_malformed_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    std::fs::write(&path, "[1, 2").unwrap();

    let prefs = FilePreferences::load(&path);
    assert!(prefs.get(COLUMN_VISIBILITY_KEY).is_none());
    assert_eq!(prefs.path(), path.as_path());
}
