//! Integration tests for Settings loading.
//!
//! These tests run without a global config (temp directories only), so they
//! exercise local config merging over the compiled defaults.

use std::fs;

use tempfile::TempDir;

use treeable::application::ApplicationError;
use treeable::config::{local_config_path, Settings};

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let config = r#"
sort_field = "position"

[fields]
id = "name"
children = "items"

[html]
list_open = "<ol>"
list_close = "</ol>"
label_field = "title"
"#;
    fs::write(local_config_path(dir.path()), config).unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).expect("load settings");

    // Assert
    assert_eq!(settings.sort_field.as_deref(), Some("position"));
    assert_eq!(settings.fields.id, "name");
    assert_eq!(settings.fields.children, "items");
    assert_eq!(settings.html.list_open, "<ol>");
    assert_eq!(settings.label_field(), "title");
}

#[test]
fn given_partial_local_config_when_load_then_inherits_unspecified() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "[fields]\nparent = \"parent_id\"\n").unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.fields.parent, "parent_id");
    assert_eq!(settings.fields.id, "id");
    assert_eq!(settings.fields.level, "level");
    assert_eq!(settings.fields.parent_item, "parentItem");
    assert_eq!(settings.html.item_close, "</li>");
}

#[test]
fn given_directory_without_config_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.fields, Settings::default().fields);
    assert_eq!(settings.sort_field, None);
}

#[test]
fn given_malformed_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "[fields\nid = ").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
    assert!(err.to_string().contains(".treeable.toml"));
}

#[test]
fn given_config_file_when_load_file_then_merges_over_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("menu.toml");
    fs::write(&path, "[html]\nactive_field = \"current\"\n").unwrap();

    let settings = Settings::load_file(&path).expect("load file");

    assert_eq!(settings.html.active_field, "current");
    assert_eq!(settings.html.list_open, "<ul>");
}

#[test]
fn given_missing_config_file_when_load_file_then_config_error() {
    let dir = TempDir::new().unwrap();

    let err = Settings::load_file(&dir.path().join("missing.toml")).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }));
}

#[test]
fn given_loaded_settings_when_written_as_local_config_then_reload_is_identical() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "sort_field = \"title\"\n[fields]\nid = \"slug\"\n").unwrap();
    let first = Settings::load(Some(dir.path())).expect("load settings");

    let other = TempDir::new().unwrap();
    fs::write(local_config_path(other.path()), first.to_toml().unwrap()).unwrap();
    let second = Settings::load(Some(other.path())).expect("reload settings");

    assert_eq!(first, second);
}
