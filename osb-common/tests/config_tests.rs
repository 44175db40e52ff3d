//! Tests for configuration loading and graceful degradation
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate OSB_DATA_FOLDER are marked with #[serial].

use osb_common::config::{
    load_config, resolve_data_folder, ConfigSource, TomlConfig, DATA_FOLDER_ENV,
};
use osb_common::Translations;
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_load_config_reads_explicit_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
port = 8080
default_language = "en"
sources = ["only.json"]

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let (config, source) = load_config(Some(&path));
    assert_eq!(source, ConfigSource::File(path.clone()));
    assert_eq!(config.port, 8080);
    assert_eq!(config.default_language, "en");
    assert_eq!(config.sources, vec![PathBuf::from("only.json")]);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_load_config_missing_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");
    let (config, source) = load_config(Some(&path));
    assert_eq!(config.port, 5001);
    assert_eq!(config.sources.len(), 2);
    assert!(matches!(source, ConfigSource::Ignored { path: p, .. } if p == path));
}

#[test]
fn test_load_config_malformed_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "port = \"not a number\"").unwrap();

    let (config, source) = load_config(Some(&path));
    assert_eq!(config.port, 5001);

    // The parse failure is handed back so it can be logged once tracing is up
    match source {
        ConfigSource::Ignored { path: ignored, reason } => {
            assert_eq!(ignored, path);
            assert!(!reason.is_empty());
        }
        other => panic!("Expected ignored config, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_cli_arg_beats_env_and_toml() {
    env::set_var(DATA_FOLDER_ENV, "/tmp/osb-env");
    let config = TomlConfig {
        data_folder: Some(PathBuf::from("/tmp/osb-toml")),
        ..TomlConfig::default()
    };

    let folder = resolve_data_folder(Some(Path::new("/tmp/osb-cli")), &config);
    assert_eq!(folder, PathBuf::from("/tmp/osb-cli"));

    env::remove_var(DATA_FOLDER_ENV);
}

#[test]
#[serial]
fn test_env_beats_toml() {
    env::set_var(DATA_FOLDER_ENV, "/tmp/osb-env");
    let config = TomlConfig {
        data_folder: Some(PathBuf::from("/tmp/osb-toml")),
        ..TomlConfig::default()
    };

    assert_eq!(resolve_data_folder(None, &config), PathBuf::from("/tmp/osb-env"));

    env::remove_var(DATA_FOLDER_ENV);
}

#[test]
#[serial]
fn test_toml_then_working_directory() {
    env::remove_var(DATA_FOLDER_ENV);
    let config = TomlConfig {
        data_folder: Some(PathBuf::from("/tmp/osb-toml")),
        ..TomlConfig::default()
    };
    assert_eq!(resolve_data_folder(None, &config), PathBuf::from("/tmp/osb-toml"));

    let folder = resolve_data_folder(None, &TomlConfig::default());
    assert_eq!(folder, env::current_dir().unwrap());
}

#[test]
fn test_translations_file_loaded_and_fallbacks() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("translations.json");
    std::fs::write(
        &path,
        r#"{"da": {"Spillere": "Spillere"}, "en": {"Spillere": "Players"}}"#,
    )
    .unwrap();

    let catalog = Translations::load_or_builtin(&path, "da");
    assert_eq!(catalog.translate("en", "Spillere"), "Players");

    std::fs::write(&path, "{ broken").unwrap();
    let catalog = Translations::load_or_builtin(&path, "da");
    assert_eq!(catalog.translate("en", "Vores Proces"), "Our Process");

    let catalog = Translations::load_or_builtin(&temp_dir.path().join("missing.json"), "da");
    assert_eq!(catalog.default_language(), "da");
}
