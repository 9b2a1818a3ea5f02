#![cfg(test)]

use crate::compiler_frontend::compiler_errors::{ErrorMetaDataKey, ErrorType};
use crate::settings::{CONFIG_FILE_NAME, Config, INITIAL_BINDING_CAPACITY};
use std::fs;

#[test]
fn empty_config_uses_defaults() {
    let config = Config::from_toml_str("").unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.initial_binding_capacity, INITIAL_BINDING_CAPACITY);
    assert!(config.dump_chars);
}

#[test]
fn power_of_two_capacity_is_accepted() {
    let config = Config::from_toml_str("initial_binding_capacity = 16\ndump_chars = false\n").unwrap();

    assert_eq!(config.initial_binding_capacity, 16);
    assert!(!config.dump_chars);
}

#[test]
fn capacity_that_is_not_a_power_of_two_is_rejected() {
    let error = Config::from_toml_str("initial_binding_capacity = 12").unwrap_err();

    assert_eq!(error.error_type, ErrorType::Config);
    assert_eq!(
        error.metadata.get(&ErrorMetaDataKey::ConfigKey),
        Some(&"initial_binding_capacity")
    );
    assert!(error.msg.contains("12"));
}

#[test]
fn zero_capacity_is_rejected() {
    let error = Config::from_toml_str("initial_binding_capacity = 0").unwrap_err();
    assert_eq!(error.error_type, ErrorType::Config);
}

#[test]
fn unknown_keys_are_rejected() {
    let error = Config::from_toml_str("binding_capacity = 8").unwrap_err();

    assert_eq!(error.error_type, ErrorType::Config);
    assert!(error.file_path.is_none());
}

#[test]
fn config_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "initial_binding_capacity = 32\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.initial_binding_capacity, 32);
    assert!(config.dump_chars);
}

#[test]
fn invalid_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "initial_binding_capacity = 3\n").unwrap();

    let error = Config::load(&path).unwrap_err();
    assert_eq!(error.error_type, ErrorType::Config);
    assert_eq!(error.file_path.as_deref(), Some(path.as_path()));
}

#[test]
fn missing_file_is_a_file_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    let error = Config::load(&path).unwrap_err();
    assert_eq!(error.error_type, ErrorType::File);
    assert_eq!(error.file_path.as_deref(), Some(path.as_path()));
    assert_eq!(
        error.metadata.get(&ErrorMetaDataKey::CompilationStage),
        Some(&"Config Loading")
    );
}

#[test]
fn config_drives_tables_and_dumps() {
    let config = Config::from_toml_str("initial_binding_capacity = 64\ndump_chars = false").unwrap();

    let mut table = config.new_binding_table();
    table.bind("first".into(), 0).unwrap();
    assert_eq!(table.capacity(), 64);

    let dump = config.dump_memory(b"hi", 0, None);
    assert!(!dump.contains("hi"));
    assert!(dump.starts_with("0000000: 6869"));
}

#[test]
fn configured_capacity_only_applies_to_tables_built_from_config() {
    use crate::compiler_frontend::named_types::NamedTypeList;

    let config = Config::from_toml_str("initial_binding_capacity = 64").unwrap();
    assert_eq!(config.new_binding_table().capacity(), 0);

    let mut list = NamedTypeList::new();
    list.push(Some("$x".into()), crate::compiler_frontend::named_types::ValueType::I32)
        .unwrap();
    assert_eq!(list.bindings.capacity(), INITIAL_BINDING_CAPACITY);
}
