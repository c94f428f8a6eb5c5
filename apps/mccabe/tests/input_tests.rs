//! Integration tests for configuration files and equilibrium data loading.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use mccabe::config::{AppConfig, EquilibriumSection};
use mccabe::input::{
    InputFormat, MAX_INPUT_FILE_SIZE, load_equilibrium, read_text_file, validate_output_path,
};
use mccabe_core::{ErrorKind, ThieleError};
use std::io::Write;
use std::path::Path;

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

// =============================================================================
// EQUILIBRIUM FILES
// =============================================================================

#[test]
fn test_load_csv_with_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "vle.csv",
        "x,y\n0.0,0.0\n0.25,0.45\n0.5,0.7\n0.75,0.88\n1.0,1.0\n",
    );

    let format = InputFormat::resolve("auto", &path).unwrap();
    let table = load_equilibrium(&path, format).unwrap();

    assert_eq!(table.len(), 5);
    assert!((table.y_equil(0.5) - 0.7).abs() < 1e-12);
}

#[test]
fn test_load_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "vle.json",
        r#"{"x": [0.0, 0.5, 1.0], "y": [0.0, 0.8, 1.0]}"#,
    );

    let table = load_equilibrium(&path, InputFormat::Json).unwrap();
    assert_eq!(table.ys(), &[0.0, 0.8, 1.0]);
}

#[test]
fn test_non_monotonic_file_is_data_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "bad.txt", "0.0 0.0\n0.6 0.8\n0.4 0.9\n1.0 1.0\n");

    let err = load_equilibrium(&path, InputFormat::Text).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Data);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_equilibrium(&dir.path().join("absent.csv"), InputFormat::Text).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_directory_is_not_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_text_file(dir.path()).unwrap_err();
    assert!(matches!(err, ThieleError::IoError(msg) if msg.contains("not a regular file")));
}

#[test]
fn test_oversized_file_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.csv");
    let file = std::fs::File::create(&path).unwrap();
    file.set_len(MAX_INPUT_FILE_SIZE + 1).unwrap();

    let err = read_text_file(&path).unwrap_err();
    assert!(matches!(err, ThieleError::IoError(msg) if msg.contains("exceeds maximum")));
}

#[test]
fn test_output_path_in_missing_directory_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = validate_output_path(&dir.path().join("nope").join("out.svg")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);

    let ok = validate_output_path(&dir.path().join("out.svg")).unwrap();
    assert_eq!(ok.file_name().unwrap(), "out.svg");
}

// =============================================================================
// CONFIGURATION FILES
// =============================================================================

#[test]
fn test_config_file_with_inline_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "mccabe.toml",
        r#"
[design]
xd = 0.9
xb = 0.1
xf = 0.4
reflux_ratio = 3.0

[equilibrium]
x = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0]
y = [0.0, 0.4, 0.62, 0.78, 0.9, 1.0]
component = "benzene"

[stepping]
max_steps = 50
"#,
    );

    let config = AppConfig::load(&path).unwrap();
    assert_eq!(config.design.reflux_ratio, 3.0);
    assert_eq!(config.stepping.max_steps, 50);
    assert_eq!(config.stepping.tolerance, 1e-6);
    assert_eq!(config.plot.size, 800);

    let resolved = config.equilibrium.resolve().unwrap();
    assert_eq!(resolved.table.len(), 6);
    assert_eq!(resolved.component, "benzene");

    let spec = config.design.to_spec().unwrap();
    assert_eq!(spec.xf(), 0.4);
}

#[test]
fn test_config_points_at_data_file() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_file(dir.path(), "vle.dat", "0 0\n0.5 0.75\n1 1\n");

    let section = EquilibriumSection {
        file: Some(data),
        format: Some("text".to_string()),
        ..EquilibriumSection::default()
    };
    let resolved = section.resolve().unwrap();
    assert_eq!(resolved.table.len(), 3);
    assert_eq!(resolved.component, "light component");
}

#[test]
fn test_invalid_design_in_config_is_configuration_error() {
    let config = AppConfig::from_toml("[design]\nxf = 0.05\n").unwrap();
    let err = config.design.to_spec().unwrap_err();
    assert!(matches!(err, ThieleError::DegenerateFeed { .. }));
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_malformed_toml_rejected() {
    let err = AppConfig::from_toml("[design\nxd = 0.9").unwrap_err();
    assert!(matches!(err, ThieleError::SerializationError(_)));
}
