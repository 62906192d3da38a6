//! Loading pager configuration from files on disk.
//!
//! Run:
//!   cargo test -p folio-runtime --features config --test config_files

use std::io::Write;
use std::time::Duration;

use folio_core::animation::SpringParams;
use folio_runtime::{PagerConfig, PagerConfigError};

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("tempfile");
    file.write_all(content.as_bytes()).expect("write");
    file
}

#[test]
fn toml_file_overrides_selected_keys() {
    let file = write_temp(
        ".toml",
        r#"
wheel_tolerance = 25.0
max_frame_dt_ms = 50

[spring]
stiffness = 170.0
damping = 26.0
"#,
    );
    let config = PagerConfig::from_toml_file(file.path()).expect("load");
    assert_eq!(config.wheel_tolerance, 25.0);
    assert_eq!(config.max_frame_dt(), Duration::from_millis(50));
    assert_eq!(config.spring.stiffness, 170.0);
    assert_eq!(config.spring.damping, 26.0);
    assert_eq!(config.spring.velocity, 5.0);
}

#[test]
fn empty_toml_file_is_the_default() {
    let file = write_temp(".toml", "");
    let config = PagerConfig::from_toml_file(file.path()).expect("load");
    assert_eq!(config, PagerConfig::default());
    assert_eq!(config.spring_params(), SpringParams::PAGE_TRANSITION);
}

#[test]
fn json_file_loads() {
    let file = write_temp(
        ".json",
        r#"{"wheel_tolerance": 2.5, "spring": {"rest_delta": 0.25}}"#,
    );
    let config = PagerConfig::from_json_file(file.path()).expect("load");
    assert_eq!(config.wheel_tolerance, 2.5);
    assert_eq!(config.spring.rest_delta, 0.25);
    assert_eq!(config.spring.rest_speed, 2.0);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = PagerConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, PagerConfigError::Io(_)));
    assert!(err.to_string().starts_with("I/O error"));
}

#[test]
fn invalid_values_in_file_are_rejected() {
    let file = write_temp(".toml", "wheel_tolerance = -3.0\n[spring]\nstiffness = 0.0\n");
    match PagerConfig::from_toml_file(file.path()) {
        Err(PagerConfigError::Validation(errors)) => assert_eq!(errors.len(), 2),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn parse_error_exposes_source() {
    let file = write_temp(".json", "{\"wheel_tolerance\": }");
    let err = PagerConfig::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, PagerConfigError::Json(_)));
    assert!(std::error::Error::source(&err).is_some());
}
