use std::io::Write;

use vitalplot::{ConfigError, DisplayPolicy, VitalsConfig};

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut f = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f
}

#[test]
fn defaults_are_valid() {
    let cfg = VitalsConfig::default();
    assert_eq!(cfg.window_capacity, 100);
    assert_eq!(cfg.subject.as_str(), "patient_alpha");
    assert_eq!(cfg.display_policy, DisplayPolicy::ZeroIsAbsent);
    assert!(cfg.validate().is_ok());
}

#[test]
fn loads_yaml_with_partial_fields() {
    let f = write_temp(
        ".yaml",
        "subject: patient_beta\nwindow_capacity: 250\ndisplay_policy: explicit_presence\n",
    );
    let cfg = VitalsConfig::load(f.path()).unwrap();
    assert_eq!(cfg.subject.as_str(), "patient_beta");
    assert_eq!(cfg.window_capacity, 250);
    assert_eq!(cfg.display_policy, DisplayPolicy::ExplicitPresence);
    assert_eq!(cfg.y_max, 1024.0);
}

#[test]
fn loads_json() {
    let f = write_temp(".json", r#"{"subject":"bed-4","y_min":-1.0,"y_max":1.0}"#);
    let cfg = VitalsConfig::load(f.path()).unwrap();
    assert_eq!(cfg.subject.as_str(), "bed-4");
    assert_eq!((cfg.y_min, cfg.y_max), (-1.0, 1.0));
}

#[test]
fn rejects_zero_window() {
    let f = write_temp(".json", r#"{"window_capacity":0}"#);
    assert!(matches!(
        VitalsConfig::load(f.path()),
        Err(ConfigError::InvalidWindowCapacity(0))
    ));
}

#[test]
fn rejects_inverted_y_range_and_empty_subject() {
    let mut cfg = VitalsConfig::default();
    cfg.y_min = 10.0;
    cfg.y_max = 10.0;
    assert!(matches!(cfg.validate(), Err(ConfigError::InvalidYRange { .. })));

    let f = write_temp(".yml", "subject: \"\"\n");
    assert!(matches!(VitalsConfig::load(f.path()), Err(ConfigError::EmptySubject)));
}

#[test]
fn rejects_unknown_extension_and_bad_syntax() {
    let f = write_temp(".toml", "subject = 'x'\n");
    assert!(matches!(
        VitalsConfig::load(f.path()),
        Err(ConfigError::UnsupportedFormat(_))
    ));

    let f = write_temp(".json", "{not json");
    assert!(matches!(VitalsConfig::load(f.path()), Err(ConfigError::Parse { .. })));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    assert!(matches!(VitalsConfig::load(&path), Err(ConfigError::Io { .. })));
}
