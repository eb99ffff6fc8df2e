use super::{normalize_fixture_path, prepare_fixture_path, Settings};

use std::{fs, path::PathBuf};

#[test]
fn blank_fixture_path_falls_back_to_default() {
    assert_eq!(
        normalize_fixture_path("   "),
        PathBuf::from(Settings::default().fixture_path)
    );
}

#[test]
fn windows_separators_are_normalized() {
    assert_eq!(
        normalize_fixture_path("data\\fixtures\\db.json"),
        PathBuf::from("data/fixtures/db.json")
    );
}

#[test]
fn existing_fixture_file_is_accepted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("db.json");
    fs::write(&path, r#"{ "personalinfo": [], "image": [] }"#).expect("write fixture");

    let prepared = prepare_fixture_path(path.to_string_lossy().as_ref()).expect("prepare");
    assert_eq!(prepared, path);
}

#[test]
fn missing_fixture_file_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = prepare_fixture_path(dir.path().join("absent.json").to_string_lossy().as_ref())
        .expect_err("must fail");
    assert!(err.to_string().contains("not readable"), "{err}");
}

#[test]
fn directory_fixture_path_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = prepare_fixture_path(dir.path().to_string_lossy().as_ref()).expect_err("must fail");
    assert!(err.to_string().contains("not a file"), "{err}");
}
