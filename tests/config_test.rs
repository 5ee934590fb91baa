// tests/config_test.rs
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tempfile::{NamedTempFile, TempDir};
use watchy_dev::cli::Project;
use watchy_dev::config::{load_config, Config, CONFIG_FILE_NAME};
use watchy_dev::domain::{FieldKind, SemanticVersion};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.paths.changelog, PathBuf::from("VERSION.md"));
    assert_eq!(config.paths.readme, PathBuf::from("README.md"));
    assert_eq!(
        config.paths.simulator,
        PathBuf::from("simulator/watchy_simulator.html")
    );
    assert_eq!(config.paths.examples_dir, PathBuf::from("examples"));
    assert_eq!(config.release.tag_pattern, "v{version}");
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[paths]
changelog = "CHANGELOG.md"

[labels]
version = "Version: "

[release]
tag_pattern = "watchy-{version}"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path()), dir.path()).unwrap();
    assert_eq!(config.paths.changelog, PathBuf::from("CHANGELOG.md"));
    assert_eq!(config.paths.readme, PathBuf::from("README.md"));
    assert_eq!(config.labels.field_labels().label(FieldKind::Version), "Version: ");
    assert_eq!(
        config
            .release
            .tag_pattern()
            .unwrap()
            .format(&SemanticVersion::new(1, 2, 3)),
        "watchy-1.2.3"
    );
}

#[test]
fn test_load_from_project_root() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[toolchain]\nbuild_program = \"platformio\"\n",
    )
    .unwrap();

    let config = load_config(None, dir.path()).unwrap();
    assert_eq!(config.toolchain.build_program, "platformio");
    assert_eq!(config.paths.changelog, PathBuf::from("VERSION.md"));
}

#[test]
fn test_explicit_path_wins_over_project_root() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[toolchain]\nbuild_program = \"from-root\"\n",
    )
    .unwrap();
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[toolchain]\nbuild_program = \"from-flag\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path()), dir.path()).unwrap();
    assert_eq!(config.toolchain.build_program, "from-flag");
}

#[test]
fn test_missing_explicit_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(load_config(Some(&missing), dir.path()).is_err());
}

#[test]
fn test_invalid_toml_is_an_error() {
    let dir = TempDir::new().unwrap();
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[paths\nchangelog = ").unwrap();
    temp_file.flush().unwrap();

    assert!(load_config(Some(temp_file.path()), dir.path()).is_err());
}

#[test]
fn test_tag_pattern_without_placeholder_is_rejected() {
    let dir = TempDir::new().unwrap();
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[release]\ntag_pattern = \"release\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    assert!(load_config(Some(temp_file.path()), dir.path()).is_err());
}

#[test]
fn test_project_resolves_configured_paths() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[paths]\nreadme = \"docs/README.md\"\n",
    )
    .unwrap();

    let project = Project::load(dir.path(), None).unwrap();
    assert_eq!(project.paths.root, dir.path());
    assert_eq!(project.paths.readme, dir.path().join("docs/README.md"));
    assert_eq!(project.paths.changelog, dir.path().join("VERSION.md"));
}
