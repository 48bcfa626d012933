//! Tests for layered configuration loading.

use std::io::Write;
use viewfinder::{AspectRatio, ViewfinderConfig, ViewfinderErrorKind};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn test_bundled_defaults() {
    let config = ViewfinderConfig::from_toml("").expect("defaults");

    assert_eq!(*config.pipeline().poll_interval_ms(), 2000);
    assert_eq!(*config.pipeline().poll_attempts(), 30);
    assert_eq!(*config.pipeline().generation_attempts(), 2);
    assert_eq!(*config.pipeline().max_images(), 6);
    assert_eq!(*config.pipeline().aspect_ratio(), AspectRatio::Widescreen);
    assert_eq!(config.pipeline().image_key_prefix(), "sessions");
    assert_eq!(config.gemini().text_model(), "gemini-2.5-flash");
    assert!(config.storage().public_base_url().is_none());
}

#[test]
fn test_file_overrides_only_named_keys() {
    let file = write_config(
        r#"
        [pipeline]
        poll_attempts = 5
        aspect_ratio = "3:4"

        [storage]
        directory = "/srv/shoots"
        public_base_url = "https://cdn.example.com/shoots"
        "#,
    );

    let config = ViewfinderConfig::from_file(file.path()).expect("config");

    assert_eq!(*config.pipeline().poll_attempts(), 5);
    assert_eq!(*config.pipeline().poll_interval_ms(), 2000);
    assert_eq!(*config.pipeline().aspect_ratio(), AspectRatio::Portrait);
    assert_eq!(config.storage().directory().to_str(), Some("/srv/shoots"));
    assert_eq!(
        config.storage().public_base_url().as_deref(),
        Some("https://cdn.example.com/shoots")
    );
}

#[test]
fn test_explicit_file_layers_over_standard_locations() {
    let file = write_config("[pipeline]\nmax_images = 2\n");

    let config = ViewfinderConfig::load_with(Some(file.path())).expect("config");

    assert_eq!(*config.pipeline().max_images(), 2);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let result = ViewfinderConfig::load_with(Some(std::path::Path::new(
        "/nonexistent/viewfinder/custom.toml",
    )));

    assert!(result.is_err());
}

#[test]
fn test_invalid_values_name_the_key() {
    let err = ViewfinderConfig::from_toml("[pipeline]\npoll_attempts = 0\n")
        .expect_err("zero attempts");

    match err.kind() {
        ViewfinderErrorKind::Config(e) => {
            assert_eq!(e.key.as_deref(), Some("pipeline.poll_attempts"));
        }
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_unknown_aspect_ratio_is_rejected() {
    let err = ViewfinderConfig::from_toml("[pipeline]\naspect_ratio = \"2:1\"\n")
        .expect_err("bad ratio");

    assert!(err.summary().contains("Failed to parse configuration"));
}

#[test]
fn test_malformed_toml_is_rejected() {
    let err = ViewfinderConfig::from_toml("[pipeline\nmax_images = ").expect_err("malformed");

    assert!(err.summary().contains("Failed to build configuration"));
}
