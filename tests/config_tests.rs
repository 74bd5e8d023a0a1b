//! Tests for loading and overriding `InlineConfig`

use std::time::Duration;

use rasterize_inline::utils::constants::{CHROME_USER_AGENT, DEFAULT_MAX_IMAGE_SIZE};
use rasterize_inline::{FailurePolicy, InlineConfig};
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = InlineConfig::default();

    assert_eq!(config.base_url(), "");
    assert_eq!(config.fs_root(), None);
    assert_eq!(config.css_timeout(), Duration::from_secs(30));
    assert_eq!(config.image_timeout(), Duration::from_secs(60));
    assert_eq!(config.max_image_size(), DEFAULT_MAX_IMAGE_SIZE);
    assert_eq!(config.max_inline_image_size_bytes(), None);
    assert_eq!(config.max_concurrent_fetches(), None);
    assert_eq!(config.user_agent(), CHROME_USER_AGENT);
    assert_eq!(config.failure_policy(), FailurePolicy::Skip);
    assert!(config.inline_stylesheets());
    assert!(config.inline_images());
    assert!(config.inline_css_references());
}

#[test]
fn test_load_from_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("inline.json");
    std::fs::write(
        &path,
        r#"{
            "base_url": "https://example.com/blog/",
            "css_timeout_secs": 5,
            "max_inline_image_size_bytes": 65536,
            "failure_policy": "abort",
            "inline_images": false
        }"#,
    )
    .unwrap();

    let config = InlineConfig::from_json_file(&path).unwrap();

    assert_eq!(config.base_url(), "https://example.com/blog/");
    assert_eq!(config.css_timeout(), Duration::from_secs(5));
    assert_eq!(config.max_inline_image_size_bytes(), Some(65536));
    assert_eq!(config.failure_policy(), FailurePolicy::Abort);
    assert!(!config.inline_images());
    // untouched keys keep their defaults
    assert_eq!(config.image_timeout(), Duration::from_secs(60));
    assert!(config.inline_stylesheets());
}

#[test]
fn test_setters_override_file_values() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("inline.json");
    std::fs::write(&path, r#"{ "max_concurrent_fetches": 8 }"#).unwrap();

    let config = InlineConfig::from_json_file(&path)
        .unwrap()
        .with_max_concurrent_fetches(2)
        .with_fs_root(temp_dir.path());

    assert_eq!(config.max_concurrent_fetches(), Some(2));
    assert_eq!(config.fs_root(), Some(temp_dir.path()));
}

#[test]
fn test_invalid_file_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let error = InlineConfig::from_json_file(&path).unwrap_err();
    assert!(error.to_string().contains("broken.json"));

    let missing = InlineConfig::from_json_file(temp_dir.path().join("missing.json"));
    assert!(missing.is_err());
}
