#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;
use swcache_core::config::BuildConfig;
use swcache_core::errors::{ConfigError, ExError, ExErrorKind};
use tempfile::TempDir;

#[test]
fn test_load_toml_with_defaults() {
    // Given: a config file naming only the build root
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("swcache.toml");
    std::fs::write(&path, "buildRoot = \"build/bundled\"\n").unwrap();

    // When: it is loaded
    let config = BuildConfig::from_toml_file(&path).unwrap();

    // Then: the relative root resolves next to the file and defaults apply
    assert_eq!(config.build_root, dir.path().join("build/bundled"));
    assert_eq!(
        config.service_worker_path(),
        dir.path().join("build/bundled/service-worker.js")
    );
    assert_eq!(config.browser_cache_config_name, "browser-cache-config.js");
    assert_eq!(config.browser_cache_config_var, "BrowserCacheConfig");
}

#[test]
fn test_load_toml_with_all_options() {
    let text = r#"
buildRoot = "/srv/app/build/bundled"
serviceWorkerScriptPath = "sw.js"
browserCacheConfigName = "cache-map.js"
browserCacheConfigVar = "CacheMap"
"#;

    let config = BuildConfig::from_toml_str(text, "inline").unwrap();

    assert_eq!(config.build_root, PathBuf::from("/srv/app/build/bundled"));
    assert_eq!(
        config.service_worker_path(),
        PathBuf::from("/srv/app/build/bundled/sw.js")
    );
    assert_eq!(
        config.cache_config_path(),
        PathBuf::from("/srv/app/build/bundled/cache-map.js")
    );
    assert_eq!(config.browser_cache_config_var, "CacheMap");
}

#[test]
fn test_missing_build_root_is_parse_error() {
    let err = BuildConfig::from_toml_str("browserCacheConfigName = \"x.js\"", "inline").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_unknown_option_is_parse_error() {
    let err = BuildConfig::from_toml_str("buildRoot = \"b\"\nbundleType = \"both\"", "inline")
        .unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_invalid_variable_name_rejected() {
    let err = BuildConfig::from_toml_str(
        "buildRoot = \"b\"\nbrowserCacheConfigVar = \"cache-map\"",
        "inline",
    )
    .unwrap_err();

    assert_eq!(
        err,
        ConfigError::InvalidVariableName {
            name: "cache-map".to_string()
        }
    );
}

#[test]
fn test_empty_build_root_rejected() {
    let err = BuildConfig::new("").validate().unwrap_err();
    assert_eq!(err, ConfigError::EmptyBuildRoot);
}

#[test]
fn test_unreadable_file_maps_to_invalid_config() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");

    let err: ExError = BuildConfig::from_toml_file(&missing).unwrap_err().into();

    assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
    assert_eq!(err.code(), "ERR_INVALID_CONFIG");
    assert_eq!(err.path(), Some(missing.display().to_string().as_str()));
}
