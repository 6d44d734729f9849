//! Build configuration for a cache-config rewrite run.
//!
//! One `BuildConfig` is built per run and handed to every stage; nothing reads
//! process-wide settings. It can be assembled in code or loaded from TOML:
//!
//! ```toml
//! buildRoot = "build/bundled"
//! serviceWorkerScriptPath = "service-worker.js"
//! browserCacheConfigName = "browser-cache-config.js"
//! browserCacheConfigVar = "BrowserCacheConfig"
//! ```

use crate::errors::ConfigError;
use crate::manifest::DEFAULT_CONFIG_VAR;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default service-worker script name, relative to the build root
pub const DEFAULT_SERVICE_WORKER: &str = "service-worker.js";

/// Default cache-config file name, relative to the build root
pub const DEFAULT_CACHE_CONFIG_NAME: &str = "browser-cache-config.js";

fn default_cache_config_name() -> String {
    DEFAULT_CACHE_CONFIG_NAME.to_string()
}

fn default_cache_config_var() -> String {
    DEFAULT_CONFIG_VAR.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildConfig {
    /// Directory holding the finished build output
    pub build_root: PathBuf,

    /// Service-worker script; relative paths resolve against `build_root`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_worker_script_path: Option<PathBuf>,

    /// File name of the emitted cache config inside `build_root`
    #[serde(default = "default_cache_config_name")]
    pub browser_cache_config_name: String,

    /// Variable the cache config assigns the manifest to
    #[serde(default = "default_cache_config_var")]
    pub browser_cache_config_var: String,
}

impl BuildConfig {
    pub fn new(build_root: impl Into<PathBuf>) -> Self {
        Self {
            build_root: build_root.into(),
            service_worker_script_path: None,
            browser_cache_config_name: default_cache_config_name(),
            browser_cache_config_var: default_cache_config_var(),
        }
    }

    /// Build root for the bundled output of a project laid out as
    /// `<root_directory>/<bundled_directory>`.
    pub fn from_layout(root_directory: impl AsRef<Path>, bundled_directory: impl AsRef<Path>) -> Self {
        Self::new(root_directory.as_ref().join(bundled_directory))
    }

    pub fn with_service_worker_script_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.service_worker_script_path = Some(path.into());
        self
    }

    pub fn with_browser_cache_config_name(mut self, name: impl Into<String>) -> Self {
        self.browser_cache_config_name = name.into();
        self
    }

    pub fn with_browser_cache_config_var(mut self, name: impl Into<String>) -> Self {
        self.browser_cache_config_var = name.into();
        self
    }

    /// Resolved location of the service-worker script
    pub fn service_worker_path(&self) -> PathBuf {
        let script = self
            .service_worker_script_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SERVICE_WORKER));
        self.build_root.join(script)
    }

    /// Directory the cache config is written into
    pub fn cache_config_dir(&self) -> &Path {
        &self.build_root
    }

    /// Resolved location of the emitted cache config
    pub fn cache_config_path(&self) -> PathBuf {
        self.build_root.join(&self.browser_cache_config_name)
    }

    /// Check that the configuration can drive a run.
    ///
    /// ## Errors
    ///
    /// - `EmptyBuildRoot` when `build_root` is empty
    /// - `InvalidConfigName` when the config file name is empty or has a path separator
    /// - `InvalidVariableName` when the variable is not a script identifier
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.build_root.as_os_str().is_empty() {
            return Err(ConfigError::EmptyBuildRoot);
        }

        let name = &self.browser_cache_config_name;
        if name.is_empty() {
            return Err(ConfigError::InvalidConfigName {
                name: name.clone(),
                reason: "must not be empty".to_string(),
            });
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(ConfigError::InvalidConfigName {
                name: name.clone(),
                reason: "must be a plain file name".to_string(),
            });
        }

        if !is_script_identifier(&self.browser_cache_config_var) {
            return Err(ConfigError::InvalidVariableName {
                name: self.browser_cache_config_var.clone(),
            });
        }

        Ok(())
    }

    /// Parse and validate a TOML configuration.
    ///
    /// `origin` names the source in error messages. A relative `buildRoot` is
    /// kept as written.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: BuildConfig = toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file.
    ///
    /// A relative `buildRoot` resolves against the directory holding the file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: origin.clone(),
            message: e.to_string(),
        })?;

        let mut config = Self::from_toml_str(&text, &origin)?;
        if config.build_root.is_relative() {
            if let Some(dir) = path.parent() {
                config.build_root = dir.join(&config.build_root);
            }
        }
        Ok(config)
    }
}

fn is_script_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_derive_from_build_root() {
        let config = BuildConfig::new("build/bundled");

        assert_eq!(
            config.service_worker_path(),
            PathBuf::from("build/bundled/service-worker.js")
        );
        assert_eq!(
            config.cache_config_path(),
            PathBuf::from("build/bundled/browser-cache-config.js")
        );
        assert_eq!(config.browser_cache_config_var, "BrowserCacheConfig");
    }

    #[test]
    fn test_from_layout() {
        let config = BuildConfig::from_layout("build", "bundled");
        assert_eq!(config.build_root, PathBuf::from("build/bundled"));
    }

    #[test]
    fn test_relative_service_worker_resolves_against_root() {
        let config = BuildConfig::new("out").with_service_worker_script_path("sw/worker.js");
        assert_eq!(config.service_worker_path(), PathBuf::from("out/sw/worker.js"));
    }

    #[test]
    fn test_identifier_check() {
        assert!(is_script_identifier("BrowserCacheConfig"));
        assert!(is_script_identifier("_cfg$1"));
        assert!(!is_script_identifier("1cfg"));
        assert!(!is_script_identifier("my-config"));
        assert!(!is_script_identifier(""));
    }

    #[test]
    fn test_validate_rejects_nested_config_name() {
        let config = BuildConfig::new("out").with_browser_cache_config_name("nested/cfg.js");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidConfigName { .. })
        ));
    }
}
