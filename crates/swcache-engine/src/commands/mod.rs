//! Command entry points
//!
//! Each command owns its operation boundary: it logs start/end (or error)
//! exactly once.

pub mod browser_cache_config;

pub use browser_cache_config::{
    create_browser_cache_config, create_browser_cache_config_from_script,
};
