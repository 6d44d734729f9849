//! swcache Engine - orchestration of the cache-config rewrite
//!
//! Sequences locate → rename-all → rewrite → emit over the core and store
//! crates and is the entry point for whatever build runner invokes it.

pub mod commands;

pub use commands::{create_browser_cache_config, create_browser_cache_config_from_script};
