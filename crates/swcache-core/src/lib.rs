//! swcache Core - pure side of the cache-config rewriter
//!
//! This crate provides everything that does not touch the filesystem:
//! - Precache manifest model, parsing and serialization
//! - Locating the manifest inside a generated service-worker script
//! - Content-addressed naming of build artifacts
//! - Assembling and rendering the browser cache config
//! - The build configuration, error facility and logging facility

pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod manifest;
pub mod naming;

// Used by the logging macros
pub use swcache_core_types::schema;

// Re-export commonly used types
pub use config::BuildConfig;
pub use errors::{ConfigError, ExError, ExErrorKind, Result};
pub use manifest::{Manifest, ManifestEntry, RenamedEntry};
