//! Precache manifest handling.
//!
//! - `model`: manifest, entry and renamed-entry types
//! - `locator`: finding the manifest in a service-worker script
//! - `rewriter`: assembling renamed entries into a new manifest
//! - `cache_config`: rendering the browser cache config script

pub mod cache_config;
pub mod locator;
pub mod model;
pub mod rewriter;

pub use cache_config::{render_cache_config, DEFAULT_CONFIG_VAR};
pub use locator::{find_manifest_span, locate_manifest, PRECACHE_MARKER};
pub use model::{Manifest, ManifestEntry, RenamedEntry};
pub use rewriter::rewrite_manifest;
