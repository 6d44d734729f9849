//! swcache Store - filesystem side of the cache-config rewriter
//!
//! Provides:
//! - Reading the generated service-worker script
//! - Concurrent content-addressed duplication of build artifacts
//! - Atomic writes of the browser cache config

pub mod atomic;
pub mod emitter;
pub mod errors;
pub mod renamer;

pub use emitter::{emit_cache_config, emit_for_config};
pub use errors::Result;
pub use renamer::ArtifactRenamer;

use std::path::Path;

/// Read the full text of the service-worker script.
///
/// ## Errors
///
/// `ReadFailed` if the file is absent (the build has not produced it yet) or
/// is not readable UTF-8 text.
pub async fn read_service_worker(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| errors::read_failed(path, e))
}
