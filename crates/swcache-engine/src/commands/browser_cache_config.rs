//! Browser cache config command
//!
//! Turns the precache manifest of a generated service worker into a
//! content-addressed browser cache config:
//!
//! 1. read the service-worker script
//! 2. locate and parse the embedded manifest
//! 3. duplicate every artifact under `{stem}.{hash}{ext}` (concurrently, joined)
//! 4. rewrite the manifest to the new URIs
//! 5. atomically write `{buildRoot}/{browserCacheConfigName}`
//!
//! The service worker itself is not modified. Any failure stops the run
//! before the cache config is written.
//!
//! ## Logging
//!
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure

use std::path::Path;
use swcache_core::config::BuildConfig;
use swcache_core::errors::{ExError, Result};
use swcache_core::manifest::{locate_manifest, rewrite_manifest, Manifest};
use swcache_core::{log_op_end, log_op_error, log_op_start};
use swcache_core_types::RunId;
use swcache_store::{emit_for_config, read_service_worker, ArtifactRenamer};

/// Generate the browser cache config for the build described by `config`.
///
/// Returns the rewritten manifest that was written to the cache config.
///
/// ## Errors
///
/// - `InvalidConfig`: `config` fails validation
/// - `ReadFailed`: the service-worker script is missing or unreadable
/// - `ManifestNotFound`: the script has no precache manifest statement
/// - `MalformedManifest`: the manifest is not a valid list of `[uri, hash]` pairs
/// - `CopyFailed`: an artifact could not be duplicated; nothing is emitted
/// - `WriteFailed`: the cache config could not be written
pub async fn create_browser_cache_config(config: &BuildConfig) -> Result<Manifest> {
    let run_id = RunId::new();
    let script_path = config.service_worker_path();
    log_op_start!(
        "create_browser_cache_config",
        run_id = %run_id,
        build_root = %config.build_root.display(),
        path = %script_path.display()
    );
    let start = std::time::Instant::now();

    let result = async {
        config.validate().map_err(ExError::from)?;
        let script = read_service_worker(&script_path).await?;
        create_browser_cache_config_from_script(&script, &script_path, config).await
    }
    .await
    .map_err(|e| {
        let e = e.with_run_id(run_id.clone());
        log_op_error!(
            "create_browser_cache_config",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            run_id = %run_id
        );
        e
    })?;

    log_op_end!(
        "create_browser_cache_config",
        duration_ms = start.elapsed().as_millis() as u64,
        run_id = %run_id,
        entry_count = result.len()
    );

    Ok(result)
}

/// Generate the browser cache config from script text already in memory.
///
/// `script_path` is only used in error messages. Does not validate `config`.
pub async fn create_browser_cache_config_from_script(
    script: &str,
    script_path: &Path,
    config: &BuildConfig,
) -> Result<Manifest> {
    let manifest_json = locate_manifest(script, script_path)?;
    let manifest = Manifest::parse(manifest_json)?;

    let renamed = ArtifactRenamer::from_config(config)
        .rename_all(&manifest)
        .await?;
    let rewritten = rewrite_manifest(renamed);

    emit_for_config(&rewritten, config).await?;

    Ok(rewritten)
}
