//! Writing the browser cache config file.

use crate::atomic::atomic_write;
use crate::errors::Result;
use std::path::{Path, PathBuf};
use std::time::Instant;
use swcache_core::config::BuildConfig;
use swcache_core::manifest::{render_cache_config, Manifest};
use swcache_core::{log_op_end, log_op_error, log_op_start};

/// Render `manifest` and atomically write it to `destination_dir/file_name`.
///
/// Returns the path written. A previous file at that path is replaced
/// wholesale; on failure it is left as it was.
///
/// ## Errors
///
/// `WriteFailed` on any filesystem error.
pub async fn emit_cache_config(
    manifest: &Manifest,
    destination_dir: &Path,
    file_name: &str,
    var_name: &str,
) -> Result<PathBuf> {
    let target = destination_dir.join(file_name);
    log_op_start!("emit_cache_config", path = %target.display());
    let start = Instant::now();

    let result = emit_cache_config_impl(manifest, &target, var_name).await;

    match &result {
        Ok(()) => {
            log_op_end!(
                "emit_cache_config",
                duration_ms = start.elapsed().as_millis() as u64,
                entry_count = manifest.len()
            );
        }
        Err(e) => {
            log_op_error!(
                "emit_cache_config",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
        }
    }

    result.map(|()| target)
}

/// Emit using the destination, file name and variable from `config`
pub async fn emit_for_config(manifest: &Manifest, config: &BuildConfig) -> Result<PathBuf> {
    emit_cache_config(
        manifest,
        config.cache_config_dir(),
        &config.browser_cache_config_name,
        &config.browser_cache_config_var,
    )
    .await
}

async fn emit_cache_config_impl(manifest: &Manifest, target: &Path, var_name: &str) -> Result<()> {
    let body = render_cache_config(manifest, var_name)?;
    atomic_write(target, body.as_bytes()).await
}
