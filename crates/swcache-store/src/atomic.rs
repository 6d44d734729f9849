//! Atomic write primitives
//!
//! Uses temp→rename so readers see either the previous file or the complete
//! new one, never a partial write.

use crate::errors::{write_failed, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use swcache_core_types::RunId;
use tokio::fs;

/// Sibling temp path for `target`: `<name>.<unique>.tmp` in the same directory
///
/// The suffix is fresh per call, so a leftover temp entry from an interrupted
/// write never blocks the next one.
fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(format!(".{}.tmp", RunId::new()));
    target.with_file_name(name)
}

/// Atomically write bytes to a file
///
/// Creates missing parent directories. On failure the temp file is removed
/// and any existing target is left untouched.
pub async fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| write_failed("create_output_dir", parent, e))?;
        }
    }

    write_via_temp(target_path, &temp_path_for(target_path), content).await
}

async fn write_via_temp(target_path: &Path, temp_path: &Path, content: &[u8]) -> Result<()> {
    if let Err(e) = fs::write(temp_path, content).await {
        let _ = fs::remove_file(temp_path).await;
        return Err(write_failed("write_temp", temp_path, e));
    }

    if let Err(e) = fs::rename(temp_path, target_path).await {
        let _ = fs::remove_file(temp_path).await;
        return Err(write_failed("rename_temp", target_path, e));
    }

    Ok(())
}
