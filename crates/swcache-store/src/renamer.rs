//! Content-addressed duplication of build artifacts.
//!
//! Every manifest entry `uri` gets a byte-identical copy at
//! `{uri-without-ext}.{hash}{ext}` under the build root. Originals are never
//! moved, so consumers of the unhashed names keep working.

use crate::errors::{copy_failed, Result};
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::time::Instant;
use swcache_core::config::BuildConfig;
use swcache_core::manifest::{Manifest, ManifestEntry, RenamedEntry};
use swcache_core::naming::renamed_entry;
use swcache_core::{log_op_end, log_op_error, log_op_start};

/// Duplicates manifest artifacts under content-addressed names
pub struct ArtifactRenamer {
    build_root: PathBuf,
}

impl ArtifactRenamer {
    /// Create a renamer over the given build root
    pub fn new(build_root: impl Into<PathBuf>) -> Self {
        Self {
            build_root: build_root.into(),
        }
    }

    /// Create a renamer over the configured build root
    pub fn from_config(config: &BuildConfig) -> Self {
        Self::new(config.build_root.clone())
    }

    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    /// Filesystem location of a manifest URI
    pub fn resolve(&self, uri: &str) -> PathBuf {
        self.build_root.join(uri.trim_start_matches('/'))
    }

    /// Copy one artifact to its content-addressed name.
    ///
    /// An existing file at the destination is overwritten.
    ///
    /// ## Errors
    ///
    /// `CopyFailed` if the source cannot be read or the destination written.
    pub async fn copy_entry(&self, entry: &ManifestEntry) -> Result<RenamedEntry> {
        let renamed = renamed_entry(entry);
        let source = self.resolve(&entry.uri);
        let destination = self.resolve(&renamed.new_uri);

        let bytes = tokio::fs::copy(&source, &destination)
            .await
            .map_err(|e| copy_failed(&entry.uri, &source, e))?;

        tracing::debug!(
            op = "copy_artifact",
            uri = %entry.uri,
            new_uri = %renamed.new_uri,
            bytes,
        );

        Ok(renamed)
    }

    /// Copy every artifact of `manifest` concurrently.
    ///
    /// All copies are driven to completion before the batch is judged; the
    /// result is in manifest order. Copies that already succeeded are left on
    /// disk when another fails.
    ///
    /// ## Errors
    ///
    /// The first failing entry's `CopyFailed` (in manifest order), annotated
    /// with how many entries failed overall.
    pub async fn rename_all(&self, manifest: &Manifest) -> Result<Vec<RenamedEntry>> {
        let total = manifest.len();
        log_op_start!("rename_artifacts", entry_count = total);
        let start = Instant::now();

        let results = join_all(manifest.iter().map(|entry| self.copy_entry(entry))).await;

        let failed = results.iter().filter(|r| r.is_err()).count();
        let mut renamed = Vec::with_capacity(total);
        let mut first_error = None;
        for result in results {
            match result {
                Ok(entry) => renamed.push(entry),
                Err(e) if first_error.is_none() => first_error = Some(e),
                Err(_) => {}
            }
        }

        if let Some(err) = first_error {
            let message = format!("{} ({} of {} copies failed)", err.message(), failed, total);
            let err = err.with_message(message);
            log_op_error!(
                "rename_artifacts",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                failed_count = failed
            );
            return Err(err);
        }

        log_op_end!(
            "rename_artifacts",
            duration_ms = start.elapsed().as_millis() as u64,
            entry_count = total
        );

        Ok(renamed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swcache_core::errors::ExErrorKind;
    use tempfile::TempDir;

    fn setup_build_root(files: &[(&str, &[u8])]) -> (ArtifactRenamer, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = temp_dir.path().join(name);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
        let renamer = ArtifactRenamer::new(temp_dir.path());
        (renamer, temp_dir)
    }

    #[tokio::test]
    async fn test_copy_entry_keeps_original() {
        let (renamer, dir) = setup_build_root(&[("app.js", b"console.log(1);")]);

        let renamed = renamer
            .copy_entry(&ManifestEntry::new("app.js", "h2"))
            .await
            .unwrap();

        assert_eq!(renamed.new_uri, "app.h2.js");
        assert_eq!(std::fs::read(dir.path().join("app.js")).unwrap(), b"console.log(1);");
        assert_eq!(
            std::fs::read(dir.path().join("app.h2.js")).unwrap(),
            b"console.log(1);"
        );
    }

    #[tokio::test]
    async fn test_copy_entry_nested_and_rooted_uri() {
        let (renamer, dir) = setup_build_root(&[("src/views/home.html", b"<p>home</p>")]);

        let renamed = renamer
            .copy_entry(&ManifestEntry::new("/src/views/home.html", "abc"))
            .await
            .unwrap();

        assert_eq!(renamed.new_uri, "/src/views/home.abc.html");
        assert!(dir.path().join("src/views/home.abc.html").is_file());
    }

    #[tokio::test]
    async fn test_copy_entry_missing_source() {
        let (renamer, _dir) = setup_build_root(&[]);

        let err = renamer
            .copy_entry(&ManifestEntry::new("missing.css", "h"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::CopyFailed);
        assert_eq!(err.uri(), Some("missing.css"));
    }

    #[test]
    fn test_resolve_strips_leading_slash() {
        let renamer = ArtifactRenamer::new("/build");
        assert_eq!(renamer.resolve("/a/b.js"), PathBuf::from("/build/a/b.js"));
        assert_eq!(renamer.resolve("a/b.js"), PathBuf::from("/build/a/b.js"));
    }
}
