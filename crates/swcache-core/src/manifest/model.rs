//! Precache manifest model.
//!
//! On the wire a manifest is a JSON array of two-element arrays:
//! `[["index.html","3f1a..."],["app.js","9c2e..."]]`. The same shape is used
//! for the manifest embedded in the service worker and for the rewritten
//! manifest emitted into the cache config.

use crate::errors::{ExError, ExErrorKind, Result};
use serde::{Deserialize, Serialize};

/// One `(uri, hash)` pair of a precache manifest.
///
/// `uri` is relative to the build root (a leading `/` is tolerated and kept);
/// `hash` is an opaque content digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct ManifestEntry {
    pub uri: String,
    pub hash: String,
}

impl ManifestEntry {
    pub fn new(uri: impl Into<String>, hash: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            hash: hash.into(),
        }
    }

    /// The URI as a path relative to the build root
    pub fn relative_path(&self) -> &str {
        self.uri.trim_start_matches('/')
    }

    /// Check the entry invariants.
    ///
    /// The URI must be non-empty, name a file, and stay inside the build
    /// root. The hash must be non-empty and free of path separators, since it
    /// becomes part of a file name.
    pub fn validate(&self) -> Result<()> {
        let malformed = |reason: &str| {
            ExError::new(ExErrorKind::MalformedManifest)
                .with_op("validate_entry")
                .with_uri(self.uri.clone())
                .with_message(reason.to_string())
        };

        let relative = self.relative_path();
        if relative.is_empty() {
            return Err(malformed("uri is empty"));
        }
        if relative.ends_with('/') {
            return Err(malformed("uri does not name a file"));
        }
        if relative.split('/').any(|segment| segment == "..") {
            return Err(malformed("uri escapes the build root"));
        }
        if self.hash.is_empty() {
            return Err(malformed("hash is empty"));
        }
        if self.hash.contains(['/', '\\']) {
            return Err(malformed("hash contains a path separator"));
        }
        Ok(())
    }
}

impl From<(String, String)> for ManifestEntry {
    fn from((uri, hash): (String, String)) -> Self {
        Self { uri, hash }
    }
}

impl From<ManifestEntry> for (String, String) {
    fn from(entry: ManifestEntry) -> Self {
        (entry.uri, entry.hash)
    }
}

/// An ordered precache manifest.
///
/// Order carries no meaning for the cache layer but is preserved end to end
/// so output is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self { entries }
    }

    /// Parse manifest JSON text and validate every entry.
    ///
    /// ## Errors
    ///
    /// `MalformedManifest` if the text is not an array of string pairs or an
    /// entry breaks its invariants.
    pub fn parse(json: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(json).map_err(|e| {
            ExError::new(ExErrorKind::MalformedManifest)
                .with_op("parse_manifest")
                .with_message(e.to_string())
        })?;
        for entry in &manifest.entries {
            entry.validate()?;
        }
        Ok(manifest)
    }

    /// Serialize to compact JSON, the form embedded in the cache config
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            ExError::new(ExErrorKind::Internal)
                .with_op("serialize_manifest")
                .with_message(e.to_string())
        })
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ManifestEntry> {
        self.entries.iter()
    }
}

impl IntoIterator for Manifest {
    type Item = ManifestEntry;
    type IntoIter = std::vec::IntoIter<ManifestEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a ManifestEntry;
    type IntoIter = std::slice::Iter<'a, ManifestEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<ManifestEntry> for Manifest {
    fn from_iter<I: IntoIterator<Item = ManifestEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A manifest entry after its artifact was duplicated under a
/// content-addressed name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedEntry {
    pub new_uri: String,
    pub hash: String,
}

impl From<RenamedEntry> for ManifestEntry {
    fn from(renamed: RenamedEntry) -> Self {
        ManifestEntry {
            uri: renamed.new_uri,
            hash: renamed.hash,
        }
    }
}
