//! Content-addressed file naming.
//!
//! `dir/app.js` with hash `abc123` becomes `dir/app.abc123.js`. The extension
//! is the last dot segment of the final path component; a leading dot (as in
//! `.htaccess`) does not start an extension. Without an extension the hash is
//! appended after a single dot.

use crate::manifest::{ManifestEntry, RenamedEntry};

/// Split a URI into `(stem, extension)`; the extension keeps its dot.
///
/// Only `/` separates path components: manifest URIs are URL paths, not
/// platform paths.
pub fn split_extension(uri: &str) -> (&str, &str) {
    let name_start = uri.rfind('/').map_or(0, |i| i + 1);
    match uri[name_start..].rfind('.') {
        Some(0) | None => (uri, ""),
        Some(dot) => uri.split_at(name_start + dot),
    }
}

/// Insert `.{hash}` before the extension of `uri`.
pub fn content_addressed_uri(uri: &str, hash: &str) -> String {
    let (stem, ext) = split_extension(uri);
    format!("{stem}.{hash}{ext}")
}

/// The renamed counterpart of a manifest entry
pub fn renamed_entry(entry: &ManifestEntry) -> RenamedEntry {
    RenamedEntry {
        new_uri: content_addressed_uri(&entry.uri, &entry.hash),
        hash: entry.hash.clone(),
    }
}
