//! Locating the precache manifest inside a generated service-worker script.
//!
//! The generator emits one statement of the form
//! `var PrecacheConfig = [["index.html","3f1a..."],...];`. The manifest text
//! runs from the first `[[` after the `PrecacheConfig` marker up to (not
//! including) the next `;`.

use crate::errors::{ExError, ExErrorKind, Result};
use std::ops::Range;
use std::path::Path;

/// Token that identifies the precache manifest declaration
pub const PRECACHE_MARKER: &str = "PrecacheConfig";

const ARRAY_OPEN: &str = "[[";
const STATEMENT_END: char = ';';

/// Byte range of the manifest JSON within the script, if present.
pub fn find_manifest_span(script: &str) -> Option<Range<usize>> {
    let marker = script.find(PRECACHE_MARKER)?;
    let start = marker + script[marker..].find(ARRAY_OPEN)?;
    let end = start + script[start..].find(STATEMENT_END)?;
    Some(start..end)
}

/// Extract the raw manifest JSON from a service-worker script.
///
/// `script_path` is only used to make the error actionable.
///
/// ## Errors
///
/// `ManifestNotFound` when the marker, the opening `[[`, or the terminating
/// `;` is missing.
pub fn locate_manifest<'a>(script: &'a str, script_path: &Path) -> Result<&'a str> {
    find_manifest_span(script)
        .map(|span| &script[span])
        .ok_or_else(|| {
            ExError::new(ExErrorKind::ManifestNotFound)
                .with_op("locate_manifest")
                .with_path(script_path.display().to_string())
                .with_message(format!(
                    "No {} found in {}",
                    PRECACHE_MARKER,
                    script_path.display()
                ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_excludes_semicolon() {
        let script = r#"var PrecacheConfig = [["a.js","1"]];"#;
        let span = find_manifest_span(script).unwrap();
        assert_eq!(&script[span], r#"[["a.js","1"]]"#);
    }

    #[test]
    fn test_brackets_before_marker_are_ignored() {
        let script = r#"var other = [[1]]; var PrecacheConfig = [["b.js","2"]]; x();"#;
        let span = find_manifest_span(script).unwrap();
        assert_eq!(&script[span], r#"[["b.js","2"]]"#);
    }

    #[test]
    fn test_first_marker_wins() {
        let script = r#"// PrecacheConfig
var PrecacheConfig = [["c.js","3"]];"#;
        let span = find_manifest_span(script).unwrap();
        assert_eq!(&script[span], r#"[["c.js","3"]]"#);
    }

    #[test]
    fn test_missing_pieces() {
        assert!(find_manifest_span("var x = [[1]];").is_none());
        assert!(find_manifest_span("var PrecacheConfig = [];").is_none());
        assert!(find_manifest_span(r#"var PrecacheConfig = [["a","b"]]"#).is_none());
    }
}
