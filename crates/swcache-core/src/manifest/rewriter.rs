//! Assembling renamed entries into the manifest that ships in the cache config.

use super::model::{Manifest, RenamedEntry};

/// Build the rewritten manifest, keeping the order of `renamed`.
pub fn rewrite_manifest(renamed: Vec<RenamedEntry>) -> Manifest {
    renamed.into_iter().map(Into::into).collect()
}
