//! Error handling for swcache-store
//!
//! Wraps swcache-core ExError with filesystem-specific helpers

use std::path::Path;
use swcache_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a read error for an input file
pub fn read_failed(path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::ReadFailed)
        .with_op("read_service_worker")
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create a copy error for one manifest entry
pub fn copy_failed(uri: &str, source: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::CopyFailed)
        .with_op("copy_artifact")
        .with_uri(uri.to_string())
        .with_path(source.display().to_string())
        .with_message(err.to_string())
}

/// Create a write error for an output file
pub fn write_failed(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::WriteFailed)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}
