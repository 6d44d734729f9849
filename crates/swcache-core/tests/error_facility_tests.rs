use swcache_core::errors::{ExError, ExErrorKind};
use swcache_core_types::RunId;

#[test]
fn test_error_kind_code_mapping() {
    // Each kind has a stable, unique code
    let kinds = vec![
        (ExErrorKind::ReadFailed, "ERR_READ_FAILED"),
        (ExErrorKind::ManifestNotFound, "ERR_MANIFEST_NOT_FOUND"),
        (ExErrorKind::MalformedManifest, "ERR_MALFORMED_MANIFEST"),
        (ExErrorKind::CopyFailed, "ERR_COPY_FAILED"),
        (ExErrorKind::WriteFailed, "ERR_WRITE_FAILED"),
        (ExErrorKind::InvalidConfig, "ERR_INVALID_CONFIG"),
        (ExErrorKind::Internal, "ERR_INTERNAL"),
    ];

    let mut codes: Vec<_> = kinds.iter().map(|(kind, _)| kind.code()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), kinds.len());

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_builder_context_is_inspectable() {
    let run_id = RunId::from_string("run-42".to_string());
    let err = ExError::new(ExErrorKind::WriteFailed)
        .with_op("emit_cache_config")
        .with_path("/build/browser-cache-config.js")
        .with_run_id(run_id.clone())
        .with_message("Permission denied");

    assert_eq!(err.kind(), ExErrorKind::WriteFailed);
    assert_eq!(err.op(), Some("emit_cache_config"));
    assert_eq!(err.path(), Some("/build/browser-cache-config.js"));
    assert_eq!(err.run_id(), Some(&run_id));
    assert_eq!(err.uri(), None);
    assert_eq!(err.message(), "Permission denied");
}

#[test]
fn test_read_failed_distinct_from_manifest_not_found() {
    let read = ExError::new(ExErrorKind::ReadFailed);
    let missing = ExError::new(ExErrorKind::ManifestNotFound);

    assert_ne!(read.kind(), missing.kind());
    assert!(read.kind().is_retryable());
    assert!(!missing.kind().is_retryable());
}
