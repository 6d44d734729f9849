use swcache_core_types::RunId;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure a rewrite run can surface maps to exactly one kind, and each
/// kind has a stable code for programmatic handling and test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// The service-worker script is absent or unreadable (usually: the build has not run yet)
    ReadFailed,
    /// The script has no `PrecacheConfig ... [[ ... ;` statement
    ManifestNotFound,
    /// The extracted manifest text is not a valid array of `[uri, hash]` pairs
    MalformedManifest,
    /// Duplicating one artifact under its content-addressed name failed
    CopyFailed,
    /// The cache-config file could not be written
    WriteFailed,
    /// The build configuration is unusable
    InvalidConfig,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::ReadFailed => "ERR_READ_FAILED",
            ExErrorKind::ManifestNotFound => "ERR_MANIFEST_NOT_FOUND",
            ExErrorKind::MalformedManifest => "ERR_MALFORMED_MANIFEST",
            ExErrorKind::CopyFailed => "ERR_COPY_FAILED",
            ExErrorKind::WriteFailed => "ERR_WRITE_FAILED",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the caller may reasonably retry after the build pipeline finishes
    pub fn is_retryable(&self) -> bool {
        matches!(self, ExErrorKind::ReadFailed)
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus the context needed to act on the
/// failure: the operation, the filesystem path, and the manifest URI involved.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    uri: Option<String>,
    run_id: Option<RunId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            uri: None,
            run_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add filesystem path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add manifest URI context
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Add run correlation context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the filesystem path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the manifest URI context, if any
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Get the run id context, if any
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(uri) = &self.uri {
            write!(f, " (uri: {})", uri)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Errors raised while loading or validating a `BuildConfig`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Cannot read config file {path}: {message}")]
    Unreadable { path: String, message: String },

    /// The configuration file is not valid TOML for a BuildConfig
    #[error("Cannot parse config file {path}: {message}")]
    Parse { path: String, message: String },

    /// `buildRoot` is empty
    #[error("buildRoot must not be empty")]
    EmptyBuildRoot,

    /// `browserCacheConfigName` is empty or not a plain file name
    #[error("Invalid browserCacheConfigName '{name}': {reason}")]
    InvalidConfigName { name: String, reason: String },

    /// `browserCacheConfigVar` is not a usable script identifier
    #[error("Invalid browserCacheConfigVar '{name}': not a valid identifier")]
    InvalidVariableName { name: String },
}

impl From<ConfigError> for ExError {
    fn from(err: ConfigError) -> Self {
        let message = err.to_string();
        let base = ExError::new(ExErrorKind::InvalidConfig).with_op("load_config");
        match err {
            ConfigError::Unreadable { path, .. } | ConfigError::Parse { path, .. } => {
                base.with_path(path).with_message(message)
            }
            _ => base.with_message(message),
        }
    }
}
