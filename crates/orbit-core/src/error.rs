//! Error types for `orbit-core`.
//!
//! All fallible operations in the core library, including every call across
//! the [`Platform`](crate::platform::Platform) boundary, return
//! [`CoreResult<T>`], which is an alias for `Result<T, CoreError>`.

use std::path::PathBuf;
use std::time::Duration;

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful message. None of them is fatal: the state layer degrades
/// to an empty or previous-known-good state instead.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// A directory was expected but the path points to a file.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Failed to parse a configuration or persisted data file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// The platform service reported a failure.
    #[error("platform error: {0}")]
    Platform(String),

    /// The platform does not provide this operation.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// A platform call did not finish within the configured limit.
    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout `orbit-core`.
pub type CoreResult<T> = Result<T, CoreError>;
