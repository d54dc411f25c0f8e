//! Error types for packaging operations.
//!
//! Defines the packaging error taxonomy plus small extension traits for
//! attaching operation and path context to I/O failures.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for gemspec synthesis and packaging
#[derive(Error, Debug)]
pub enum Error {
    /// Plain IO errors without additional context
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// IO errors annotated with the failing operation and path
    #[error("IO error while {action} at {path:?}: {source}")]
    FsError {
        /// What the packager was doing
        action: String,
        /// File or directory involved
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// External command could not be spawned
    #[error("failed to execute {command}: {error}")]
    CommandFailed {
        /// Command that failed to start
        command: String,
        /// Underlying IO error
        error: io::Error,
    },

    /// External tool ran but reported failure
    #[error("`{command}` failed with exit code {code:?}")]
    ToolFailed {
        /// Command line that was run
        command: String,
        /// Exit code, if the process terminated normally
        code: Option<i32>,
    },

    /// No gemspec file present where one was expected
    #[error(
        "no gemspec file found in {dir:?} - use --gemspec to name one or point --project at a manifest"
    )]
    GemspecNotFound {
        /// Directory that was scanned
        dir: PathBuf,
    },

    /// Several gemspec files found where exactly one was expected
    #[error("more than one gemspec file found in {dir:?} ({count}) - use --gemspec to pick one")]
    AmbiguousGemspec {
        /// Directory that was scanned
        dir: PathBuf,
        /// Number of candidates found
        count: usize,
        /// The conflicting gemspec files
        candidates: Vec<PathBuf>,
    },

    /// Invalid date override (expects YYYY-MM-DD)
    #[error("invalid date '{value}': {source}")]
    InvalidDate {
        /// The rejected override value
        value: String,
        /// Parse failure from chrono
        source: chrono::ParseError,
    },

    /// Catch-all for everything else
    #[error("{0}")]
    GenericError(String),
}

/// Early-return with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::packager::Error::GenericError(format!($($arg)*)).into())
    };
}

/// Extension trait for adding a static message to `Option`/`Result` values.
pub trait Context<T> {
    /// Converts a missing or failed value into a [`Error::GenericError`].
    fn context(self, msg: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

impl<T, E: std::fmt::Display> Context<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{}: {}", msg, e)))
    }
}

/// Extension trait for annotating `io::Result` with operation and path.
pub trait ErrorExt<T> {
    /// Wraps an IO error with the operation name and the path involved.
    fn fs_context(self, action: &str, path: &std::path::Path) -> Result<T>;
}

impl<T> ErrorExt<T> for io::Result<T> {
    fn fs_context(self, action: &str, path: &std::path::Path) -> Result<T> {
        self.map_err(|source| Error::FsError {
            action: action.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}
