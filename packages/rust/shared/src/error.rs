//! Error types for docmirror.
//!
//! Library crates use [`DocMirrorError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all docmirror operations.
#[derive(Debug, thiserror::Error)]
pub enum DocMirrorError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Manifest or config file could not be parsed.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error other than a missing source document.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Manifest violation (duplicate ids, empty required fields, bad ids).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocMirrorError>;

impl DocMirrorError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = DocMirrorError::config("unknown key");
        assert_eq!(err.to_string(), "config error: unknown key");

        let err = DocMirrorError::validation("duplicate entry id 'guide'");
        assert!(err.to_string().contains("duplicate entry id"));
    }

    #[test]
    fn io_error_includes_path() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = DocMirrorError::io("/tmp/docs/guide.md", source);
        let msg = err.to_string();
        assert!(msg.contains("guide.md"));
        assert!(msg.contains("denied"));
    }
}
