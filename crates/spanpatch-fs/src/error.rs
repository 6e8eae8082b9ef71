//! Error types for spanpatch-fs

use std::io::ErrorKind;
use std::path::PathBuf;

/// Result type for spanpatch-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in spanpatch-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("{path} is not valid UTF-8 (first invalid byte at offset {valid_up_to})")]
    Decoding { path: PathBuf, valid_up_to: usize },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    /// Classify an I/O error by kind.
    ///
    /// Missing files and permission failures get their own variants so callers
    /// can tell them apart without inspecting the source error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            ErrorKind::NotFound => Self::NotFound { path },
            ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::Io { path, source },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_classifies_not_found() {
        let err = Error::io("a.txt", std::io::Error::from(ErrorKind::NotFound));
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn io_classifies_permission_denied() {
        let err = Error::io("a.txt", std::io::Error::from(ErrorKind::PermissionDenied));
        assert!(matches!(err, Error::PermissionDenied { .. }));
    }

    #[test]
    fn io_keeps_other_kinds() {
        let err = Error::io("a.txt", std::io::Error::other("disk full"));
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("disk full"));
    }
}
