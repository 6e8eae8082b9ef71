//! Error types for spanpatch-core

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] spanpatch_fs::Error),

    #[error("The {which} marker must not be empty")]
    InvalidMarker { which: &'static str },

    #[error("Invalid marker pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("No span between {open:?} and {close:?} found in {path}")]
    NoMatch {
        path: PathBuf,
        open: String,
        close: String,
    },
}
