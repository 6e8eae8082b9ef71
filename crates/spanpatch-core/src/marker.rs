//! Opening and closing markers and the pattern built from them.

use regex::Regex;

use crate::error::{Error, Result};

/// The two literal strings delimiting a replaceable span.
///
/// Markers are matched literally. The compiled pattern is
/// `(?s)<open>(.*?)<close>` with both markers escaped, so `.` also matches
/// line breaks and the span stops at the first closing marker.
#[derive(Debug, Clone)]
pub struct MarkerPair {
    open: String,
    close: String,
    pattern: Regex,
}

impl MarkerPair {
    /// Build a marker pair and compile its pattern.
    ///
    /// # Errors
    /// Returns `Error::InvalidMarker` if either marker is empty.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self> {
        let open = open.into();
        let close = close.into();
        if open.is_empty() {
            return Err(Error::InvalidMarker { which: "opening" });
        }
        if close.is_empty() {
            return Err(Error::InvalidMarker { which: "closing" });
        }

        let pattern = Regex::new(&format!(
            r"(?s){}(.*?){}",
            regex::escape(&open),
            regex::escape(&close)
        ))?;

        Ok(Self {
            open,
            close,
            pattern,
        })
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }

    /// The compiled span pattern. Capture group 1 is the text between the markers.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Whether `content` contains at least one complete span.
    pub fn matches(&self, content: &str) -> bool {
        self.pattern.is_match(content)
    }
}

impl PartialEq for MarkerPair {
    fn eq(&self, other: &Self) -> bool {
        self.open == other.open && self.close == other.close
    }
}

impl Eq for MarkerPair {}
