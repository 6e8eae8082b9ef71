//! The block written in place of each matched span.

use crate::marker::MarkerPair;

/// What to substitute for each span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// The complete block, markers included, inserted exactly as given.
    Literal(String),
    /// Only the text between the markers. Rendered as `open + body + close`.
    Body(String),
}

impl Replacement {
    /// The exact text that replaces each span.
    pub fn render(&self, markers: &MarkerPair) -> String {
        match self {
            Self::Literal(text) => text.clone(),
            Self::Body(body) => format!("{}{}{}", markers.open(), body, markers.close()),
        }
    }

    /// Whether the rendered block is itself a complete span.
    ///
    /// When it is, running the same patch again rewrites the block to the same
    /// text. When it is not, a second run will not find anything to replace.
    pub fn is_reentrant(&self, markers: &MarkerPair) -> bool {
        markers.matches(&self.render(markers))
    }
}
