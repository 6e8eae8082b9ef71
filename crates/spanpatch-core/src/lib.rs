//! Marker-delimited span replacement.
//!
//! A span starts at an opening marker and runs lazily, across line breaks,
//! to the next closing marker:
//!
//! ```text
//! {/* Feed - begin */}
//! ...anything, including newlines...
//! {/* Feed - end */}
//! ```
//!
//! Every such span in a file is replaced with one literal block. The
//! [`patch`] module does this in memory ([`patch_text`]) or against a file on
//! disk ([`patch_file`]), writing the result back atomically. [`span`] only
//! reports where the spans are.
//!
//! The lazy match has no notion of nesting: a span that contains a second
//! opening marker still ends at the first closing marker. [`Span`] counts such
//! nested openings so callers can warn about them.

pub mod error;
pub mod marker;
pub mod patch;
pub mod replacement;
pub mod span;

pub use error::{Error, Result};
pub use marker::MarkerPair;
pub use patch::{PatchOptions, PatchOutcome, PatchSpec, PatchedText, patch_file, patch_text};
pub use replacement::Replacement;
pub use span::{Span, find_spans};
