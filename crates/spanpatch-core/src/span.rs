//! Locating marker-delimited spans in text.

use std::ops::Range;

use crate::marker::MarkerPair;

/// One match of the span pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte range of the whole match, markers included.
    pub range: Range<usize>,
    /// The text between the markers.
    pub inner: String,
    /// The 1-based line on which the opening marker starts.
    pub start_line: usize,
    /// The 1-based line on which the closing marker ends.
    pub end_line: usize,
    /// Opening markers found inside `inner`.
    ///
    /// Non-zero means the lazy match probably closed an inner span, leaving
    /// an unpaired closing marker after this one.
    pub nested_openings: usize,
}

/// Finds every span in `content`, in order of appearance.
///
/// Spans never overlap; scanning resumes after each closing marker.
///
/// # Example
/// ```
/// use spanpatch_core::{MarkerPair, find_spans};
///
/// let markers = MarkerPair::new("<!-- begin -->", "<!-- end -->").unwrap();
/// let content = "intro\n<!-- begin -->\nold\n<!-- end -->\noutro";
///
/// let spans = find_spans(content, &markers);
/// assert_eq!(spans.len(), 1);
/// assert_eq!(spans[0].inner, "\nold\n");
/// assert_eq!((spans[0].start_line, spans[0].end_line), (2, 4));
/// ```
pub fn find_spans(content: &str, markers: &MarkerPair) -> Vec<Span> {
    markers
        .pattern()
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1).map_or("", |m| m.as_str());
            // A closing marker ending in a newline still ends on its own line.
            let trailing_newline = usize::from(whole.as_str().ends_with('\n'));
            Some(Span {
                range: whole.range(),
                inner: inner.to_string(),
                start_line: line_of(content, whole.start()),
                end_line: line_of(content, whole.end()) - trailing_newline,
                nested_openings: inner.matches(markers.open()).count(),
            })
        })
        .collect()
}

fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}
