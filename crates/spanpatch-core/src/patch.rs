//! Applying a replacement to text and to files.

use regex::NoExpand;
use spanpatch_fs::{NormalizedPath, RobustnessConfig, checksum, io};

use crate::error::{Error, Result};
use crate::marker::MarkerPair;
use crate::replacement::Replacement;
use crate::span::find_spans;

/// Everything needed to patch one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchSpec {
    pub target: NormalizedPath,
    pub markers: MarkerPair,
    pub replacement: Replacement,
}

/// Knobs for [`patch_file`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PatchOptions {
    /// Compute the result but leave the file alone.
    pub dry_run: bool,
    /// Fail with `Error::NoMatch` instead of rewriting an unmatched file.
    pub require_match: bool,
    pub robustness: RobustnessConfig,
}

/// Result of [`patch_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchedText {
    pub text: String,
    /// Number of spans replaced.
    pub matches: usize,
}

/// What [`patch_file`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub matches: usize,
    /// Whether the new content differs from the old.
    pub changed: bool,
    /// Whether the file was written. False only for dry runs.
    pub written: bool,
    pub before_checksum: String,
    pub after_checksum: String,
    pub original: String,
    pub patched: String,
}

/// Replaces every span in `content` with the rendered replacement.
///
/// The replacement is inserted literally; `$1` or `${name}` in it are not
/// expanded.
///
/// # Example
/// ```
/// use spanpatch_core::{MarkerPair, Replacement, patch_text};
///
/// let markers = MarkerPair::new("<!-- begin -->", "<!-- end -->").unwrap();
/// let content = "top\n<!-- begin -->\nold\n<!-- end -->\nbottom";
///
/// let patched = patch_text(content, &markers, &Replacement::Body("\nnew\n".into()));
/// assert_eq!(patched.text, "top\n<!-- begin -->\nnew\n<!-- end -->\nbottom");
/// assert_eq!(patched.matches, 1);
/// ```
pub fn patch_text(content: &str, markers: &MarkerPair, replacement: &Replacement) -> PatchedText {
    let rendered = replacement.render(markers);
    let matches = markers.pattern().find_iter(content).count();
    let text = markers
        .pattern()
        .replace_all(content, NoExpand(rendered.as_str()))
        .into_owned();

    PatchedText { text, matches }
}

/// Reads `spec.target`, replaces every span and writes the result back.
///
/// The file is always rewritten, even when nothing matched, unless
/// `options.dry_run` or `options.require_match` says otherwise. The write goes
/// through [`io::write_atomic`], so a failure leaves the previous content in
/// place.
///
/// # Errors
/// - `Error::Fs` wrapping `NotFound`, `PermissionDenied` or `Decoding` when the
///   file cannot be read, and any write failure.
/// - `Error::NoMatch` when `require_match` is set and no span was found.
pub fn patch_file(spec: &PatchSpec, options: &PatchOptions) -> Result<PatchOutcome> {
    let original = io::read_text(&spec.target)?;

    for span in find_spans(&original, &spec.markers) {
        if span.nested_openings > 0 {
            tracing::warn!(
                path = %spec.target,
                start_line = span.start_line,
                end_line = span.end_line,
                nested = span.nested_openings,
                "span contains another opening marker; the match ends at the first closing marker"
            );
        }
    }

    let PatchedText {
        text: patched,
        matches,
    } = patch_text(&original, &spec.markers, &spec.replacement);
    tracing::debug!(path = %spec.target, matches, "applied replacement");

    if matches == 0 {
        if options.require_match {
            return Err(Error::NoMatch {
                path: spec.target.to_native(),
                open: spec.markers.open().to_string(),
                close: spec.markers.close().to_string(),
            });
        }
        tracing::warn!(path = %spec.target, "no span found; content is unchanged");
    } else if !spec.replacement.is_reentrant(&spec.markers) {
        tracing::warn!(
            path = %spec.target,
            "replacement does not contain both markers; a second run will not find it"
        );
    }

    let outcome = PatchOutcome {
        matches,
        changed: original != patched,
        written: !options.dry_run,
        before_checksum: checksum::checksum_text(&original),
        after_checksum: checksum::checksum_text(&patched),
        original,
        patched,
    };

    if options.dry_run {
        tracing::debug!(path = %spec.target, "dry run; not writing");
    } else {
        io::write_atomic(&spec.target, outcome.patched.as_bytes(), options.robustness)?;
    }

    Ok(outcome)
}
