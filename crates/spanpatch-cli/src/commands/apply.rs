//! Apply command implementation
//!
//! Replaces every span in the target file and writes it back, or shows the
//! would-be diff with `--dry-run`.

use std::path::Path;

use colored::Colorize;
use similar::TextDiff;
use spanpatch_core::{PatchOptions, PatchSpec, patch_file};

use crate::cli::SpanArgs;
use crate::config::PatchSource;
use crate::error::Result;

/// Printed once after a successful write.
pub const SUCCESS_MESSAGE: &str = "Replacement completed successfully!";

/// Run the apply command
pub fn run_apply(
    span: &SpanArgs,
    replacement: Option<&str>,
    replacement_file: Option<&Path>,
    body: bool,
    dry_run: bool,
    require_match: bool,
) -> Result<()> {
    let source = PatchSource::load(span.config.as_deref())?;
    let spec = PatchSpec {
        target: source.target(span.target.as_deref())?,
        markers: source.markers(span.open.as_deref(), span.close.as_deref())?,
        replacement: source.replacement(replacement, replacement_file, body)?,
    };
    let options = PatchOptions {
        dry_run,
        require_match,
        robustness: source.robustness(),
    };

    let outcome = patch_file(&spec, &options)?;
    tracing::debug!(
        path = %spec.target,
        matches = outcome.matches,
        changed = outcome.changed,
        before = %outcome.before_checksum,
        after = %outcome.after_checksum,
        "patch finished"
    );

    if !dry_run {
        println!("{}", SUCCESS_MESSAGE);
        return Ok(());
    }

    if outcome.matches == 0 {
        println!("{} no span found in {}", "Dry run:".yellow().bold(), spec.target);
    } else if !outcome.changed {
        println!(
            "{} {} span(s) in {} already up to date",
            "Dry run:".yellow().bold(),
            outcome.matches,
            spec.target
        );
    } else {
        print_diff(&render_diff(spec.target.as_str(), &outcome.original, &outcome.patched));
    }
    Ok(())
}

/// Unified diff between the current and patched content.
pub fn render_diff(path: &str, original: &str, patched: &str) -> String {
    TextDiff::from_lines(original, patched)
        .unified_diff()
        .context_radius(3)
        .header(&format!("a/{}", path), &format!("b/{}", path))
        .to_string()
}

fn print_diff(diff: &str) {
    for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }
}
