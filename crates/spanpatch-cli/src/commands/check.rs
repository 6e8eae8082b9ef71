//! Check command implementation
//!
//! Reports where the markers match without touching the file.

use colored::Colorize;
use serde_json::json;
use spanpatch_core::{Span, find_spans};
use spanpatch_fs::io;

use crate::cli::SpanArgs;
use crate::config::PatchSource;
use crate::error::{CliError, Result};

/// Run the check command
///
/// Fails when no span is found, so it can gate an `apply` in scripts.
pub fn run_check(span: &SpanArgs, json: bool) -> Result<()> {
    let source = PatchSource::load(span.config.as_deref())?;
    let target = source.target(span.target.as_deref())?;
    let markers = source.markers(span.open.as_deref(), span.close.as_deref())?;

    let content = io::read_text(&target)?;
    let spans = find_spans(&content, &markers);

    if json {
        println!("{}", serde_json::to_string_pretty(&spans_json(target.as_str(), &spans))?);
    } else {
        print_spans(target.as_str(), &spans);
    }

    if spans.is_empty() {
        return Err(CliError::user(format!("no span found in {}", target)));
    }
    Ok(())
}

fn spans_json(target: &str, spans: &[Span]) -> serde_json::Value {
    json!({
        "target": target,
        "matches": spans.len(),
        "spans": spans.iter().map(|span| json!({
            "start_line": span.start_line,
            "end_line": span.end_line,
            "start_byte": span.range.start,
            "end_byte": span.range.end,
            "nested_openings": span.nested_openings,
        })).collect::<Vec<_>>(),
    })
}

fn print_spans(target: &str, spans: &[Span]) {
    println!("{} {}", "Check".blue().bold(), target.yellow());

    for span in spans {
        let lines = if span.start_line == span.end_line {
            format!("line {}", span.start_line)
        } else {
            format!("lines {}-{}", span.start_line, span.end_line)
        };
        println!("  {} {}", "*".green(), lines);
        if span.nested_openings > 0 {
            println!(
                "    {} contains {} nested opening marker(s); the span ends at the first closing marker",
                "!".red(),
                span.nested_openings
            );
        }
    }

    println!("{} span(s) found", spans.len());
}
