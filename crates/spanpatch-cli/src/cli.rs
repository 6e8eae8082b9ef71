//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// spanpatch - Replace marker-delimited spans in a text file
#[derive(Parser, Debug)]
#[command(name = "spanpatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Where to look and which markers delimit the span.
///
/// Every value can come from a config file; flags win over the file.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanArgs {
    /// File to patch (overrides `target` in the config file)
    pub target: Option<PathBuf>,

    /// Patch description (.toml, .json, .yaml or .yml)
    #[arg(short, long, env = "SPANPATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Literal text that opens the span
    #[arg(long)]
    pub open: Option<String>,

    /// Literal text that closes the span
    #[arg(long)]
    pub close: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Replace every span with the replacement block and write the file back
    ///
    /// Examples:
    ///   spanpatch apply -c reels.toml
    ///   spanpatch apply src/App.tsx --open '{/* a */}' --close '{/* b */}' --replacement-file block.txt
    ///   spanpatch apply -c reels.toml --dry-run
    Apply {
        #[command(flatten)]
        span: SpanArgs,

        /// Replacement text, given inline
        #[arg(long, conflicts_with = "replacement_file")]
        replacement: Option<String>,

        /// Read the replacement text from a file
        #[arg(long)]
        replacement_file: Option<PathBuf>,

        /// Treat the replacement as the text between the markers
        #[arg(long)]
        body: bool,

        /// Show the diff instead of writing the file
        #[arg(long)]
        dry_run: bool,

        /// Fail if no span is found instead of rewriting the file unchanged
        #[arg(long)]
        require_match: bool,
    },

    /// List the spans the markers match, without writing anything
    Check {
        #[command(flatten)]
        span: SpanArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_apply_with_flags() {
        let cli = Cli::try_parse_from([
            "spanpatch",
            "apply",
            "src/App.tsx",
            "--open",
            "<a>",
            "--close",
            "</a>",
            "--replacement",
            "<a>x</a>",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Commands::Apply {
                span,
                replacement,
                dry_run,
                require_match,
                ..
            } => {
                assert_eq!(span.target, Some(PathBuf::from("src/App.tsx")));
                assert_eq!(span.open.as_deref(), Some("<a>"));
                assert_eq!(replacement.as_deref(), Some("<a>x</a>"));
                assert!(dry_run);
                assert!(!require_match);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_replacement_sources_conflict() {
        let result = Cli::try_parse_from([
            "spanpatch",
            "apply",
            "--replacement",
            "x",
            "--replacement-file",
            "y.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["spanpatch", "check", "-c", "p.toml", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
