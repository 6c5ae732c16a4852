//! CLI argument parsing via `clap`.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sudosort",
    version,
    about = "Rewrite a sudoers file in canonical, sorted form",
    long_about = "sudosort parses a sudoers file and rewrites it in place with aliases, members and rules sorted and whitespace normalized, so that files from different teams diff and merge cleanly.\n\nEvery rule must be preceded by a `# NAME=<name>` comment.\n\nConfiguration precedence: CLI > sudosort.toml > defaults.",
    after_help = "Examples:\n  sudosort /etc/sudoers.d/web\n  sudosort --check /etc/sudoers.d/web\n  sudosort --diff --output json sudoers"
)]
/// Top-level CLI options.
pub struct Cli {
    #[arg(help = "Sudoers file to canonicalize (rewritten in place)")]
    pub file: PathBuf,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero if the file would change (implies no write)")]
    pub check: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Show the canonical text for a changed file (implies no write)")]
    pub diff: bool,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Treat a trailing NAME comment with no rule as an error")]
    pub strict: bool,
    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v info, -vv debug)")]
    pub verbose: u8,
}
