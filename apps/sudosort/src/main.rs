//! Sudosort CLI binary entry point.
//! Resolves settings, canonicalizes one file and prints the result.

use clap::error::ErrorKind;
use clap::Parser;
use std::process;
use sudosort::cli::Cli;
use sudosort::error::SortError;
use sudosort::format::{self, FormatOptions};
use sudosort::parse::ParseOptions;
use sudosort::{config, logger, output};

fn main() {
    // Wrong argument counts exit 1 rather than clap's default 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                eprint!("{}", e);
                process::exit(1);
            }
        },
    };
    logger::init(cli.verbose);

    let eff = config::resolve_effective(
        &cli.file,
        cli.output.as_deref(),
        if cli.check { Some(true) } else { None },
        if cli.diff { Some(true) } else { None },
        if cli.strict { Some(true) } else { None },
    );
    // --diff and --check never write
    let opts = FormatOptions {
        write: !(eff.check || eff.diff),
        capture_old: eff.diff,
        parse: ParseOptions {
            trailing_name: eff.trailing_name,
        },
    };

    match format::run_format(&cli.file, &opts) {
        Ok(res) => {
            output::print_format(&res, &eff.output, eff.diff);
            if eff.check && res.changed {
                process::exit(1);
            }
        }
        Err(SortError::Parse(report)) => {
            output::print_parse_errors(&cli.file.to_string_lossy(), &report, &eff.output);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("sudosort: {}", e);
            process::exit(1);
        }
    }
}
