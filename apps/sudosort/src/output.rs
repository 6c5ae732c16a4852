//! Output rendering for format results and parse reports.
//!
//! Supports `human` (default) and `json` outputs.

use crate::format::FormatResult;
use crate::models::ParseReport;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn to_pretty(v: &JsonVal) -> String {
    serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string())
}

/// Print the outcome of a format run. With `diff`, changed files show the
/// old and new text.
pub fn print_format(res: &FormatResult, output: &str, diff: bool) {
    match output {
        "json" => println!("{}", to_pretty(&compose_format_json(res, diff))),
        _ => {
            let color = use_colors(output);
            if res.wrote {
                if color {
                    println!("{} {}", "formatted:".green().bold(), res.file.bold());
                } else {
                    println!("formatted: {}", res.file);
                }
            } else if !res.changed {
                if color {
                    println!("{} {}", "no changes:".bright_black(), res.file);
                } else {
                    println!("no changes: {}", res.file);
                }
            } else if diff {
                let d = build_naive_diff(res.original.as_deref(), res.preview.as_deref())
                    .or_else(|| res.preview.clone())
                    .unwrap_or_default();
                if color {
                    println!("{} {}\n{}", "---".cyan().bold(), res.file.bold(), d);
                } else {
                    println!("--- {}\n{}", res.file, d);
                }
            } else if color {
                println!("{} {}", "would reformat:".yellow().bold(), res.file.bold());
            } else {
                println!("would reformat: {}", res.file);
            }
        }
    }
}

/// Print all parse errors for `file` as one report.
pub fn print_parse_errors(file: &str, report: &ParseReport, output: &str) {
    match output {
        "json" => println!("{}", to_pretty(&compose_errors_json(file, report))),
        _ => {
            if use_colors(output) {
                println!(
                    "{} {} ({} errors)",
                    "✖".red(),
                    file.bold(),
                    report.len()
                );
            }
            print!("{}", report);
        }
    }
}

fn build_naive_diff(old: Option<&str>, new: Option<&str>) -> Option<String> {
    let old = old?;
    let new = new?;
    let mut out = String::new();
    out.push_str("+++ new\n");
    out.push_str(new);
    out.push_str("--- old\n");
    out.push_str(old);
    Some(out)
}

/// Compose format JSON object (pure) for testing purposes.
pub fn compose_format_json(res: &FormatResult, diff: bool) -> JsonVal {
    json!({
        "file": res.file,
        "changed": res.changed,
        "wrote": res.wrote,
        "preview": if !res.wrote { res.preview.as_ref() } else { None },
        "diff": if diff && !res.wrote {
            build_naive_diff(res.original.as_deref(), res.preview.as_deref())
        } else {
            None
        },
    })
}

/// Compose parse error JSON object (pure) for testing purposes.
pub fn compose_errors_json(file: &str, report: &ParseReport) -> JsonVal {
    json!({
        "file": file,
        "errors": report.errors,
        "summary": { "errors": report.len() },
    })
}
