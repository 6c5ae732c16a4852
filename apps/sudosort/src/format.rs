//! Canonical sudoers serializer.
//!
//! Output layout, in order:
//! - Header comment lines, verbatim, immediately followed by the
//!   `Defaults` lines in their original order.
//! - One blank line, then `Host_Alias` entries; likewise for `User_Alias`,
//!   `Runas_Alias` and `Cmnd_Alias`. Entries are ordered by alias name and
//!   members by the underscore-after-`z` case-insensitive key.
//! - Command aliases with several members continue on following lines,
//!   one member per line, each indented by three tabs.
//! - Rules ordered by name, each preceded by two blank lines and rendered
//!   as `# NAME=<name>` plus `<user>\t<host>=<command>`.
//! - A single trailing newline.
//!
//! Other tooling diffs this output, so the layout is fixed.

use crate::error::SortError;
use crate::models::alias::sort_members;
use crate::models::{AliasKind, ParseReport, Rule, Sudoers};
use crate::parse::{parse_document, ParseOptions};
use log::{debug, info};
use std::fs;
use std::path::Path;

const CMND_MEMBER_SEP: &str = ", \\\n\t\t\t";

pub struct FormatResult {
    pub file: String,
    pub changed: bool,
    pub wrote: bool,
    pub preview: Option<String>,
    pub original: Option<String>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FormatOptions {
    /// Overwrite the file with the canonical form.
    pub write: bool,
    /// Keep the original text in the result (for diffs).
    pub capture_old: bool,
    pub parse: ParseOptions,
}

fn sorted(members: &[String]) -> Vec<String> {
    let mut members = members.to_vec();
    sort_members(&mut members);
    members
}

/// Render the model in canonical form.
pub fn render(doc: &Sudoers) -> String {
    let mut out = String::new();
    for line in doc.header.iter().chain(doc.defaults.iter()) {
        out.push_str(line);
        out.push('\n');
    }

    for kind in AliasKind::ALL {
        out.push('\n');
        let sep = match kind {
            AliasKind::Cmnd => CMND_MEMBER_SEP,
            _ => ", ",
        };
        for (name, members) in doc.aliases(kind).iter() {
            out.push_str(&format!(
                "{}\t{}={}\n",
                kind.keyword(),
                name,
                sorted(members).join(sep)
            ));
        }
    }

    let mut rules: Vec<&Rule> = doc.rules.iter().collect();
    rules.sort_by(|a, b| a.name.cmp(&b.name));
    for rule in rules {
        out.push_str("\n\n");
        out.push_str(&rule.to_string());
    }
    out.push('\n');
    out
}

/// Parse `input` and render it canonically.
pub fn canonicalize(input: &str, opts: &ParseOptions) -> Result<String, ParseReport> {
    parse_document(input, opts).map(|doc| render(&doc))
}

/// Canonicalize one file.
///
/// The file is read completely before anything is written and must be
/// valid UTF-8. Nothing is written when parsing reports errors or when
/// `opts.write` is false; in the latter case a changed file yields a
/// preview of the canonical text.
pub fn run_format(path: &Path, opts: &FormatOptions) -> Result<FormatResult, SortError> {
    let bytes = fs::read(path).map_err(|source| SortError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let original = String::from_utf8(bytes).map_err(|source| SortError::NotUtf8 {
        path: path.to_path_buf(),
        source,
    })?;
    let canonical = canonicalize(&original, &opts.parse).map_err(SortError::Parse)?;
    let changed = canonical != original;
    let file = path.to_string_lossy().to_string();
    debug!("{}: {} bytes in, {} bytes out", file, original.len(), canonical.len());

    if opts.write {
        fs::write(path, &canonical).map_err(|source| SortError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!("wrote {}", file);
        return Ok(FormatResult {
            file,
            changed,
            wrote: true,
            preview: None,
            original: if opts.capture_old { Some(original) } else { None },
        });
    }
    Ok(FormatResult {
        file,
        changed,
        wrote: false,
        preview: if changed { Some(canonical) } else { None },
        original: if opts.capture_old { Some(original) } else { None },
    })
}
