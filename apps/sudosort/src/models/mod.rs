//! Document model for a parsed sudoers file and structured parse errors.

pub mod alias;
pub mod rule;

pub use alias::{AliasKind, AliasTable};
pub use rule::{CommandSpec, Rule};

use serde::Serialize;
use std::fmt;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// Everything the canonical form is rendered from.
pub struct Sudoers {
    /// Leading comment lines, verbatim.
    pub header: Vec<String>,
    /// `Defaults` lines in file order.
    pub defaults: Vec<String>,
    pub host_aliases: AliasTable,
    pub user_aliases: AliasTable,
    pub runas_aliases: AliasTable,
    pub cmnd_aliases: AliasTable,
    pub rules: Vec<Rule>,
}

impl Sudoers {
    pub fn aliases(&self, kind: AliasKind) -> &AliasTable {
        match kind {
            AliasKind::Host => &self.host_aliases,
            AliasKind::User => &self.user_aliases,
            AliasKind::Runas => &self.runas_aliases,
            AliasKind::Cmnd => &self.cmnd_aliases,
        }
    }

    pub fn aliases_mut(&mut self, kind: AliasKind) -> &mut AliasTable {
        match kind {
            AliasKind::Host => &mut self.host_aliases,
            AliasKind::User => &mut self.user_aliases,
            AliasKind::Runas => &mut self.runas_aliases,
            AliasKind::Cmnd => &mut self.cmnd_aliases,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single problem found while parsing.
pub struct ParseError {
    /// 1-based physical line where the offending logical line starts.
    pub line: Option<usize>,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(n) => write!(f, "line {}: {}", n, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// All parse errors of one run, joined into a report only when printed.
pub struct ParseReport {
    pub errors: Vec<ParseError>,
}

impl ParseReport {
    pub fn push(&mut self, line: Option<usize>, message: impl Into<String>) {
        self.errors.push(ParseError {
            line,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl fmt::Display for ParseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for err in &self.errors {
            writeln!(f, "{}", err)?;
        }
        Ok(())
    }
}
