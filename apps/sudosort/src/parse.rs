//! Directive classification plus alias and rule parsing.
//!
//! Every body line is classified into exactly one [`LineKind`], checked in
//! this order: `Defaults`, the four alias keywords (Host, User, Runas,
//! Cmnd), blank, `# NAME=` comment, other comment, rule candidate.
//!
//! Rules take their name from a pending `# NAME=` slot. The slot is filled
//! by a name comment and emptied by whatever line comes next; only a rule
//! candidate consumes it. A rule candidate without a pending name, or one
//! that does not match `<user> <host> = <command>`, is a parse error. Plain
//! comments after the header are never rules, so each one is reported too.

use crate::lines::{collapse_lines, split_header, LogicalLine};
use crate::models::alias::sort_members;
use crate::models::{AliasKind, CommandSpec, ParseReport, Rule, Sudoers};
use log::{debug, warn};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Closed set of line kinds seen after the header.
pub enum LineKind<'a> {
    Defaults,
    Alias(AliasKind),
    Blank,
    /// `# NAME=<name>`; the name is trimmed and may be empty.
    NameComment(&'a str),
    Comment,
    RuleCandidate,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
/// What to do with a `# NAME=` comment left pending at end of input.
pub enum TrailingName {
    #[default]
    Ignore,
    Error,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ParseOptions {
    pub trailing_name: TrailingName,
}

struct PendingName {
    line: usize,
    name: String,
}

fn name_comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*#\s*NAME=(.*)$").expect("name comment regex"))
}

fn alias_body_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([^\s=]+)\s*=(.*)$").expect("alias regex"))
}

fn rule_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([^\s=]+)\s+([^\s=]+)\s*=\s*(.*)$").expect("rule regex")
    })
}

fn runas_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\((\S+)\)(.*)$").expect("runas regex"))
}

/// Classify one logical line.
pub fn classify(text: &str) -> LineKind<'_> {
    let lead = text.trim_start();
    if lead.starts_with("Defaults") {
        return LineKind::Defaults;
    }
    if let Some(kind) = AliasKind::ALL
        .into_iter()
        .find(|k| lead.starts_with(k.keyword()))
    {
        return LineKind::Alias(kind);
    }
    if lead.is_empty() {
        return LineKind::Blank;
    }
    if let Some(c) = name_comment_re().captures(text) {
        let name = c.get(1).map_or("", |m| m.as_str()).trim();
        return LineKind::NameComment(name);
    }
    if lead.starts_with('#') {
        return LineKind::Comment;
    }
    LineKind::RuleCandidate
}

/// Parse `<Keyword> <name> = <m1>, <m2>, ...` into a name and sorted members.
///
/// Returns `None` when the line lacks a name, an `=`, or any member.
pub fn parse_alias(kind: AliasKind, text: &str) -> Option<(String, Vec<String>)> {
    let rest = text.trim_start().strip_prefix(kind.keyword())?;
    let caps = alias_body_re().captures(rest)?;
    let name = caps.get(1)?.as_str().to_string();
    let mut members: Vec<String> = caps
        .get(2)?
        .as_str()
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect();
    if members.is_empty() {
        return None;
    }
    sort_members(&mut members);
    Some((name, members))
}

/// Split a command field into an optional `(runas)` prefix and the command.
pub fn parse_command(spec: &str) -> CommandSpec {
    match runas_re().captures(spec) {
        Some(c) => CommandSpec::new(&c[1], &c[2]),
        None => CommandSpec::new("", spec),
    }
}

/// Parse `<user> <host> = <command>` and label it with `name`.
pub fn parse_rule(text: &str, name: &str) -> Option<Rule> {
    let caps = rule_re().captures(text)?;
    Some(Rule {
        user: caps[1].to_string(),
        host: caps[2].to_string(),
        command: parse_command(&caps[3]),
        name: name.to_string(),
    })
}

fn bad_rule_message(text: &str) -> String {
    format!(
        "Bad Rule: {}\nDid you remember to use the comment/rule syntax pair?",
        text
    )
}

/// Parse a whole sudoers document.
///
/// All rule errors are collected; the model is only returned when there
/// are none.
pub fn parse_document(input: &str, opts: &ParseOptions) -> Result<Sudoers, ParseReport> {
    let (header, body) = split_header(collapse_lines(input));
    let mut doc = Sudoers {
        header: header.into_iter().map(|l| l.text).collect(),
        ..Sudoers::default()
    };
    let mut report = ParseReport::default();
    let mut pending: Option<PendingName> = None;

    for line in &body {
        let kind = classify(&line.text);
        let name = match kind {
            LineKind::RuleCandidate => pending.take(),
            _ => {
                if let Some(p) = pending.take() {
                    debug!(
                        "line {}: NAME={} is not followed by a rule, dropped",
                        p.line, p.name
                    );
                }
                None
            }
        };
        match kind {
            LineKind::Defaults => doc.defaults.push(line.text.clone()),
            LineKind::Alias(k) => add_alias(&mut doc, k, line),
            LineKind::Blank => {}
            LineKind::Comment => {
                report.push(Some(line.number), bad_rule_message(&line.text));
            }
            LineKind::NameComment("") => {
                warn!("line {}: empty NAME= comment ignored", line.number);
            }
            LineKind::NameComment(n) => {
                pending = Some(PendingName {
                    line: line.number,
                    name: n.to_string(),
                });
            }
            LineKind::RuleCandidate => {
                match name.and_then(|p| parse_rule(&line.text, &p.name)) {
                    Some(rule) => doc.rules.push(rule),
                    None => report.push(Some(line.number), bad_rule_message(&line.text)),
                }
            }
        }
    }

    if let Some(p) = pending {
        match opts.trailing_name {
            TrailingName::Error => report.push(
                Some(p.line),
                format!(
                    "Unused name comment: # NAME={}\nNo rule follows this comment.",
                    p.name
                ),
            ),
            TrailingName::Ignore => {
                debug!("line {}: trailing NAME={} dropped", p.line, p.name);
            }
        }
    }

    if report.is_empty() {
        Ok(doc)
    } else {
        Err(report)
    }
}

fn add_alias(doc: &mut Sudoers, kind: AliasKind, line: &LogicalLine) {
    match parse_alias(kind, &line.text) {
        Some((name, members)) => {
            if doc.aliases_mut(kind).insert(name.clone(), members).is_some() {
                debug!(
                    "line {}: {} {} redeclared, last declaration wins",
                    line.number,
                    kind.keyword(),
                    name
                );
            }
        }
        None => warn!(
            "line {}: malformed {} skipped: {}",
            line.number,
            kind.keyword(),
            line.text.trim()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Sudoers, ParseReport> {
        parse_document(input, &ParseOptions::default())
    }

    #[test]
    fn test_classify_priority_order() {
        assert_eq!(classify("  Defaults env_reset"), LineKind::Defaults);
        assert_eq!(
            classify("Host_Alias WEB = a"),
            LineKind::Alias(AliasKind::Host)
        );
        assert_eq!(
            classify("\tCmnd_Alias X = /bin/ls"),
            LineKind::Alias(AliasKind::Cmnd)
        );
        assert_eq!(classify("   "), LineKind::Blank);
        assert_eq!(classify("# NAME= web_admin "), LineKind::NameComment("web_admin"));
        assert_eq!(classify("#NAME="), LineKind::NameComment(""));
        assert_eq!(classify("# just a note"), LineKind::Comment);
        assert_eq!(classify("alice ALL = /bin/ls"), LineKind::RuleCandidate);
    }

    #[test]
    fn test_parse_alias_sorts_and_trims_members() {
        let (name, members) =
            parse_alias(AliasKind::Host, "Host_Alias  WEB =Web_Servers ,  Apache,").unwrap();
        assert_eq!(name, "WEB");
        assert_eq!(members, vec!["Apache", "Web_Servers"]);
    }

    #[test]
    fn test_parse_alias_rejects_malformed() {
        assert!(parse_alias(AliasKind::User, "User_Alias").is_none());
        assert!(parse_alias(AliasKind::User, "User_Alias ADMINS").is_none());
        assert!(parse_alias(AliasKind::User, "User_Alias ADMINS = ").is_none());
    }

    #[test]
    fn test_name_association() {
        let doc = parse("Defaults env_reset\n# NAME=allow_ls\nalice ALL = /bin/ls\n").unwrap();
        assert_eq!(doc.rules.len(), 1);
        let rule = &doc.rules[0];
        assert_eq!(rule.name, "allow_ls");
        assert_eq!(rule.user, "alice");
        assert_eq!(rule.host, "ALL");
        assert_eq!(rule.command.run_as, "");
        assert_eq!(rule.command.command, "/bin/ls");
    }

    #[test]
    fn test_runas_extraction() {
        let cmd = parse_command("(root) /bin/systemctl restart nginx ");
        assert_eq!(cmd.run_as, "root");
        assert_eq!(cmd.command, "/bin/systemctl restart nginx");

        let cmd = parse_command("(ALL : ALL) ALL");
        assert_eq!(cmd.run_as, "");
        assert_eq!(cmd.command, "(ALL : ALL) ALL");
    }

    #[test]
    fn test_missing_name_comment_is_error() {
        let err = parse("Defaults env_reset\nalice ALL = /bin/ls\n").unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.errors[0].line, Some(2));
        assert!(err.errors[0].message.starts_with("Bad Rule: alice ALL = /bin/ls"));
        assert!(err.errors[0].message.contains("comment/rule syntax pair"));
    }

    #[test]
    fn test_name_must_immediately_precede_rule() {
        let err = parse("Defaults x\n# NAME=a\n\nalice ALL = /bin/ls\n").unwrap_err();
        assert_eq!(err.errors[0].line, Some(4));
    }

    #[test]
    fn test_all_bad_rules_are_reported() {
        let input = "Defaults x\nalice ALL = /bin/ls\n# NAME=ok\nbob ALL = /bin/cat\ngarbage\n";
        let err = parse(input).unwrap_err();
        let lines: Vec<_> = err.errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![Some(2), Some(5)]);
    }

    #[test]
    fn test_empty_name_does_not_label_a_rule() {
        assert!(parse("Defaults x\n# NAME=\nalice ALL = /bin/ls\n").is_err());
    }

    #[test]
    fn test_continuation_alias_members() {
        let doc = parse("Cmnd_Alias FOO = /bin/ls, \\\n/bin/cat\n").unwrap();
        assert_eq!(
            doc.cmnd_aliases.get("FOO"),
            Some(&["/bin/cat".to_string(), "/bin/ls".to_string()][..])
        );
    }

    #[test]
    fn test_redeclared_alias_last_wins() {
        let doc = parse("User_Alias OPS = a, b\nUser_Alias OPS = c\n").unwrap();
        assert_eq!(doc.user_aliases.get("OPS"), Some(&["c".to_string()][..]));
    }

    #[test]
    fn test_alias_namespaces_are_disjoint() {
        let doc = parse("Host_Alias X = h\nRunas_Alias X = r\n").unwrap();
        assert_eq!(doc.host_aliases.get("X"), Some(&["h".to_string()][..]));
        assert_eq!(doc.runas_aliases.get("X"), Some(&["r".to_string()][..]));
        assert!(doc.user_aliases.is_empty());
    }

    #[test]
    fn test_header_and_defaults_kept_verbatim() {
        let doc = parse("#  top\n# second\nDefaults   env_reset\nDefaults:bob !lecture\n").unwrap();
        assert_eq!(doc.header, vec!["#  top", "# second"]);
        assert_eq!(doc.defaults, vec!["Defaults   env_reset", "Defaults:bob !lecture"]);
    }

    #[test]
    fn test_header_swallows_leading_name_comment() {
        let err = parse("# NAME=first\nalice ALL = /bin/ls\n").unwrap_err();
        assert_eq!(err.errors[0].line, Some(2));
    }

    #[test]
    fn test_interspersed_comments_are_bad_rules() {
        let err = parse("Defaults x\n# keep me\n# NAME=a\nalice ALL = /bin/ls\n# trailing\n")
            .unwrap_err();
        let lines: Vec<_> = err.errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![Some(2), Some(5)]);
        assert!(err.errors[0].message.starts_with("Bad Rule: # keep me"));
        assert!(err.errors[0].message.contains("comment/rule syntax pair"));
    }

    #[test]
    fn test_comment_shaped_like_rule_is_not_a_rule() {
        let err = parse("Defaults x\n# NAME=a\n# alice ALL = /bin/ls\n").unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.errors[0].line, Some(3));
    }

    #[test]
    fn test_trailing_name_policy() {
        let input = "Defaults x\n# NAME=r\nalice ALL = ls\n# NAME=dangling\n";
        assert!(parse(input).is_ok());

        let strict = ParseOptions {
            trailing_name: TrailingName::Error,
        };
        let err = parse_document(input, &strict).unwrap_err();
        assert_eq!(err.errors[0].line, Some(4));
        assert!(err.errors[0].message.contains("NAME=dangling"));
    }

    #[test]
    fn test_all_comment_file_has_no_rules() {
        let doc = parse("# only\n# comments\n").unwrap();
        assert_eq!(doc.header.len(), 2);
        assert!(doc.rules.is_empty());
    }
}
