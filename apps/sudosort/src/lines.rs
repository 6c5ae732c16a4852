//! Logical line handling: continuation collapsing and header extraction.
//!
//! A physical line whose right-trimmed text ends with `\` continues on the
//! next physical line. The marker is removed and the pieces are joined
//! without a line break. Logical lines never carry their terminator.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based physical line where this logical line starts.
    pub number: usize,
    pub text: String,
}

/// Merge continued physical lines into logical lines.
///
/// A continuation still pending at end of input is emitted as a final line.
pub fn collapse_lines(input: &str) -> Vec<LogicalLine> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut start: Option<usize> = None;

    for (idx, line) in input.lines().enumerate() {
        let number = *start.get_or_insert(idx + 1);
        if let Some(head) = line.trim_end().strip_suffix('\\') {
            buf.push_str(head);
            continue;
        }
        buf.push_str(line);
        out.push(LogicalLine {
            number,
            text: std::mem::take(&mut buf),
        });
        start = None;
    }
    if let Some(number) = start {
        out.push(LogicalLine { number, text: buf });
    }
    out
}

/// True for lines starting with optional whitespace then `#`.
pub fn is_comment(text: &str) -> bool {
    text.trim_start().starts_with('#')
}

/// Split off the maximal leading run of comment lines.
///
/// An input made only of comments is all header and leaves an empty body.
pub fn split_header(mut lines: Vec<LogicalLine>) -> (Vec<LogicalLine>, Vec<LogicalLine>) {
    let end = lines
        .iter()
        .position(|l| !is_comment(&l.text))
        .unwrap_or(lines.len());
    let body = lines.split_off(end);
    (lines, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[LogicalLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_collapse_joins_continued_lines() {
        let input = "Cmnd_Alias FOO = /bin/ls, \\\n/bin/cat\nalice ALL = FOO\n";
        let lines = collapse_lines(input);
        assert_eq!(
            texts(&lines),
            vec!["Cmnd_Alias FOO = /bin/ls, /bin/cat", "alice ALL = FOO"]
        );
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[1].number, 3);
    }

    #[test]
    fn test_collapse_marker_followed_by_whitespace() {
        let lines = collapse_lines("a, \\  \r\nb\r\n");
        assert_eq!(texts(&lines), vec!["a, b"]);
    }

    #[test]
    fn test_collapse_empty_input() {
        assert!(collapse_lines("").is_empty());
    }

    #[test]
    fn test_collapse_pending_continuation_at_eof() {
        let lines = collapse_lines("one\ntwo \\\n");
        assert_eq!(texts(&lines), vec!["one", "two "]);
        assert_eq!(lines[1].number, 2);

        let lines = collapse_lines("\\");
        assert_eq!(texts(&lines), vec![""]);
    }

    #[test]
    fn test_collapse_keeps_blank_lines() {
        let lines = collapse_lines("a\n\nb");
        assert_eq!(texts(&lines), vec!["a", "", "b"]);
        assert_eq!(lines[2].number, 3);
    }

    #[test]
    fn test_split_header_stops_at_first_non_comment() {
        let lines = collapse_lines("# one\n  # two\n\n# three\nDefaults env_reset\n");
        let (header, body) = split_header(lines);
        assert_eq!(texts(&header), vec!["# one", "  # two"]);
        assert_eq!(texts(&body), vec!["", "# three", "Defaults env_reset"]);
    }

    #[test]
    fn test_split_header_all_comments() {
        let (header, body) = split_header(collapse_lines("# a\n# b\n"));
        assert_eq!(texts(&header), vec!["# a", "# b"]);
        assert!(body.is_empty());

        let (header, body) = split_header(Vec::new());
        assert!(header.is_empty() && body.is_empty());
    }
}
