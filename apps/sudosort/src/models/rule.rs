//! Rule and command specification models.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A command, optionally restricted to run as another user.
pub struct CommandSpec {
    pub run_as: String,
    pub command: String,
}

impl CommandSpec {
    /// Build a command spec; both fields are trimmed independently.
    pub fn new(run_as: &str, command: &str) -> Self {
        Self {
            run_as: run_as.trim().to_string(),
            command: command.trim().to_string(),
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.run_as.is_empty() {
            write!(f, "{}", self.command)
        } else {
            write!(f, "({}) {}", self.run_as, self.command)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An access grant labelled by the `# NAME=` comment that preceded it.
pub struct Rule {
    pub user: String,
    pub host: String,
    pub command: CommandSpec,
    pub name: String,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "# NAME={}\n{}\t{}={}",
            self.name, self.user, self.host, self.command
        )
    }
}
