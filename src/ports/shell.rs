//! Shell executor port for running the backend command line.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One external command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLine {
    /// The executable to launch.
    pub program: PathBuf,
    /// Arguments passed to the executable, in order.
    pub args: Vec<String>,
    /// Upper bound on how long to wait for the process. `None` blocks until exit.
    pub timeout: Option<Duration>,
}

impl CommandLine {
    /// Creates a command line with no arguments and no timeout.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), args: Vec::new(), timeout: None }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// The output of a command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellOutput {
    /// The exit code of the process (`-1` when killed by a signal).
    pub exit_code: i32,
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error.
    pub stderr: String,
}

/// Executes external commands synchronously.
///
/// Abstracting execution allows deterministic replay by recording
/// and replaying command outputs during cassette playback.
pub trait ShellExecutor: Send + Sync {
    /// Runs a command and waits for it to exit (or for its timeout).
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned or exceeds its timeout.
    fn run(
        &self,
        command: &CommandLine,
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_program_and_args() {
        let cmd = CommandLine::new("/opt/tf/tf.exe").arg("add").arg("/wiki/Page");
        assert_eq!(cmd.to_string(), "/opt/tf/tf.exe add /wiki/Page");
    }
}
