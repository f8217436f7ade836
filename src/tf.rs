//! Team Foundation version control command line.
//!
//! Every backend interaction is `<root>/tf.exe <subcommand> <path>`. Only the
//! standard output text is looked at; exit codes are logged but, unless the
//! client is strict, never change the outcome.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::ports::{CommandLine, ShellExecutor};

/// The backend subcommands the controller issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TfSubcommand {
    /// Register a new file or directory.
    Add,
    /// Mark an existing file as being edited.
    Checkout,
    /// Schedule a file for deletion (removes the working copy).
    Delete,
    /// Discard pending changes.
    Undo,
    /// Report pending changes.
    Status,
}

impl TfSubcommand {
    /// The word passed on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Checkout => "checkout",
            Self::Delete => "delete",
            Self::Undo => "undo",
            Self::Status => "status",
        }
    }

    /// Whether the subcommand changes backend state.
    #[must_use]
    pub fn is_mutating(self) -> bool {
        !matches!(self, Self::Status)
    }
}

impl fmt::Display for TfSubcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Captured standard output of one backend command, one `\n` per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult(String);

impl CommandResult {
    fn from_stdout(stdout: &str) -> Self {
        Self(stdout.lines().map(|line| format!("{line}\n")).collect())
    }

    fn launch_failure(err: &dyn std::error::Error) -> Self {
        Self(format!("Error: {err}"))
    }

    /// The captured text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.0
    }

    /// Number of lines, ignoring trailing blank lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.0.trim_end_matches(['\r', '\n']).lines().count()
    }
}

/// Runs backend subcommands through a [`ShellExecutor`].
pub struct TfClient<'a> {
    shell: &'a dyn ShellExecutor,
    program: PathBuf,
    timeout: Option<Duration>,
    strict: bool,
}

impl<'a> TfClient<'a> {
    /// Creates a client for the executable described by `config`.
    #[must_use]
    pub fn new(shell: &'a dyn ShellExecutor, config: &BridgeConfig) -> Self {
        Self {
            shell,
            program: config.program(),
            timeout: config.command_timeout,
            strict: config.strict,
        }
    }

    /// Builds the command line for `subcommand` on `path`.
    #[must_use]
    pub fn command_line(&self, subcommand: TfSubcommand, path: &Path) -> CommandLine {
        CommandLine::new(&self.program)
            .arg(subcommand.as_str())
            .arg(path.display().to_string())
            .timeout(self.timeout)
    }

    /// Runs `subcommand` on `path` and captures its output.
    ///
    /// A command that cannot be launched yields `"Error: <message>"` as its
    /// output, and a non-zero exit is only logged.
    ///
    /// # Errors
    ///
    /// In strict mode, returns [`BridgeError::Command`] when a mutating
    /// subcommand cannot be launched or exits non-zero.
    pub fn run(&self, subcommand: TfSubcommand, path: &Path) -> Result<CommandResult, BridgeError> {
        let command = self.command_line(subcommand, path);
        let (result, failure) = self.capture(&command);
        if let Some(message) = failure {
            if self.strict && subcommand.is_mutating() {
                return Err(BridgeError::Command { command: command.to_string(), message });
            }
            warn!(%command, %message, "backend command failed; continuing");
        }
        Ok(result)
    }

    /// Runs `status` on `path`. Failures are logged and never promoted,
    /// whatever the strictness.
    #[must_use]
    pub fn status(&self, path: &Path) -> CommandResult {
        let command = self.command_line(TfSubcommand::Status, path);
        let (result, failure) = self.capture(&command);
        if let Some(message) = failure {
            warn!(%command, %message, "status query failed");
        }
        result
    }

    /// Whether `path` has pending changes in the backend.
    ///
    /// Decided by the shape of `status` output: more than one line means a
    /// pending change is listed. A launch failure reads as "not pending".
    #[must_use]
    pub fn is_checked_out(&self, path: &Path) -> bool {
        self.status(path).line_count() > 1
    }

    /// Launches `command`, returning its captured output together with a
    /// failure message when it could not be launched or exited non-zero.
    fn capture(&self, command: &CommandLine) -> (CommandResult, Option<String>) {
        debug!(%command, "running backend command");
        match self.shell.run(command) {
            Ok(output) => {
                let failure = (output.exit_code != 0).then(|| {
                    format!("exited with code {}: {}", output.exit_code, output.stderr.trim())
                });
                (CommandResult::from_stdout(&output.stdout), failure)
            }
            Err(err) => (CommandResult::launch_failure(err.as_ref()), Some(err.to_string())),
        }
    }
}
