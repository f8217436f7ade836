//! Live shell executor.
//!
//! Commands without a time limit run on `std::process::Command`. A time limit
//! moves the wait onto a current-thread tokio runtime so the child is killed
//! and its pipes abandoned as soon as the limit passes.

use std::process::{Command, Output, Stdio};
use std::time::Duration;

use crate::ports::shell::{CommandLine, ShellExecutor, ShellOutput};

/// Live shell executor that launches the program directly (no shell parsing).
pub struct LiveShellExecutor;

impl ShellExecutor for LiveShellExecutor {
    fn run(
        &self,
        command: &CommandLine,
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        let Some(limit) = command.timeout else {
            let output = Command::new(&command.program)
                .args(&command.args)
                .stdin(Stdio::null())
                .output()?;
            return Ok(shell_output(&output));
        };

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        runtime.block_on(run_with_timeout(command, limit))
    }
}

async fn run_with_timeout(
    command: &CommandLine,
    limit: Duration,
) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
    let child = tokio::process::Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    // Dropping the wait future on expiry drops the child, which kills it.
    match tokio::time::timeout(limit, child.wait_with_output()).await {
        Ok(output) => Ok(shell_output(&output?)),
        Err(_) => Err(format!("`{command}` timed out after {limit:?}").into()),
    }
}

fn shell_output(output: &Output) -> ShellOutput {
    ShellOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}
