//! Replaying adapter for the `ShellExecutor` port.

use std::sync::Mutex;

use super::{extract_result, next_output};
use crate::cassette::format::{Cassette, Interaction};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::shell::{CommandLine, ShellExecutor, ShellOutput};

/// Replays recorded backend command results from a cassette.
///
/// The command line passed to `run` is not checked; results are served in
/// recorded order.
pub struct ReplayingShellExecutor {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingShellExecutor {
    /// Creates a new replaying shell executor from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    /// Serves the given standard outputs, one per call, each with exit code 0.
    ///
    /// Handy for scripting a backend whose answers matter only by their text.
    #[must_use]
    pub fn scripted(stdouts: &[&str]) -> Self {
        let interactions = stdouts
            .iter()
            .zip(0u64..)
            .map(|(stdout, seq)| Interaction {
                seq,
                port: "shell".into(),
                method: "run".into(),
                input: serde_json::Value::Null,
                output: serde_json::json!({
                    "ok": { "exit_code": 0, "stdout": stdout, "stderr": "" }
                }),
            })
            .collect();
        let cassette = Cassette {
            name: "scripted".into(),
            recorded_at: chrono::Utc::now(),
            workspace: String::new(),
            interactions,
        };
        Self::new(CassetteReplayer::new(&cassette))
    }
}

impl ShellExecutor for ReplayingShellExecutor {
    fn run(
        &self,
        _command: &CommandLine,
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "shell", "run");
        extract_result(&output, "shell::run")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn make_replayer(output: serde_json::Value) -> CassetteReplayer {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            workspace: "/srv/wiki".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "shell".into(),
                method: "run".into(),
                input: json!({"program": "tf.exe", "args": ["status", "FrontPage"]}),
                output,
            }],
        };
        CassetteReplayer::new(&cassette)
    }

    #[test]
    fn replays_recorded_output() {
        let shell = ReplayingShellExecutor::new(make_replayer(
            json!({"ok": {"exit_code": 0, "stdout": "FrontPage edit\n", "stderr": ""}}),
        ));
        let result = shell.run(&CommandLine::new("tf.exe").arg("status")).unwrap();
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.stdout, "FrontPage edit\n");
    }

    #[test]
    fn replays_recorded_launch_failure() {
        let shell =
            ReplayingShellExecutor::new(make_replayer(json!({"err": "No such file or directory"})));
        let err = shell.run(&CommandLine::new("tf.exe")).unwrap_err();
        assert!(err.to_string().contains("No such file"));
    }

    #[test]
    fn scripted_serves_outputs_in_order() {
        let shell = ReplayingShellExecutor::scripted(&["one\n", "two\nlines\n"]);
        let cmd = CommandLine::new("tf.exe");
        assert_eq!(shell.run(&cmd).unwrap().stdout, "one\n");
        assert_eq!(shell.run(&cmd).unwrap().stdout, "two\nlines\n");
    }
}
