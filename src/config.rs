//! Process-wide configuration, read once and injected into the controller.

use std::path::{PathBuf, MAIN_SEPARATOR_STR};
use std::time::Duration;

/// Environment variable naming the backend installation root.
pub const ROOT_VAR: &str = "TFS_Path";
/// Environment variable overriding the backend executable name.
pub const EXE_VAR: &str = "TFS_EXE";
/// Environment variable holding the per-command timeout in seconds.
pub const TIMEOUT_VAR: &str = "TFS_COMMAND_TIMEOUT_SECS";
/// Environment variable enabling strict backend failure handling.
pub const STRICT_VAR: &str = "TFS_STRICT";

const DEFAULT_EXE: &str = "tf.exe";

/// Settings for talking to the backend command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Backend installation root. `None` when the variable was absent.
    pub tf_root: Option<PathBuf>,
    /// Executable name inside the root.
    pub executable: String,
    /// Optional timeout applied to every backend command.
    pub command_timeout: Option<Duration>,
    /// Promote failures of mutating backend commands to errors.
    pub strict: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            tf_root: None,
            executable: DEFAULT_EXE.to_string(),
            command_timeout: None,
            strict: false,
        }
    }
}

impl BridgeConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let command_timeout = lookup(TIMEOUT_VAR)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        let strict = lookup(STRICT_VAR).is_some_and(|v| {
            matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
        });

        Self {
            tf_root: lookup(ROOT_VAR).map(PathBuf::from),
            executable: lookup(EXE_VAR)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_EXE.to_string()),
            command_timeout,
            strict,
        }
    }

    /// Full path of the backend executable.
    ///
    /// Without a root this is the executable directly under the filesystem
    /// root, which is not expected to exist: the missing setting then
    /// surfaces as a launch failure when the first command runs.
    #[must_use]
    pub fn program(&self) -> PathBuf {
        match &self.tf_root {
            Some(root) => root.join(&self.executable),
            None => PathBuf::from(MAIN_SEPARATOR_STR).join(&self.executable),
        }
    }
}
