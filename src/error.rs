//! Error type returned by the versions controllers.

use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced to the host.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A local filesystem or content-stream operation failed.
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        /// What was being attempted, e.g. `"write"`.
        action: &'static str,
        /// The path involved.
        path: PathBuf,
        /// The underlying port error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A backend command failed while strict mode was on.
    #[error("backend command `{command}` failed: {message}")]
    Command {
        /// The full command line.
        command: String,
        /// Launch error or exit status description.
        message: String,
    },

    /// `make_version` was called with no file versions.
    #[error("no file versions supplied")]
    EmptyBatch,
}

impl BridgeError {
    pub(crate) fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Io { action, path: path.into(), source }
    }
}
