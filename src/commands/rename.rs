//! `tfvc-bridge rename` command.

use std::path::Path;

use chrono::Utc;

use crate::versions::{PageVersion, VersionsController};

/// Execute the `rename` command.
///
/// # Errors
///
/// Returns an error string if the rename fails.
pub fn run(controller: &dyn VersionsController, from: &Path, to: &Path) -> Result<(), String> {
    let target = PageVersion::directory(to, "", Utc::now());
    controller.rename(&target, from).map_err(|e| e.to_string())
}
