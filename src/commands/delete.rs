//! `tfvc-bridge delete` command.

use std::path::PathBuf;

use chrono::Utc;

use crate::versions::{FileVersion, PageVersion, VersionsController};

/// Execute the `delete` command.
///
/// # Errors
///
/// Returns an error string if the controller reports a failure.
pub fn run(controller: &dyn VersionsController, paths: &[PathBuf]) -> Result<(), String> {
    let now = Utc::now();
    let versions: Vec<PageVersion> =
        paths.iter().map(|path| PageVersion::directory(path, "", now)).collect();
    let refs: Vec<&dyn FileVersion> = versions.iter().map(|v| v as &dyn FileVersion).collect();
    controller.delete(&refs).map_err(|e| e.to_string())
}
