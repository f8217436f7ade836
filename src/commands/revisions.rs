//! `tfvc-bridge revisions` command.

use std::path::{Path, PathBuf};

use crate::versions::{FileVersion, VersionsController};

/// Execute the `revisions` command: one `<path>\t<mtime>` line per existing file.
///
/// # Errors
///
/// Never fails; the signature matches the other handlers.
pub fn run(
    controller: &dyn VersionsController,
    label: Option<&str>,
    paths: &[PathBuf],
) -> Result<(), String> {
    let files: Vec<&Path> = paths.iter().map(PathBuf::as_path).collect();
    for revision in controller.revision_data(label, &files) {
        let modified = revision.last_modification_time().to_rfc3339();
        println!("{}\t{modified}", revision.file().display());
    }
    Ok(())
}
