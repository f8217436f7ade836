//! `tfvc-bridge history` command.

use std::path::{Path, PathBuf};

use crate::versions::VersionsController;

/// Execute the `history` command.
///
/// # Errors
///
/// Never fails; the signature matches the other handlers.
pub fn run(
    controller: &mut (dyn VersionsController + '_),
    depth: Option<u32>,
    paths: &[PathBuf],
) -> Result<(), String> {
    if let Some(depth) = depth {
        controller.set_history_depth(depth);
    }
    let files: Vec<&Path> = paths.iter().map(PathBuf::as_path).collect();
    for info in controller.history(&files) {
        println!("{info}");
    }
    Ok(())
}
