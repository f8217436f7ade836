//! `tfvc-bridge mkdir` command.

use std::path::Path;

use chrono::Utc;

use crate::versions::{PageVersion, VersionsController};

/// Execute the `mkdir` command.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created.
pub fn run(controller: &dyn VersionsController, path: &Path, author: &str) -> Result<(), String> {
    let dir = PageVersion::directory(path, author, Utc::now());
    let info = controller.add_directory(&dir).map_err(|e| e.to_string())?;
    println!("{info}");
    Ok(())
}
