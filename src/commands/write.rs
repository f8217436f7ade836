//! `tfvc-bridge write` command.

use std::io::Read;
use std::path::Path;

use chrono::Utc;

use crate::versions::{PageVersion, VersionsController};

/// Execute the `write` command, reading content from `source` or stdin.
///
/// # Errors
///
/// Returns an error string if the content cannot be read or the write fails.
pub fn run(
    controller: &dyn VersionsController,
    path: &Path,
    author: &str,
    source: Option<&Path>,
) -> Result<(), String> {
    let content = match source {
        Some(source) => std::fs::read(source)
            .map_err(|e| format!("Failed to read {}: {e}", source.display()))?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .map_err(|e| format!("Failed to read stdin: {e}"))?;
            buf
        }
    };

    let version = PageVersion::new(path, content, author, Utc::now());
    let info = controller.make_version(&[&version]).map_err(|e| e.to_string())?;
    println!("{info}");
    Ok(())
}
