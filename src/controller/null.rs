//! Controller without a backend: only the local filesystem half.

use std::path::Path;

use tracing::info;

use crate::context::ServiceContext;
use crate::error::BridgeError;
use crate::versions::{
    existing_revisions, FileVersion, RevisionFileVersion, VersionInfo, VersionsController,
};

/// Writes, deletes and renames files locally and keeps no history.
///
/// Useful for running a host without a TFVC workspace, and as the baseline
/// the TFVC controller's local behaviour is compared against.
pub struct NullVersionsController<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NullVersionsController<'a> {
    /// Creates a controller over the context's filesystem.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn ensure_directory(&self, dir: &Path) -> Result<(), BridgeError> {
        if !self.ctx.fs.exists(dir) {
            self.ctx.fs.make_dir(dir).map_err(|e| BridgeError::io("create directory", dir, e))?;
        }
        Ok(())
    }
}

impl VersionsController for NullVersionsController<'_> {
    fn set_history_depth(&mut self, depth: u32) {
        info!(depth, "set history depth (ignored)");
    }

    fn revision_data(&self, label: Option<&str>, files: &[&Path]) -> Vec<RevisionFileVersion<'_>> {
        let revisions = existing_revisions(self.ctx.fs.as_ref(), files);
        info!(label = label.unwrap_or(""), found = revisions.len(), "revision data");
        revisions
    }

    fn history(&self, files: &[&Path]) -> Vec<VersionInfo> {
        info!(files = files.len(), "history");
        Vec::new()
    }

    fn make_version(&self, versions: &[&dyn FileVersion]) -> Result<VersionInfo, BridgeError> {
        info!(files = versions.len(), "make version");
        let info = VersionInfo::of_first(versions)?;
        for version in versions {
            let file = version.file();
            if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
                self.ensure_directory(parent)?;
            }
            let mut content =
                version.content().map_err(|e| BridgeError::io("read content of", file, e))?;
            self.ctx
                .fs
                .make_file(file, &mut content)
                .map_err(|e| BridgeError::io("write", file, e))?;
        }
        Ok(info)
    }

    fn delete(&self, versions: &[&dyn FileVersion]) -> Result<(), BridgeError> {
        for version in versions {
            let file = version.file();
            info!(file = %file.display(), "delete");
            if self.ctx.fs.exists(file) {
                self.ctx.fs.delete(file).map_err(|e| BridgeError::io("delete", file, e))?;
            }
        }
        Ok(())
    }

    fn add_directory(&self, dir: &dyn FileVersion) -> Result<VersionInfo, BridgeError> {
        let path = dir.file();
        info!(dir = %path.display(), "add directory");
        self.ensure_directory(path)?;
        let modified = self
            .ctx
            .fs
            .last_modified(path)
            .map_err(|e| BridgeError::io("read modification time of", path, e))?;
        Ok(VersionInfo::new(dir.author(), modified))
    }

    fn rename(&self, version: &dyn FileVersion, old: &Path) -> Result<(), BridgeError> {
        info!(from = %old.display(), to = %version.file().display(), "rename");
        self.ctx.fs.rename(old, version.file()).map_err(|e| BridgeError::io("rename", old, e))
    }
}
