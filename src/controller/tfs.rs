//! Controller that mirrors every local change into TFVC.

use std::path::Path;

use tracing::{info, warn};

use crate::config::BridgeConfig;
use crate::context::ServiceContext;
use crate::error::BridgeError;
use crate::tf::{TfClient, TfSubcommand};
use crate::versions::{
    existing_revisions, FileVersion, RevisionFileVersion, VersionInfo, VersionsController,
};

/// Pairs each local filesystem mutation with the matching backend command.
///
/// History lives in the backend; this controller keeps none of its own.
pub struct TfsVersionsController<'a> {
    ctx: &'a ServiceContext,
    tf: TfClient<'a>,
    history_depth: Option<u32>,
}

impl<'a> TfsVersionsController<'a> {
    /// Creates a controller using the context's ports and the given settings.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, config: &BridgeConfig) -> Self {
        Self { ctx, tf: TfClient::new(ctx.shell.as_ref(), config), history_depth: None }
    }

    /// The depth last passed to `set_history_depth`, if any.
    #[must_use]
    pub fn history_depth(&self) -> Option<u32> {
        self.history_depth
    }

    /// Creates `dir` and registers it, unless it already exists.
    fn ensure_directory(&self, dir: &Path) -> Result<(), BridgeError> {
        if self.ctx.fs.exists(dir) {
            return Ok(());
        }
        self.ctx.fs.make_dir(dir).map_err(|e| BridgeError::io("create directory", dir, e))?;
        self.tf.run(TfSubcommand::Add, dir)?;
        Ok(())
    }

    fn write_version(&self, version: &dyn FileVersion) -> Result<(), BridgeError> {
        let file = version.file();
        if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.ensure_directory(parent)?;
        }

        let is_new = !self.ctx.fs.exists(file);
        {
            let mut content =
                version.content().map_err(|e| BridgeError::io("read content of", file, e))?;
            self.ctx
                .fs
                .make_file(file, &mut content)
                .map_err(|e| BridgeError::io("write", file, e))?;
        }

        let subcommand = if is_new { TfSubcommand::Add } else { TfSubcommand::Checkout };
        self.tf.run(subcommand, file)?;
        Ok(())
    }

    /// Deletes `path`, children first when it is a directory.
    fn delete_path(&self, path: &Path) -> Result<(), BridgeError> {
        if self.ctx.fs.is_dir(path) {
            match self.ctx.fs.list_dir(path) {
                Ok(children) => {
                    for child in children {
                        self.delete_path(&path.join(child))?;
                    }
                }
                Err(e) => warn!(path = %path.display(), error = %e, "cannot list directory"),
            }
        }

        // A pending change blocks `tf delete`, so it is undone and the
        // working copy removed by hand.
        if self.tf.is_checked_out(path) {
            self.tf.run(TfSubcommand::Undo, path)?;
            if let Err(e) = self.ctx.fs.delete(path) {
                warn!(path = %path.display(), error = %e, "local delete failed");
            }
        } else {
            self.tf.run(TfSubcommand::Delete, path)?;
        }
        Ok(())
    }
}

impl VersionsController for TfsVersionsController<'_> {
    fn set_history_depth(&mut self, depth: u32) {
        info!(depth, "set history depth");
        self.history_depth = Some(depth);
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
        let info = VersionInfo::of_first(versions)?;
        info!(files = versions.len(), "make version");
        for version in versions {
            self.write_version(*version)?;
        }
        Ok(info)
    }

    fn delete(&self, versions: &[&dyn FileVersion]) -> Result<(), BridgeError> {
        for version in versions {
            info!(file = %version.file().display(), "delete");
            self.delete_path(version.file())?;
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

    /// The backend is not told: it will see a delete plus an add.
    fn rename(&self, version: &dyn FileVersion, old: &Path) -> Result<(), BridgeError> {
        let new = version.file();
        info!(from = %old.display(), to = %new.display(), "rename");
        self.ctx.fs.rename(old, new).map_err(|e| BridgeError::io("rename", old, e))
    }
}
