//! Service context bundling the port trait objects.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::adapters::live::{LiveFileSystem, LiveShellExecutor};
use crate::adapters::recording::{RecordingFileSystem, RecordingShellExecutor};
use crate::adapters::replaying::{ReplayingFileSystem, ReplayingShellExecutor};
use crate::cassette::config::CassetteConfig;
use crate::cassette::session::RecordingSession;
use crate::ports::filesystem::FileSystem;
use crate::ports::shell::{CommandLine, ShellExecutor, ShellOutput};

/// Bundles the port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying); controllers only ever see the traits.
pub struct ServiceContext {
    /// Filesystem for the local half of each operation.
    pub fs: Box<dyn FileSystem>,
    /// Executor for backend commands.
    pub shell: Box<dyn ShellExecutor>,
}

impl ServiceContext {
    /// Creates a live context with real disk and process adapters.
    #[must_use]
    pub fn live() -> Self {
        Self { fs: Box::new(LiveFileSystem), shell: Box::new(LiveShellExecutor) }
    }

    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn from_parts(fs: Box<dyn FileSystem>, shell: Box<dyn ShellExecutor>) -> Self {
        Self { fs, shell }
    }

    /// Creates a live context whose interactions are recorded into
    /// per-port cassettes under `dir`.
    ///
    /// Drop the context before calling `RecordingSession::finish`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette directory cannot be created.
    pub fn recording_at(dir: PathBuf) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new_in(dir)?;
        let ctx = Self {
            fs: Box::new(RecordingFileSystem::new(
                Box::new(LiveFileSystem),
                Arc::clone(&session.fs),
            )),
            shell: Box::new(RecordingShellExecutor::new(
                Box::new(LiveShellExecutor),
                Arc::clone(&session.shell),
            )),
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette panic with a clear message when called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(PanickingFileSystem),
            },
            shell: match replayers.shell {
                Some(r) => Box::new(ReplayingShellExecutor::new(r)),
                None => Box::new(PanickingShellExecutor),
            },
        })
    }
}

// --- Panicking adapters for unconfigured ports ---

const FS_UNCONFIGURED: &str =
    "FileSystem port not configured in CassetteConfig: no cassette loaded for fs";

struct PanickingFileSystem;
impl FileSystem for PanickingFileSystem {
    fn exists(&self, _path: &Path) -> bool {
        panic!("{FS_UNCONFIGURED}");
    }
    fn is_dir(&self, _path: &Path) -> bool {
        panic!("{FS_UNCONFIGURED}");
    }
    fn list_dir(
        &self,
        _path: &Path,
    ) -> Result<Vec<OsString>, Box<dyn std::error::Error + Send + Sync>> {
        panic!("{FS_UNCONFIGURED}");
    }
    fn open(
        &self,
        _path: &Path,
    ) -> Result<Box<dyn std::io::Read + Send>, Box<dyn std::error::Error + Send + Sync>> {
        panic!("{FS_UNCONFIGURED}");
    }
    fn make_file(
        &self,
        _path: &Path,
        _contents: &mut dyn std::io::Read,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        panic!("{FS_UNCONFIGURED}");
    }
    fn make_dir(&self, _path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("{FS_UNCONFIGURED}");
    }
    fn last_modified(
        &self,
        _path: &Path,
    ) -> Result<chrono::DateTime<chrono::Utc>, Box<dyn std::error::Error + Send + Sync>> {
        panic!("{FS_UNCONFIGURED}");
    }
    fn delete(&self, _path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("{FS_UNCONFIGURED}");
    }
    fn rename(
        &self,
        _from: &Path,
        _to: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        panic!("{FS_UNCONFIGURED}");
    }
}

struct PanickingShellExecutor;
impl ShellExecutor for PanickingShellExecutor {
    fn run(
        &self,
        _command: &CommandLine,
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        panic!("ShellExecutor port not configured in CassetteConfig: no cassette loaded for shell");
    }
}
