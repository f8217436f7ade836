//! Filesystem port for the local half of every versioning operation.

use std::ffi::OsString;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};

/// Provides the filesystem primitives the versions controllers need.
///
/// Abstracting the filesystem allows deterministic replay and lets tests
/// observe exactly which local mutations an operation performed.
pub trait FileSystem: Send + Sync {
    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Lists the entry names of a directory, sorted. Names need not be UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<OsString>, Box<dyn std::error::Error + Send + Sync>>;

    /// Opens a file for reading its content.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be opened.
    fn open(
        &self,
        path: &Path,
    ) -> Result<Box<dyn Read + Send>, Box<dyn std::error::Error + Send + Sync>>;

    /// Creates or overwrites a file with everything read from `contents`.
    ///
    /// The parent directory must already exist.
    ///
    /// # Errors
    ///
    /// Returns an error if reading `contents` or writing the file fails.
    fn make_file(
        &self,
        path: &Path,
        contents: &mut dyn Read,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>>;

    /// Creates a directory and any missing ancestors.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn make_dir(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Returns the last modification time of a path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or has no mtime.
    fn last_modified(
        &self,
        path: &Path,
    ) -> Result<DateTime<Utc>, Box<dyn std::error::Error + Send + Sync>>;

    /// Deletes a file, or a directory together with its contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be removed.
    fn delete(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Moves `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if the rename fails.
    fn rename(&self, from: &Path, to: &Path)
        -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
