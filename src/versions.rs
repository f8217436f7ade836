//! The host-facing versioning contract.
//!
//! A wiki host hands the controller [`FileVersion`]s when pages are saved,
//! removed or moved, and reads [`VersionInfo`] records back. Any backend
//! (the TFVC command line, or none at all) implements [`VersionsController`].

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::BridgeError;
use crate::ports::FileSystem;

/// One requested or observed state of a single file.
pub trait FileVersion {
    /// Path of the file this version describes.
    fn file(&self) -> &Path;

    /// Opens the content. The stream is released when the returned box is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be opened.
    fn content(&self) -> Result<Box<dyn Read + '_>, Box<dyn std::error::Error + Send + Sync>>;

    /// Who produced this version. May be empty.
    fn author(&self) -> &str;

    /// When this version was last modified.
    fn last_modification_time(&self) -> DateTime<Utc>;
}

/// A version supplied by the host, holding its content in memory.
#[derive(Debug, Clone)]
pub struct PageVersion {
    file: PathBuf,
    content: Vec<u8>,
    author: String,
    modified: DateTime<Utc>,
}

impl PageVersion {
    /// Creates a version of `file` with the given content.
    pub fn new(
        file: impl Into<PathBuf>,
        content: impl Into<Vec<u8>>,
        author: impl Into<String>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self { file: file.into(), content: content.into(), author: author.into(), modified }
    }

    /// Creates a content-less version, as used for directories.
    pub fn directory(
        path: impl Into<PathBuf>,
        author: impl Into<String>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self::new(path, Vec::new(), author, modified)
    }
}

impl FileVersion for PageVersion {
    fn file(&self) -> &Path {
        &self.file
    }

    fn content(&self) -> Result<Box<dyn Read + '_>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Box::new(self.content.as_slice()))
    }

    fn author(&self) -> &str {
        &self.author
    }

    fn last_modification_time(&self) -> DateTime<Utc> {
        self.modified
    }
}

/// A version describing a file as it currently exists on disk.
///
/// Content and modification time are read lazily through the filesystem port.
pub struct RevisionFileVersion<'a> {
    file: PathBuf,
    author: String,
    fs: &'a dyn FileSystem,
}

impl fmt::Debug for RevisionFileVersion<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevisionFileVersion")
            .field("file", &self.file)
            .field("author", &self.author)
            .finish_non_exhaustive()
    }
}

impl FileVersion for RevisionFileVersion<'_> {
    fn file(&self) -> &Path {
        &self.file
    }

    fn content(&self) -> Result<Box<dyn Read + '_>, Box<dyn std::error::Error + Send + Sync>> {
        self.fs.open(&self.file).map(|reader| reader as Box<dyn Read + '_>)
    }

    fn author(&self) -> &str {
        &self.author
    }

    /// Falls back to the epoch when the file has vanished since the lookup.
    fn last_modification_time(&self) -> DateTime<Utc> {
        self.fs.last_modified(&self.file).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Describes each file in `files` that exists, in input order, with an empty author.
#[must_use]
pub fn existing_revisions<'a>(
    fs: &'a dyn FileSystem,
    files: &[&Path],
) -> Vec<RevisionFileVersion<'a>> {
    files
        .iter()
        .filter(|file| fs.exists(file))
        .map(|file| RevisionFileVersion { file: file.to_path_buf(), author: String::new(), fs })
        .collect()
}

/// Record of a completed write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    /// Author of the version.
    pub author: String,
    /// Modification time of the version.
    pub timestamp: DateTime<Utc>,
}

impl VersionInfo {
    /// Creates a version record.
    pub fn new(author: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self { author: author.into(), timestamp }
    }

    /// Builds the record for a batch: the first version speaks for all of them.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::EmptyBatch`] when `versions` is empty.
    pub fn of_first(versions: &[&dyn FileVersion]) -> Result<Self, BridgeError> {
        let first = versions.first().ok_or(BridgeError::EmptyBatch)?;
        Ok(Self::new(first.author(), first.last_modification_time()))
    }

    /// Version name derived from the timestamp (`yyyyMMddHHmmss`).
    #[must_use]
    pub fn name(&self) -> String {
        self.timestamp.format("%Y%m%d%H%M%S").to_string()
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.author.is_empty() {
            write!(f, "{}", self.name())
        } else {
            write!(f, "{} by {}", self.name(), self.author)
        }
    }
}

/// The versioning operations a wiki host requires from a backend.
pub trait VersionsController {
    /// Records how many versions the host would like to keep.
    fn set_history_depth(&mut self, depth: u32);

    /// Describes each file in `files` that currently exists.
    fn revision_data(&self, label: Option<&str>, files: &[&Path]) -> Vec<RevisionFileVersion<'_>>;

    /// Version history of `files`.
    fn history(&self, files: &[&Path]) -> Vec<VersionInfo>;

    /// Writes every version to disk and registers it with the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if content cannot be read or written, or if
    /// `versions` is empty.
    fn make_version(&self, versions: &[&dyn FileVersion]) -> Result<VersionInfo, BridgeError>;

    /// Removes every version's file (recursively for directories).
    ///
    /// # Errors
    ///
    /// Returns an error only where the implementation promotes backend failures.
    fn delete(&self, versions: &[&dyn FileVersion]) -> Result<(), BridgeError>;

    /// Ensures a directory exists and is registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or inspected.
    fn add_directory(&self, dir: &dyn FileVersion) -> Result<VersionInfo, BridgeError>;

    /// Moves `old` to the version's file.
    ///
    /// # Errors
    ///
    /// Returns an error if the rename fails.
    fn rename(&self, version: &dyn FileVersion, old: &Path) -> Result<(), BridgeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::LiveFileSystem;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, 15, 0).unwrap()
    }

    #[test]
    fn page_version_content_is_readable_twice() {
        let version = PageVersion::new("/wiki/FrontPage/content.txt", "!1 Hello", "ann", at(8));
        for _ in 0..2 {
            let mut text = String::new();
            version.content().unwrap().read_to_string(&mut text).unwrap();
            assert_eq!(text, "!1 Hello");
        }
    }

    #[test]
    fn version_info_of_first_ignores_the_rest() {
        let a = PageVersion::new("a", "", "ann", at(8));
        let b = PageVersion::new("b", "", "bob", at(9));
        let info = VersionInfo::of_first(&[&a, &b]).unwrap();
        assert_eq!(info, VersionInfo::new("ann", at(8)));
    }

    #[test]
    fn version_info_of_empty_batch_fails() {
        assert!(matches!(VersionInfo::of_first(&[]), Err(BridgeError::EmptyBatch)));
    }

    #[test]
    fn version_info_display() {
        assert_eq!(VersionInfo::new("ann", at(8)).to_string(), "20240301081500 by ann");
        assert_eq!(VersionInfo::new("", at(8)).to_string(), "20240301081500");
    }

    #[test]
    fn existing_revisions_skips_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("present.txt");
        std::fs::write(&present, "here").unwrap();
        let missing = dir.path().join("missing.txt");

        let fs = LiveFileSystem;
        let found = existing_revisions(&fs, &[&missing, &present, &missing]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].file(), present);
        assert_eq!(found[0].author(), "");

        let mut text = String::new();
        found[0].content().unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "here");
        assert!(found[0].last_modification_time() > DateTime::<Utc>::UNIX_EPOCH);
    }
}
