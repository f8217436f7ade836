//! Recording adapter for the `FileSystem` port.

use std::ffi::OsString;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{record_interaction, record_result};
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::FileSystem;

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PathInput {
    path: String,
}

impl PathInput {
    fn new(path: &Path) -> Self {
        Self { path: path.display().to_string() }
    }
}

#[derive(Serialize)]
struct RenameInput {
    from: String,
    to: String,
}

impl FileSystem for RecordingFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let result = self.inner.exists(path);
        record_interaction(&self.recorder, "fs", "exists", &PathInput::new(path), &result);
        result
    }

    fn is_dir(&self, path: &Path) -> bool {
        let result = self.inner.is_dir(path);
        record_interaction(&self.recorder, "fs", "is_dir", &PathInput::new(path), &result);
        result
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<OsString>, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.list_dir(path);
        record_result(&self.recorder, "fs", "list_dir", &PathInput::new(path), &result);
        result
    }

    fn open(
        &self,
        path: &Path,
    ) -> Result<Box<dyn Read + Send>, Box<dyn std::error::Error + Send + Sync>> {
        // Buffer the content so the cassette can carry it for replay.
        let result = self.inner.open(path).and_then(|mut reader| {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf)?;
            Ok(buf)
        });
        // Stored as raw bytes; page attachments need not be UTF-8.
        record_result(&self.recorder, "fs", "open", &PathInput::new(path), &result);
        result.map(|buf| Box::new(Cursor::new(buf)) as Box<dyn Read + Send>)
    }

    fn make_file(
        &self,
        path: &Path,
        contents: &mut dyn Read,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.make_file(path, contents);
        record_result(&self.recorder, "fs", "make_file", &PathInput::new(path), &result);
        result
    }

    fn make_dir(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.make_dir(path);
        record_result(&self.recorder, "fs", "make_dir", &PathInput::new(path), &result);
        result
    }

    fn last_modified(
        &self,
        path: &Path,
    ) -> Result<DateTime<Utc>, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.last_modified(path);
        record_result(&self.recorder, "fs", "last_modified", &PathInput::new(path), &result);
        result
    }

    fn delete(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.delete(path);
        record_result(&self.recorder, "fs", "delete", &PathInput::new(path), &result);
        result
    }

    fn rename(
        &self,
        from: &Path,
        to: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.rename(from, to);
        let input = RenameInput { from: from.display().to_string(), to: to.display().to_string() };
        record_result(&self.recorder, "fs", "rename", &input, &result);
        result
    }
}
