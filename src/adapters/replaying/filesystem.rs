//! Replaying adapter for the `FileSystem` port.

use std::ffi::OsString;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::{extract_result, next_output};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;

/// Replays recorded filesystem operations from a cassette.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn next_bool(&self, method: &str) -> bool {
        let output = next_output(&self.replayer, "fs", method);
        output.as_bool().unwrap_or_else(|| panic!("fs::{method}: expected boolean output"))
    }
}

impl FileSystem for ReplayingFileSystem {
    fn exists(&self, _path: &Path) -> bool {
        self.next_bool("exists")
    }

    fn is_dir(&self, _path: &Path) -> bool {
        self.next_bool("is_dir")
    }

    fn list_dir(
        &self,
        _path: &Path,
    ) -> Result<Vec<OsString>, Box<dyn std::error::Error + Send + Sync>> {
        extract_result(&next_output(&self.replayer, "fs", "list_dir"), "fs::list_dir")
    }

    fn open(
        &self,
        _path: &Path,
    ) -> Result<Box<dyn Read + Send>, Box<dyn std::error::Error + Send + Sync>> {
        let content: Vec<u8> = extract_result(&next_output(&self.replayer, "fs", "open"), "fs::open")?;
        Ok(Box::new(Cursor::new(content)))
    }

    fn make_file(
        &self,
        _path: &Path,
        contents: &mut dyn Read,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        // The caller's stream is still consumed, as a real write would.
        std::io::copy(contents, &mut std::io::sink())?;
        extract_result(&next_output(&self.replayer, "fs", "make_file"), "fs::make_file")
    }

    fn make_dir(&self, _path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        extract_result(&next_output(&self.replayer, "fs", "make_dir"), "fs::make_dir")
    }

    fn last_modified(
        &self,
        _path: &Path,
    ) -> Result<DateTime<Utc>, Box<dyn std::error::Error + Send + Sync>> {
        extract_result(&next_output(&self.replayer, "fs", "last_modified"), "fs::last_modified")
    }

    fn delete(&self, _path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        extract_result(&next_output(&self.replayer, "fs", "delete"), "fs::delete")
    }

    fn rename(
        &self,
        _from: &Path,
        _to: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        extract_result(&next_output(&self.replayer, "fs", "rename"), "fs::rename")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use serde_json::json;

    fn make_replayer(interactions: Vec<(&str, serde_json::Value)>) -> CassetteReplayer {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            workspace: "/srv/wiki".into(),
            interactions: interactions
                .into_iter()
                .zip(0u64..)
                .map(|((method, output), seq)| Interaction {
                    seq,
                    port: "fs".into(),
                    method: method.into(),
                    input: json!({}),
                    output,
                })
                .collect(),
        };
        CassetteReplayer::new(&cassette)
    }

    #[test]
    fn replays_open_content() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![("open", json!({"ok": b"page text".to_vec()}))]));
        let mut text = String::new();
        fs.open(Path::new("/wiki/FrontPage/content.txt"))
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "page text");
    }

    #[test]
    fn replays_last_modified_and_exists() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![
            ("exists", json!(true)),
            ("last_modified", json!({"ok": "2024-03-01T08:15:00Z"})),
        ]));
        assert!(fs.exists(Path::new("/wiki/FrontPage")));
        let mtime = fs.last_modified(Path::new("/wiki/FrontPage")).unwrap();
        assert_eq!(mtime.to_rfc3339(), "2024-03-01T08:15:00+00:00");
    }

    #[test]
    fn replays_recorded_errors() {
        let fs = ReplayingFileSystem::new(make_replayer(vec![
            ("make_dir", json!({"err": "permission denied"})),
            ("make_file", json!({"ok": 4})),
        ]));
        let err = fs.make_dir(Path::new("/readonly")).unwrap_err();
        assert!(err.to_string().contains("permission denied"));
        assert_eq!(fs.make_file(Path::new("/x"), &mut "abcd".as_bytes()).unwrap(), 4);
    }
}
