//! Live filesystem adapter using `std::fs`.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<OsString>, Box<dyn std::error::Error + Send + Sync>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            entries.push(entry?.file_name());
        }
        entries.sort();
        Ok(entries)
    }

    fn open(
        &self,
        path: &Path,
    ) -> Result<Box<dyn Read + Send>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }

    fn make_file(
        &self,
        path: &Path,
        contents: &mut dyn Read,
    ) -> Result<u64, Box<dyn std::error::Error + Send + Sync>> {
        let mut file = File::create(path)?;
        Ok(std::io::copy(contents, &mut file)?)
    }

    fn make_dir(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::create_dir_all(path)?)
    }

    fn last_modified(
        &self,
        path: &Path,
    ) -> Result<DateTime<Utc>, Box<dyn std::error::Error + Send + Sync>> {
        let modified = std::fs::metadata(path)?.modified()?;
        Ok(DateTime::<Utc>::from(modified))
    }

    fn delete(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if path.is_dir() {
            std::fs::remove_dir_all(path)?;
        } else {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    fn rename(
        &self,
        from: &Path,
        to: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::rename(from, to)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_file_then_open_reads_back_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content.txt");
        let fs = LiveFileSystem;

        let written = fs.make_file(&path, &mut "!1 Front Page".as_bytes()).unwrap();
        assert_eq!(written, 13);

        let mut text = String::new();
        fs.open(&path).unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "!1 Front Page");
        assert!(fs.last_modified(&path).is_ok());
    }

    #[test]
    fn list_dir_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LiveFileSystem;
        fs.make_dir(&dir.path().join("b")).unwrap();
        fs.make_file(&dir.path().join("a.txt"), &mut "".as_bytes()).unwrap();

        assert_eq!(fs.list_dir(dir.path()).unwrap(), vec![OsString::from("a.txt"), OsString::from("b")]);
    }

    #[test]
    fn delete_removes_directories_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LiveFileSystem;
        let nested = dir.path().join("Page/Child");
        fs.make_dir(&nested).unwrap();
        fs.make_file(&nested.join("content.txt"), &mut "x".as_bytes()).unwrap();

        fs.delete(&dir.path().join("Page")).unwrap();
        assert!(!fs.exists(&dir.path().join("Page")));
    }

    #[test]
    fn rename_moves_file() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LiveFileSystem;
        let from = dir.path().join("old.txt");
        let to = dir.path().join("new.txt");
        fs.make_file(&from, &mut "x".as_bytes()).unwrap();

        fs.rename(&from, &to).unwrap();
        assert!(!fs.exists(&from));
        assert!(fs.exists(&to));
    }

    #[cfg(unix)]
    #[test]
    fn list_dir_keeps_names_that_are_not_utf8() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let fs = LiveFileSystem;
        let name = std::ffi::OsStr::from_bytes(b"caf\xe9.txt");
        fs.make_file(&dir.path().join(name), &mut "x".as_bytes()).unwrap();

        assert_eq!(fs.list_dir(dir.path()).unwrap(), vec![name.to_os_string()]);
    }
}
