//! OS directory data source.
//!
//! `NativeDir` and `NativeFile` are thin handles around host paths. They hold
//! no state; every call goes to `std::fs`.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{Container, CreateHint, DataSource, Item, Leaf};

/// A host directory.
///
/// Creation hints hand back handles to paths that do not exist yet; opening
/// such a file for writing creates it, along with any missing parent
/// directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeDir {
    path: PathBuf,
}

impl NativeDir {
    /// Wrap a host directory path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The wrapped host path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Container for NativeDir {
    fn child(&self, name: &str, create: CreateHint) -> Option<Item> {
        let path = self.path.join(name);
        let item: Item = match (fs::metadata(&path), create) {
            (Ok(meta), _) if meta.is_dir() => Arc::new(NativeDir::new(path)),
            (Ok(_), _) => Arc::new(NativeFile::new(path)),
            (Err(_), CreateHint::Container) => Arc::new(NativeDir::new(path)),
            (Err(_), CreateHint::Leaf) => Arc::new(NativeFile::new(path)),
            (Err(_), CreateHint::None) => return None,
        };
        Some(item)
    }

    fn list(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.path) {
            Ok(entries) => entries,
            Err(error) => {
                tracing::debug!(path = %self.path.display(), %error, "cannot list directory");
                return Vec::new();
            }
        };
        entries
            .filter_map(Result::ok)
            .filter_map(|entry| match entry.file_name().into_string() {
                Ok(name) => Some(name),
                Err(name) => {
                    tracing::debug!(path = %self.path.display(), ?name, "skipping non-UTF-8 entry");
                    None
                }
            })
            .collect()
    }

    fn delete(&self, name: &str) -> io::Result<()> {
        let path = self.path.join(name);
        if fs::symlink_metadata(&path)?.is_dir() {
            fs::remove_dir(path)
        } else {
            fs::remove_file(path)
        }
    }
}

impl DataSource for NativeDir {
    fn as_container(&self) -> Option<&dyn Container> {
        Some(self)
    }
}

/// A host file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeFile {
    path: PathBuf,
}

impl NativeFile {
    /// Wrap a host file path. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The wrapped host path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> io::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

impl Leaf for NativeFile {
    fn size(&self) -> Option<u64> {
        fs::metadata(&self.path).ok().map(|meta| meta.len())
    }

    fn open_read(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(File::open(&self.path)?))
    }

    fn open_write(&self) -> io::Result<Box<dyn Write + Send>> {
        self.ensure_parent()?;
        Ok(Box::new(File::create(&self.path)?))
    }

    fn open_append(&self) -> io::Result<Box<dyn Write + Send>> {
        self.ensure_parent()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        Ok(Box::new(file))
    }
}

impl DataSource for NativeFile {
    fn as_leaf(&self) -> Option<&dyn Leaf> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataSourceExt;

    #[test]
    fn child_probes_host_type() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("f.txt"), b"hi").unwrap();

        let dir = NativeDir::new(tmp.path());
        assert!(dir.child("sub", CreateHint::None).unwrap().is_container());
        assert!(dir.child("f.txt", CreateHint::None).unwrap().is_leaf());
        assert!(dir.child("missing", CreateHint::None).is_none());
    }

    #[test]
    fn hints_return_handles_without_touching_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = NativeDir::new(tmp.path());

        assert!(dir.child("d", CreateHint::Container).unwrap().is_container());
        assert!(dir.child("f", CreateHint::Leaf).unwrap().is_leaf());
        assert!(dir.list().is_empty());
    }

    #[test]
    fn write_creates_parents() {
        let tmp = tempfile::tempdir().unwrap();
        let file = NativeFile::new(tmp.path().join("a/b/c.txt"));

        file.open_write().unwrap().write_all(b"abc").unwrap();
        assert_eq!(fs::read(tmp.path().join("a/b/c.txt")).unwrap(), b"abc");
        assert_eq!(file.size(), Some(3));
    }

    #[test]
    fn append_keeps_existing_content() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("log.txt");
        fs::write(&path, b"one\n").unwrap();

        let file = NativeFile::new(&path);
        file.open_append().unwrap().write_all(b"two\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn write_truncates() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("f");
        fs::write(&path, b"long old content").unwrap();

        NativeFile::new(&path)
            .open_write()
            .unwrap()
            .write_all(b"new")
            .unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn read_missing_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = NativeFile::new(tmp.path().join("nope")).open_read().err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(NativeFile::new(tmp.path().join("nope")).size(), None);
    }

    #[test]
    fn delete_removes_files_and_empty_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("f"), b"").unwrap();
        fs::create_dir(tmp.path().join("d")).unwrap();

        let dir = NativeDir::new(tmp.path());
        dir.delete("f").unwrap();
        dir.delete("d").unwrap();
        assert!(dir.list().is_empty());
        assert_eq!(dir.delete("f").unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn size_follows_symlinks() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("target.bin");
        fs::write(&target, vec![0u8; 100]).unwrap();
        std::os::unix::fs::symlink(&target, tmp.path().join("link")).unwrap();

        let dir = NativeDir::new(tmp.path());
        let link = dir.child("link", CreateHint::None).unwrap();
        assert_eq!(link.as_leaf().unwrap().size(), Some(100));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn list_skips_names_that_are_not_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("plain.txt"), b"").unwrap();
        fs::write(tmp.path().join(OsStr::from_bytes(b"bad\xff")), b"").unwrap();

        let dir = NativeDir::new(tmp.path());
        assert_eq!(dir.list(), ["plain.txt"]);
        assert!(dir.child("plain.txt", CreateHint::None).is_some());
    }

    #[test]
    fn list_of_missing_directory_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(NativeDir::new(tmp.path().join("gone")).list().is_empty());
    }
}
