//! Zip archive data source.
//!
//! The archive's directory tree is built once, when the archive is opened.
//! Entry data is decompressed on every `open_read`. Archives are read-only:
//! write, append and delete fail with [`io::ErrorKind::ReadOnlyFilesystem`].

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Cursor, Read, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use zip::ZipArchive;

use crate::{Container, CreateHint, DataSource, Item, Leaf};

type Archive = Arc<Mutex<ZipArchive<Cursor<Arc<[u8]>>>>>;

fn read_only(what: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::ReadOnlyFilesystem,
        format!("zip archives are read-only: cannot {what}"),
    )
}

/// A directory inside a zip archive. The archive root is one too.
///
/// Directories that have no entry of their own but contain files are
/// still present in the tree.
#[derive(Clone)]
pub struct ZipDir {
    children: Arc<BTreeMap<String, Item>>,
}

impl ZipDir {
    /// Index an archive held in memory.
    ///
    /// # Errors
    ///
    /// - The bytes are not a readable zip archive
    /// - An entry is nested below a file entry ([`io::ErrorKind::InvalidData`])
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> io::Result<Self> {
        let bytes: Arc<[u8]> = bytes.into();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(io::Error::other)?;

        let mut root = Tree::default();
        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index).map_err(io::Error::other)?;
            let name = entry.name().to_owned();
            let kind = if entry.is_dir() {
                Entry::Dir
            } else {
                Entry::File {
                    index,
                    size: entry.size(),
                }
            };
            drop(entry);
            root.insert(&name, kind)?;
        }

        tracing::debug!(entries = archive.len(), "indexed zip archive");
        let archive = Arc::new(Mutex::new(archive));
        Ok(root.into_dir(&archive))
    }

    /// Read and index an archive from the host filesystem.
    ///
    /// # Errors
    ///
    /// Any error from reading the file, plus those of [`from_bytes`](Self::from_bytes).
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        Self::from_bytes(bytes)
    }
}

impl Container for ZipDir {
    fn child(&self, name: &str, _create: CreateHint) -> Option<Item> {
        self.children.get(name).cloned()
    }

    fn list(&self) -> Vec<String> {
        self.children.keys().cloned().collect()
    }

    fn delete(&self, _name: &str) -> io::Result<()> {
        Err(read_only("delete"))
    }
}

impl DataSource for ZipDir {
    fn as_container(&self) -> Option<&dyn Container> {
        Some(self)
    }
}

/// A file entry inside a zip archive.
pub struct ZipFile {
    archive: Archive,
    index: usize,
    size: u64,
}

impl Leaf for ZipFile {
    fn size(&self) -> Option<u64> {
        Some(self.size)
    }

    fn open_read(&self) -> io::Result<Box<dyn Read + Send>> {
        let mut archive = self.archive.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entry = archive.by_index(self.index).map_err(io::Error::other)?;
        let mut data = Vec::with_capacity(usize::try_from(self.size).unwrap_or(0));
        entry.read_to_end(&mut data)?;
        Ok(Box::new(Cursor::new(data)))
    }

    fn open_write(&self) -> io::Result<Box<dyn Write + Send>> {
        Err(read_only("write"))
    }

    fn open_append(&self) -> io::Result<Box<dyn Write + Send>> {
        Err(read_only("append"))
    }
}

impl DataSource for ZipFile {
    fn as_leaf(&self) -> Option<&dyn Leaf> {
        Some(self)
    }
}

enum Entry {
    Dir,
    File { index: usize, size: u64 },
}

#[derive(Default)]
struct Tree {
    dirs: BTreeMap<String, Tree>,
    files: BTreeMap<String, (usize, u64)>,
}

impl Tree {
    fn insert(&mut self, name: &str, entry: Entry) -> io::Result<()> {
        let segments: Vec<&str> = name
            .split(['/', '\\'])
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        let Some((last, parents)) = segments.split_last() else {
            return Ok(());
        };

        let mut node = self;
        for segment in parents {
            node = node.dir(segment, name)?;
        }
        match entry {
            Entry::Dir => {
                node.dir(last, name)?;
            }
            Entry::File { index, size } => {
                if node.dirs.contains_key(*last) {
                    return Err(conflict(name));
                }
                node.files.insert((*last).to_owned(), (index, size));
            }
        }
        Ok(())
    }

    fn dir(&mut self, segment: &str, entry: &str) -> io::Result<&mut Tree> {
        if self.files.contains_key(segment) {
            return Err(conflict(entry));
        }
        Ok(self.dirs.entry(segment.to_owned()).or_default())
    }

    fn into_dir(self, archive: &Archive) -> ZipDir {
        let mut children: BTreeMap<String, Item> = BTreeMap::new();
        for (name, tree) in self.dirs {
            children.insert(name, Arc::new(tree.into_dir(archive)));
        }
        for (name, (index, size)) in self.files {
            let file = ZipFile {
                archive: Arc::clone(archive),
                index,
                size,
            };
            children.insert(name, Arc::new(file));
        }
        ZipDir {
            children: Arc::new(children),
        }
    }
}

fn conflict(entry: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("zip entry {entry:?} conflicts with a file entry"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataSourceExt;
    use zip::CompressionMethod;
    use zip::write::{SimpleFileOptions, ZipWriter};

    fn archive(entries: &[(&str, Option<&[u8]>)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, data) in entries {
            match data {
                Some(data) => {
                    writer.start_file(*name, options).unwrap();
                    writer.write_all(data).unwrap();
                }
                None => writer.add_directory(*name, options).unwrap(),
            }
        }
        writer.finish().unwrap().into_inner()
    }

    fn read(item: &Item) -> Vec<u8> {
        let mut out = Vec::new();
        item.as_leaf()
            .unwrap()
            .open_read()
            .unwrap()
            .read_to_end(&mut out)
            .unwrap();
        out
    }

    #[test]
    fn builds_tree_with_implicit_directories() {
        let bytes = archive(&[("top.txt", Some(b"t")), ("a/b/deep.txt", Some(b"deep"))]);
        let root = ZipDir::from_bytes(bytes).unwrap();

        assert_eq!(root.list(), ["a", "top.txt"]);
        let a = root.child("a", CreateHint::None).unwrap();
        assert!(a.is_container());
        let b = a.as_container().unwrap().child("b", CreateHint::None).unwrap();
        let deep = b.as_container().unwrap().child("deep.txt", CreateHint::None).unwrap();
        assert_eq!(read(&deep), b"deep");
        assert_eq!(deep.as_leaf().unwrap().size(), Some(4));
    }

    #[test]
    fn explicit_empty_directory_is_listed() {
        let bytes = archive(&[("empty/", None)]);
        let root = ZipDir::from_bytes(bytes).unwrap();
        let empty = root.child("empty", CreateHint::None).unwrap();
        assert!(empty.as_container().unwrap().list().is_empty());
    }

    #[test]
    fn create_hints_are_ignored() {
        let root = ZipDir::from_bytes(archive(&[("f", Some(b""))])).unwrap();
        assert!(root.child("new", CreateHint::Leaf).is_none());
        assert!(root.child("new", CreateHint::Container).is_none());
    }

    #[test]
    fn mutation_is_rejected() {
        let root = ZipDir::from_bytes(archive(&[("f", Some(b"x"))])).unwrap();
        let file = root.child("f", CreateHint::None).unwrap();
        let leaf = file.as_leaf().unwrap();

        assert_eq!(
            leaf.open_write().err().unwrap().kind(),
            io::ErrorKind::ReadOnlyFilesystem
        );
        assert_eq!(
            leaf.open_append().err().unwrap().kind(),
            io::ErrorKind::ReadOnlyFilesystem
        );
        assert_eq!(
            root.delete("f").unwrap_err().kind(),
            io::ErrorKind::ReadOnlyFilesystem
        );
        assert_eq!(read(&file), b"x");
    }

    #[test]
    fn file_below_file_is_invalid() {
        let bytes = archive(&[("a", Some(b"")), ("a/b", Some(b""))]);
        let err = ZipDir::from_bytes(bytes).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(ZipDir::from_bytes(b"not a zip".to_vec()).is_err());
    }

    #[test]
    fn open_reads_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("data.zip");
        fs::write(&path, archive(&[("x.txt", Some(b"x"))])).unwrap();

        let root = ZipDir::open(&path).unwrap();
        assert_eq!(root.list(), ["x.txt"]);
    }
}
