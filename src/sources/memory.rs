//! In-memory data source.
//!
//! `MemoryDir` and `MemoryFile` form a tree that lives entirely in memory and
//! supports every capability, including creation and deletion.

use std::collections::{BTreeMap, HashMap};
use std::io::{self, Cursor, Read, Write};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use crate::{Container, CreateHint, DataSource, Item, Leaf};

type Buffer = Arc<RwLock<Vec<u8>>>;

#[derive(Default)]
struct DirState {
    children: BTreeMap<String, Item>,
    /// Buffers of leaves handed out for creation but not written yet.
    pending: HashMap<String, Weak<RwLock<Vec<u8>>>>,
}

type State = Arc<RwLock<DirState>>;

/// An in-memory directory.
///
/// Children list in lexical order.
///
/// A [`CreateHint::Container`] creates the missing directory immediately. A
/// [`CreateHint::Leaf`] hands back a pending file that joins this directory
/// on its first `open_write` or `open_append`. Pending files for one name
/// share a buffer, so every handle writes to the file that gets listed.
///
/// # Example
///
/// ```rust
/// use mountfs::{MemoryDir, Vfs};
/// use std::sync::Arc;
///
/// let root = Arc::new(MemoryDir::new());
/// root.add_dir("docs").add_file("readme.txt", b"hello".to_vec());
///
/// let mut vfs = Vfs::new();
/// vfs.mount("", root, true).unwrap();
/// assert_eq!(vfs.read_to_string("docs/readme.txt").unwrap(), "hello");
/// ```
#[derive(Clone, Default)]
pub struct MemoryDir {
    state: State,
}

impl MemoryDir {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) a file child with the given content.
    pub fn add_file(&self, name: impl Into<String>, content: Vec<u8>) -> Arc<MemoryFile> {
        let file = Arc::new(MemoryFile::new(content));
        self.insert(name.into(), Arc::clone(&file) as Item);
        file
    }

    /// Insert (or replace) an empty directory child.
    pub fn add_dir(&self, name: impl Into<String>) -> Arc<MemoryDir> {
        let dir = Arc::new(MemoryDir::new());
        self.insert(name.into(), Arc::clone(&dir) as Item);
        dir
    }

    /// Insert (or replace) any item as a child.
    pub fn insert(&self, name: impl Into<String>, item: Item) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .children
            .insert(name.into(), item);
    }

    fn pending_leaf(&self, name: &str) -> Item {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(item) = state.children.get(name) {
            return Arc::clone(item);
        }
        let data = match state.pending.get(name).and_then(Weak::upgrade) {
            Some(data) => data,
            None => {
                let data = Buffer::default();
                state.pending.insert(name.to_owned(), Arc::downgrade(&data));
                data
            }
        };
        Arc::new(MemoryFile {
            data,
            pending: Some(Pending {
                parent: Arc::clone(&self.state),
                name: name.to_owned(),
            }),
        })
    }
}

impl Container for MemoryDir {
    fn child(&self, name: &str, create: CreateHint) -> Option<Item> {
        if let Some(item) = self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .children
            .get(name)
        {
            return Some(Arc::clone(item));
        }

        match create {
            CreateHint::None => None,
            CreateHint::Container => {
                let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
                let item = state
                    .children
                    .entry(name.to_owned())
                    .or_insert_with(|| Arc::new(MemoryDir::new()) as Item);
                Some(Arc::clone(item))
            }
            CreateHint::Leaf => Some(self.pending_leaf(name)),
        }
    }

    fn list(&self) -> Vec<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .children
            .keys()
            .cloned()
            .collect()
    }

    fn delete(&self, name: &str) -> io::Result<()> {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .children
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no child {name:?}")))
    }
}

impl DataSource for MemoryDir {
    fn as_container(&self) -> Option<&dyn Container> {
        Some(self)
    }
}

/// Where a pending file attaches itself once written.
struct Pending {
    parent: State,
    name: String,
}

/// An in-memory file.
///
/// Clones of the handle, and every stream opened from it, share one buffer.
pub struct MemoryFile {
    data: Buffer,
    pending: Option<Pending>,
}

impl MemoryFile {
    /// Create a file holding `content`.
    pub fn new(content: Vec<u8>) -> Self {
        Self {
            data: Arc::new(RwLock::new(content)),
            pending: None,
        }
    }

    /// Attach a pending file to its parent.
    ///
    /// The first handle of a shared buffer attaches it; later ones find it
    /// already attached. A child inserted under the same name in between
    /// makes this fail with `AlreadyExists`.
    fn materialize(&self) -> io::Result<()> {
        let Some(pending) = &self.pending else {
            return Ok(());
        };
        let mut state = pending
            .parent
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let ours = state
            .pending
            .get(&pending.name)
            .is_some_and(|weak| weak.as_ptr() == Arc::as_ptr(&self.data));
        if !ours {
            return Ok(());
        }
        state.pending.remove(&pending.name);

        if state.children.contains_key(&pending.name) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{:?} was created while this file was pending", pending.name),
            ));
        }
        let file = MemoryFile {
            data: Arc::clone(&self.data),
            pending: None,
        };
        state
            .children
            .insert(pending.name.clone(), Arc::new(file) as Item);
        Ok(())
    }

    fn writer(&self) -> Box<dyn Write + Send> {
        Box::new(MemoryWriter {
            data: Arc::clone(&self.data),
        })
    }
}

impl Leaf for MemoryFile {
    fn size(&self) -> Option<u64> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        Some(data.len() as u64)
    }

    fn open_read(&self) -> io::Result<Box<dyn Read + Send>> {
        let data = self.data.read().unwrap_or_else(PoisonError::into_inner);
        Ok(Box::new(Cursor::new(data.clone())))
    }

    fn open_write(&self) -> io::Result<Box<dyn Write + Send>> {
        self.materialize()?;
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        Ok(self.writer())
    }

    fn open_append(&self) -> io::Result<Box<dyn Write + Send>> {
        self.materialize()?;
        Ok(self.writer())
    }
}

impl DataSource for MemoryFile {
    fn as_leaf(&self) -> Option<&dyn Leaf> {
        Some(self)
    }
}

struct MemoryWriter {
    data: Buffer,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
