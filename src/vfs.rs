//! # Namespace Facade
//!
//! [`Vfs`] owns the mount table and exposes every user-facing operation on
//! top of resolution and the item capability traits.
//!
//! ## Error Policy
//!
//! Every error carries the path exactly as the caller passed it. Advisory
//! queries ([`exists`](Vfs::exists), [`is_container`](Vfs::is_container),
//! [`is_leaf`](Vfs::is_leaf), [`size`](Vfs::size) and the listings) never
//! fail; they answer `false`, `None` or an empty list instead.

use std::collections::HashSet;
use std::fmt;
use std::io::{Read, Write};

use crate::ext::DataSourceExt;
use crate::mount::MountTable;
use crate::{CreateHint, Item, MountInfo, VfsError, VfsPath, View};

/// A virtual filesystem: one namespace over any number of mounted items.
///
/// The namespace has a read half and a write half. Reads and listings run
/// against the read half; writes, appends and deletes against the write half.
/// A writable mount joins both halves, a read-only mount only the read half.
///
/// Items mounted at the same point are tried in mount order, and the first
/// one that works is used. Listings merge all of them.
///
/// There is no internal locking. Mutating the mount table needs `&mut self`;
/// share a `Vfs` across threads behind an `RwLock` if required.
///
/// # Example
///
/// ```rust
/// use mountfs::{MemoryDir, Vfs};
/// use std::sync::Arc;
///
/// let defaults = Arc::new(MemoryDir::new());
/// defaults.add_file("theme.cfg", b"dark".to_vec());
/// defaults.add_file("keys.cfg", b"vi".to_vec());
///
/// let mut vfs = Vfs::new();
/// // User settings first: read from and written to.
/// vfs.mount("settings", Arc::new(MemoryDir::new()), true).unwrap();
/// // Defaults second: read-only fallback.
/// vfs.mount("settings", defaults, false).unwrap();
///
/// vfs.write_all("settings/theme.cfg", b"light").unwrap();
/// assert_eq!(vfs.read_all("settings/theme.cfg").unwrap(), b"light");
/// assert_eq!(vfs.read_all("settings/keys.cfg").unwrap(), b"vi");
/// ```
#[derive(Clone, Default)]
pub struct Vfs {
    table: MountTable,
}

impl fmt::Debug for Vfs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vfs")
            .field("mounts", &self.table.infos())
            .finish()
    }
}

impl Vfs {
    /// Create an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Mount table
    // =========================================================================

    /// Mount `item` at `path`, for writing too if `writable`.
    ///
    /// Mounting several items at one path is allowed; they are tried in the
    /// order they were mounted.
    ///
    /// # Errors
    ///
    /// - [`VfsError::BadPath`] if the path is invalid
    /// - [`VfsError::BadAction`] if `item` is neither a container nor a leaf
    pub fn mount(&mut self, path: &str, item: Item, writable: bool) -> Result<(), VfsError> {
        let point = VfsPath::parse(path)?;
        self.table
            .mount(point, item, writable)
            .map_err(|e| e.with_path(path))
    }

    /// Unmount every item mounted at exactly `path` from the write half, and
    /// from the read half too if `from_read`.
    ///
    /// Unmounting a path with nothing mounted is not an error. Items already
    /// handed out stay usable.
    ///
    /// # Errors
    ///
    /// - [`VfsError::BadPath`] if the path is invalid
    pub fn unmount(&mut self, path: &str, from_read: bool) -> Result<(), VfsError> {
        let point = VfsPath::parse(path)?;
        self.table.unmount(&point, from_read);
        Ok(())
    }

    /// Replace the first item mounted at exactly `path` and return it.
    ///
    /// Only the first match in each half is replaced (the write half only if
    /// `writable`). Returns `Ok(None)` if nothing was mounted there; nothing is
    /// mounted in that case.
    ///
    /// # Errors
    ///
    /// - [`VfsError::BadPath`] if the path is invalid
    /// - [`VfsError::BadAction`] if `item` is neither a container nor a leaf
    pub fn swap_mount(
        &mut self,
        path: &str,
        item: Item,
        writable: bool,
    ) -> Result<Option<Item>, VfsError> {
        let point = VfsPath::parse(path)?;
        self.table
            .swap(&point, item, writable)
            .map_err(|e| e.with_path(path))
    }

    /// The read half's mounts in mount order.
    pub fn mounts(&self) -> Vec<MountInfo> {
        self.table.infos()
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// The first item at `path` in the given half.
    ///
    /// With `create`, containers on the way are told they may create missing
    /// children (containers for intermediate segments, a leaf for the last).
    ///
    /// # Errors
    ///
    /// - [`VfsError::BadPath`] if the path is invalid
    /// - [`VfsError::BadAction`] if the path is a mount-point subset with no item
    /// - [`VfsError::NotFound`] if nothing is there
    pub fn resolve(&self, path: &str, view: View, create: bool) -> Result<Item, VfsError> {
        let target = VfsPath::parse(path)?;
        self.table.resolve(&target, view, create, path)
    }

    /// Every item at `path` in the given half, in mount order.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    pub fn resolve_all(&self, path: &str, view: View, create: bool) -> Result<Vec<Item>, VfsError> {
        let target = VfsPath::parse(path)?;
        self.table.resolve_all(&target, view, create, path)
    }

    // =========================================================================
    // Advisory queries
    // =========================================================================

    /// `true` if an item or a mount-point subset is at `path`.
    ///
    /// A mount-point subset exists but cannot be read or written.
    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path, View::Read, false).is_ok() || self.is_mount_subset(path)
    }

    /// `true` if the first item at `path` is a container, or `path` is a
    /// mount-point subset.
    pub fn is_container(&self, path: &str) -> bool {
        match self.resolve(path, View::Read, false) {
            Ok(item) => item.is_container(),
            Err(_) => self.is_mount_subset(path),
        }
    }

    /// `true` if the first item at `path` is a leaf.
    pub fn is_leaf(&self, path: &str) -> bool {
        self.resolve(path, View::Read, false)
            .is_ok_and(|item| item.is_leaf())
    }

    /// `true` if mount points lie below `path`, making it listable.
    pub fn is_mount_subset(&self, path: &str) -> bool {
        VfsPath::parse(path).is_ok_and(|target| self.table.has_subset(&target, View::Read))
    }

    /// Size of the leaf at `path`.
    ///
    /// `None` if nothing is there, the first item is not a leaf, or the
    /// backend cannot tell.
    pub fn size(&self, path: &str) -> Option<u64> {
        let item = self.resolve(path, View::Read, false).ok()?;
        item.as_leaf()?.size()
    }

    // =========================================================================
    // Listing
    // =========================================================================

    /// Names of everything in the containers at `path`, merged with any
    /// mount-point subsets there.
    ///
    /// Duplicate names are listed once. Order follows mount order, then each
    /// backend's own order.
    pub fn list(&self, path: &str) -> Vec<String> {
        self.list_with_subsets(path, None)
    }

    /// Like [`list`](Self::list), keeping only containers and mount-point
    /// subsets.
    pub fn list_containers(&self, path: &str) -> Vec<String> {
        let keep: &dyn Fn(&Item) -> bool = &|item| item.is_container();
        self.list_with_subsets(path, Some(keep))
    }

    /// Names of the leaves in the containers at `path`.
    ///
    /// Mount-point subsets are never leaves, so a path without a concrete
    /// container lists nothing.
    pub fn list_leaves(&self, path: &str) -> Vec<String> {
        let Ok(target) = VfsPath::parse(path) else {
            return Vec::new();
        };
        let keep: &dyn Fn(&Item) -> bool = &|item| item.is_leaf();
        match self.table.resolve_all(&target, View::Read, false, path) {
            Ok(items) => merge_children(&items, Some(keep)),
            Err(_) => Vec::new(),
        }
    }

    fn list_with_subsets(&self, path: &str, keep: Option<&dyn Fn(&Item) -> bool>) -> Vec<String> {
        let Ok(target) = VfsPath::parse(path) else {
            return Vec::new();
        };
        let subset = self.table.subset(&target, View::Read);

        let mut names = match self.table.resolve_all(&target, View::Read, false, path) {
            Ok(items) => merge_children(&items, keep),
            Err(_) => return subset,
        };
        let mut seen: HashSet<String> = names.iter().cloned().collect();
        names.extend(subset.into_iter().filter(|name| seen.insert(name.clone())));
        names
    }

    // =========================================================================
    // Mutation and streams
    // =========================================================================

    /// Delete the item at `path` through the write half.
    ///
    /// The parent is resolved in the write half; the first parent container
    /// that actually has the child performs the delete.
    ///
    /// # Errors
    ///
    /// - [`VfsError::BadPath`] if the path is invalid
    /// - [`VfsError::BadAction`] if the parent is a mount-point subset
    /// - [`VfsError::NotFound`] if no writable parent has the child
    /// - Errors from the backend's delete, normalized
    pub fn delete(&self, path: &str) -> Result<(), VfsError> {
        let target = VfsPath::parse(path)?;
        let Some((parent, name)) = target.split_last() else {
            return Err(VfsError::NotFound { path: path.into() });
        };

        let parents = self.table.resolve_all(&parent, View::Write, false, path)?;

        for container in parents.iter().filter_map(|item| item.as_container()) {
            if container.child(name, CreateHint::None).is_some() {
                tracing::debug!(path, "delete");
                return container
                    .delete(name)
                    .map_err(|e| VfsError::from_backend(e, path));
            }
        }
        Err(VfsError::NotFound { path: path.into() })
    }

    /// Open the leaf at `path` for reading.
    ///
    /// # Errors
    ///
    /// - [`VfsError::BadPath`], [`VfsError::NotFound`] or [`VfsError::BadAction`]
    ///   from resolution
    /// - [`VfsError::BadAction`] if the item is not a leaf
    /// - Errors from the backend's open, normalized
    pub fn open_read(&self, path: &str) -> Result<Box<dyn Read + Send>, VfsError> {
        let item = self.resolve(path, View::Read, false)?;
        let leaf = item
            .as_leaf()
            .ok_or_else(|| VfsError::BadAction { path: path.into() })?;
        leaf.open_read().map_err(|e| VfsError::from_backend(e, path))
    }

    /// Open the leaf at `path` for writing, truncating it. Missing items may
    /// be created by the write half's containers.
    ///
    /// # Errors
    ///
    /// Same as [`open_read`](Self::open_read), resolved in the write half. An
    /// item only reachable through read-only mounts is [`VfsError::NotFound`].
    pub fn open_write(&self, path: &str) -> Result<Box<dyn Write + Send>, VfsError> {
        let item = self.resolve_for_write(path)?;
        let leaf = item
            .as_leaf()
            .ok_or_else(|| VfsError::BadAction { path: path.into() })?;
        leaf.open_write().map_err(|e| VfsError::from_backend(e, path))
    }

    /// Open the leaf at `path` for writing after its existing content.
    ///
    /// # Errors
    ///
    /// Same as [`open_write`](Self::open_write).
    pub fn open_append(&self, path: &str) -> Result<Box<dyn Write + Send>, VfsError> {
        let item = self.resolve_for_write(path)?;
        let leaf = item
            .as_leaf()
            .ok_or_else(|| VfsError::BadAction { path: path.into() })?;
        leaf.open_append().map_err(|e| VfsError::from_backend(e, path))
    }

    /// Read the whole leaf at `path`.
    ///
    /// # Errors
    ///
    /// Same as [`open_read`](Self::open_read), plus read failures.
    pub fn read_all(&self, path: &str) -> Result<Vec<u8>, VfsError> {
        let mut reader = self.open_read(path)?;
        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .map_err(|e| VfsError::from_backend(e, path))?;
        Ok(content)
    }

    /// Read the whole leaf at `path` as UTF-8.
    ///
    /// # Errors
    ///
    /// Same as [`read_all`](Self::read_all); invalid UTF-8 is a
    /// [`VfsError::Backend`] of kind `InvalidData`.
    pub fn read_to_string(&self, path: &str) -> Result<String, VfsError> {
        let mut reader = self.open_read(path)?;
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|e| VfsError::from_backend(e, path))?;
        Ok(content)
    }

    /// Replace the content of the leaf at `path`.
    ///
    /// # Errors
    ///
    /// Same as [`open_write`](Self::open_write), plus write and flush failures.
    pub fn write_all(&self, path: &str, content: &[u8]) -> Result<(), VfsError> {
        let writer = self.open_write(path)?;
        write_and_flush(writer, content).map_err(|e| VfsError::from_backend(e, path))
    }

    /// Append to the leaf at `path`.
    ///
    /// # Errors
    ///
    /// Same as [`open_append`](Self::open_append), plus write and flush failures.
    pub fn append_all(&self, path: &str, content: &[u8]) -> Result<(), VfsError> {
        let writer = self.open_append(path)?;
        write_and_flush(writer, content).map_err(|e| VfsError::from_backend(e, path))
    }

    fn resolve_for_write(&self, path: &str) -> Result<Item, VfsError> {
        let target = VfsPath::parse(path)?;
        self.table.resolve(&target, View::Write, true, path)
    }
}

/// Children of every container among `items`, first occurrence of a name wins.
///
/// A name is claimed by its first occurrence even when `keep` rejects it there.
fn merge_children(items: &[Item], keep: Option<&dyn Fn(&Item) -> bool>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for container in items.iter().filter_map(|item| item.as_container()) {
        for name in container.list() {
            if !seen.insert(name.clone()) {
                continue;
            }
            let wanted = match keep {
                None => true,
                Some(keep) => container
                    .child(&name, CreateHint::None)
                    .is_some_and(|child| keep(&child)),
            };
            if wanted {
                names.push(name);
            }
        }
    }
    names
}

// The writer is dropped on every path out of here, releasing the stream.
fn write_and_flush(mut writer: Box<dyn Write + Send>, content: &[u8]) -> std::io::Result<()> {
    writer.write_all(content)?;
    writer.flush()
}
