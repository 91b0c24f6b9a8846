//! # Mount Table
//!
//! Ordered bindings of mount points to items, kept as a read view and a write
//! view.
//!
//! ## Ordering
//!
//! Bindings keep insertion order in both views. When several bindings are
//! candidates for one path they are tried first-inserted first. Bindings with
//! identical mount points are legal (multiplexing).
//!
//! ## Views
//!
//! A writable mount lands in both views, a read-only mount only in the read
//! view. The views are separate lists so a binding can be dropped from the
//! write view alone.

use std::collections::HashSet;
use std::sync::Arc;

use crate::ext::DataSourceExt;
use crate::{Item, MountInfo, VfsError, VfsPath, View};

/// One mount point bound to one item.
///
/// The read and write copies of one writable mount share an `id`.
#[derive(Clone)]
pub(crate) struct Binding {
    pub(crate) point: VfsPath,
    pub(crate) item: Item,
    id: u64,
}

impl Binding {
    fn is_at(&self, point: &VfsPath) -> bool {
        self.point == *point
    }

    /// `true` if the mount point lies strictly below `prefix`.
    fn is_below(&self, prefix: &VfsPath) -> bool {
        self.point.len() > prefix.len() && self.point.starts_with(prefix)
    }
}

/// The read and write views of the namespace.
#[derive(Clone, Default)]
pub(crate) struct MountTable {
    read: Vec<Binding>,
    write: Vec<Binding>,
    next_id: u64,
}

impl MountTable {
    fn fresh_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub(crate) fn view(&self, view: View) -> &[Binding] {
        match view {
            View::Read => &self.read,
            View::Write => &self.write,
        }
    }

    /// Append a binding to the read view, and to the write view if `writable`.
    ///
    /// # Errors
    ///
    /// - [`VfsError::BadAction`] if `item` is neither a container nor a leaf
    pub(crate) fn mount(
        &mut self,
        point: VfsPath,
        item: Item,
        writable: bool,
    ) -> Result<(), VfsError> {
        ensure_mountable(&item, &point)?;

        tracing::debug!(path = %point, writable, "mount");
        let id = self.fresh_id();
        let binding = Binding { point, item, id };
        if writable {
            self.write.push(binding.clone());
        }
        self.read.push(binding);
        Ok(())
    }

    /// Remove every binding at exactly `point` from the write view, and from
    /// the read view too if `from_read`.
    ///
    /// Returns the number of bindings removed across both views.
    pub(crate) fn unmount(&mut self, point: &VfsPath, from_read: bool) -> usize {
        let before = self.read.len() + self.write.len();
        self.write.retain(|binding| !binding.is_at(point));
        if from_read {
            self.read.retain(|binding| !binding.is_at(point));
        }
        let removed = before - (self.read.len() + self.write.len());

        tracing::debug!(path = %point, from_read, removed, "unmount");
        removed
    }

    /// Replace the item of the first read-view binding at exactly `point`, and
    /// of the first write-view binding there if `writable`.
    ///
    /// Returns the item previously bound in the read view, or `None` if no
    /// read-view binding matched. Replaced bindings count as a new mount, so
    /// a read-only swap leaves the read binding unpaired with the write view.
    ///
    /// # Errors
    ///
    /// - [`VfsError::BadAction`] if `item` is neither a container nor a leaf
    pub(crate) fn swap(
        &mut self,
        point: &VfsPath,
        item: Item,
        writable: bool,
    ) -> Result<Option<Item>, VfsError> {
        ensure_mountable(&item, point)?;

        let id = self.fresh_id();
        if writable {
            replace_first(&mut self.write, point, Arc::clone(&item), id);
        }
        let previous = replace_first(&mut self.read, point, item, id);

        tracing::debug!(path = %point, writable, swapped = previous.is_some(), "swap mount");
        Ok(previous)
    }

    /// Distinct next-segment names of mount points lying below `prefix`.
    ///
    /// Names appear in the insertion order of the bindings that contribute them.
    pub(crate) fn subset(&self, prefix: &VfsPath, view: View) -> Vec<String> {
        let mut seen = HashSet::new();
        self.view(view)
            .iter()
            .filter(|binding| binding.is_below(prefix))
            .map(|binding| &binding.point.segments()[prefix.len()])
            .filter(|name| seen.insert(name.as_str()))
            .cloned()
            .collect()
    }

    /// `true` if any mount point lies below `prefix`.
    pub(crate) fn has_subset(&self, prefix: &VfsPath, view: View) -> bool {
        self.view(view)
            .iter()
            .any(|binding| binding.is_below(prefix))
    }

    /// The read view's bindings, flagged with write-view membership.
    pub(crate) fn infos(&self) -> Vec<MountInfo> {
        self.read
            .iter()
            .map(|binding| MountInfo {
                path: binding.point.to_string(),
                writable: self.write.iter().any(|w| w.id == binding.id),
            })
            .collect()
    }
}

fn ensure_mountable(item: &Item, point: &VfsPath) -> Result<(), VfsError> {
    if item.is_mountable() {
        Ok(())
    } else {
        Err(VfsError::BadAction {
            path: point.to_string(),
        })
    }
}

fn replace_first(bindings: &mut [Binding], point: &VfsPath, item: Item, id: u64) -> Option<Item> {
    let binding = bindings.iter_mut().find(|binding| binding.is_at(point))?;
    binding.id = id;
    Some(std::mem::replace(&mut binding.item, item))
}
