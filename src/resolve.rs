//! # Resolution
//!
//! Maps a namespace path to the concrete items bound there.
//!
//! For every binding in the selected view, in insertion order:
//!
//! ```text
//! mount point is a prefix of the target?  ── no ──▶ skip binding
//!          │ yes
//!          ▼
//! walk remaining segments: each step needs a Container
//! and a child for the segment            ── miss ──▶ skip binding
//!          │ all consumed
//!          ▼
//! candidate
//! ```
//!
//! A failing binding never aborts the others. With no candidate at all the
//! path is either a mount-point subset ([`VfsError::BadAction`]) or nothing
//! ([`VfsError::NotFound`]).

use std::sync::Arc;

use crate::mount::{Binding, MountTable};
use crate::{CreateHint, Item, VfsError, VfsPath, View};

impl MountTable {
    /// Lazily yield the items bound at `target`, first-inserted binding first.
    ///
    /// With `create`, containers along the walk receive creation hints.
    /// Consuming only the first candidate keeps later bindings from seeing
    /// those hints.
    pub(crate) fn candidates<'a>(
        &'a self,
        target: &'a VfsPath,
        view: View,
        create: bool,
    ) -> impl Iterator<Item = Item> + 'a {
        self.view(view)
            .iter()
            .filter_map(move |binding| walk(binding, target, create))
    }

    /// All items bound at `target`.
    ///
    /// # Errors
    ///
    /// - [`VfsError::BadAction`] if nothing is bound but mount points lie below `target`
    /// - [`VfsError::NotFound`] otherwise
    ///
    /// Errors carry `path`, the caller's spelling of `target`.
    pub(crate) fn resolve_all(
        &self,
        target: &VfsPath,
        view: View,
        create: bool,
        path: &str,
    ) -> Result<Vec<Item>, VfsError> {
        let items: Vec<Item> = self.candidates(target, view, create).collect();
        tracing::trace!(path = %target, ?view, create, candidates = items.len(), "resolve all");

        if items.is_empty() {
            Err(self.unresolved(target, view, path))
        } else {
            Ok(items)
        }
    }

    /// The first item bound at `target`.
    ///
    /// # Errors
    ///
    /// Same as [`resolve_all`](Self::resolve_all).
    pub(crate) fn resolve(
        &self,
        target: &VfsPath,
        view: View,
        create: bool,
        path: &str,
    ) -> Result<Item, VfsError> {
        let item = self.candidates(target, view, create).next();
        tracing::trace!(path = %target, ?view, create, found = item.is_some(), "resolve");

        item.ok_or_else(|| self.unresolved(target, view, path))
    }

    fn unresolved(&self, target: &VfsPath, view: View, path: &str) -> VfsError {
        if self.has_subset(target, view) {
            VfsError::BadAction { path: path.into() }
        } else {
            VfsError::NotFound { path: path.into() }
        }
    }
}

/// Walk from a binding's item down the rest of `target`.
fn walk(binding: &Binding, target: &VfsPath, create: bool) -> Option<Item> {
    let rest = target.segments().strip_prefix(binding.point.segments())?;

    let mut current = Arc::clone(&binding.item);
    for (index, name) in rest.iter().enumerate() {
        let hint = CreateHint::for_step(create, index, rest.len());
        let next = current.as_container()?.child(name, hint)?;
        current = next;
    }
    Some(current)
}
