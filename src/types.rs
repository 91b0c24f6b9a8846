//! Core types shared by the mount table, resolution and data sources.

/// Creation hint passed to [`Container::child`](crate::Container::child).
///
/// The hint only grants permission. A container may hand back a handle to a
/// child that does not exist yet and defer materializing it until the
/// following `open_write`/`open_append`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CreateHint {
    /// Do not create anything; return the child only if it exists.
    #[default]
    None,
    /// The child may be created as a container.
    Container,
    /// The child may be created as a leaf.
    Leaf,
}

impl CreateHint {
    /// Hint for step `index` of a walk over `len` remaining segments.
    ///
    /// Intermediate steps may create containers, the final step a leaf.
    #[inline]
    pub(crate) fn for_step(create: bool, index: usize, len: usize) -> Self {
        match (create, index + 1 == len) {
            (false, _) => CreateHint::None,
            (true, true) => CreateHint::Leaf,
            (true, false) => CreateHint::Container,
        }
    }
}

/// Which half of the mount table an operation runs against.
///
/// Anything that changes state runs against the write view; everything else
/// against the read view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum View {
    /// Bindings visible for reading and listing.
    Read,
    /// Bindings that accept writes and deletes.
    Write,
}

/// Description of one read-view binding, as returned by
/// [`Vfs::mounts`](crate::Vfs::mounts).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MountInfo {
    /// Normalized mount point (`""` for the root).
    pub path: String,
    /// Whether the bound item is also in the write view.
    pub writable: bool,
}
