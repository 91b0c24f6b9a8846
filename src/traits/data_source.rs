//! The item type mounted on and surfaced by the namespace.

use std::sync::Arc;

use super::{Container, Leaf};

/// Any node a data source can surface: a [`Container`], a [`Leaf`], or both.
///
/// Capabilities are probed at runtime through [`as_container`] and
/// [`as_leaf`]; an item exposing neither cannot be mounted.
///
/// # Example
///
/// ```rust
/// use mountfs::{Container, CreateHint, DataSource, Item};
/// use std::io;
///
/// /// A container that is always empty.
/// struct Empty;
///
/// impl Container for Empty {
///     fn child(&self, _: &str, _: CreateHint) -> Option<Item> { None }
///     fn list(&self) -> Vec<String> { Vec::new() }
///     fn delete(&self, _: &str) -> io::Result<()> {
///         Err(io::ErrorKind::NotFound.into())
///     }
/// }
///
/// impl DataSource for Empty {
///     fn as_container(&self) -> Option<&dyn Container> { Some(self) }
/// }
///
/// assert!(Empty.as_container().is_some());
/// assert!(Empty.as_leaf().is_none());
/// ```
///
/// [`as_container`]: DataSource::as_container
/// [`as_leaf`]: DataSource::as_leaf
pub trait DataSource: Send + Sync {
    /// The container capability, if this item has one.
    fn as_container(&self) -> Option<&dyn Container> {
        None
    }

    /// The leaf capability, if this item has one.
    fn as_leaf(&self) -> Option<&dyn Leaf> {
        None
    }
}

/// Shared handle to a data-source item.
///
/// Items have no identity outside the data source that produced them; the
/// namespace only holds and hands out these handles.
pub type Item = Arc<dyn DataSource>;

#[cfg(test)]
mod tests {
    use super::*;

    struct Opaque;
    impl DataSource for Opaque {}

    #[test]
    fn default_capabilities_are_absent() {
        assert!(Opaque.as_container().is_none());
        assert!(Opaque.as_leaf().is_none());
    }

    #[test]
    fn item_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Item>();
    }
}
