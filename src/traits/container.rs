//! Container capability: items that hold named children.

use std::io;

use crate::{CreateHint, Item};

/// Capability of items that act like directories.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. Methods take `&self`; containers that
/// mutate (create or delete children) use interior mutability.
///
/// # Object Safety
///
/// This trait is object-safe and is consumed as `&dyn Container`.
pub trait Container: Send + Sync {
    /// Look up a child by name.
    ///
    /// If the child exists it is returned regardless of `create`. Otherwise
    /// `create` says whether (and as what) it may be created. Returning a
    /// handle that only materializes on the next `open_write`/`open_append`
    /// is enough; a request to create is always followed by a request to open
    /// for writing.
    ///
    /// Returns `None` when the child does not exist and cannot be created.
    fn child(&self, name: &str, create: CreateHint) -> Option<Item>;

    /// Names of all children, in backend-defined order.
    fn list(&self) -> Vec<String>;

    /// Delete the named child.
    ///
    /// # Errors
    ///
    /// Backend-defined. Return [`io::ErrorKind::NotFound`] when the child does
    /// not exist.
    fn delete(&self, name: &str) -> io::Result<()>;
}
