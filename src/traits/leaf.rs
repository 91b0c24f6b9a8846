//! Leaf capability: items that hold bytes.

use std::io::{self, Read, Write};

/// Capability of items that act like files.
///
/// Streams are independent resources; dropping them releases whatever the
/// backend holds open.
///
/// # Object Safety
///
/// This trait is object-safe and is consumed as `&dyn Leaf`.
pub trait Leaf: Send + Sync {
    /// Size in bytes, or `None` if it cannot be determined.
    fn size(&self) -> Option<u64>;

    /// Open for reading from the start.
    ///
    /// # Errors
    ///
    /// Backend-defined. [`io::ErrorKind::NotFound`] is reported to callers as
    /// [`VfsError::NotFound`](crate::VfsError::NotFound).
    fn open_read(&self) -> io::Result<Box<dyn Read + Send>>;

    /// Open for writing, truncating any existing content.
    ///
    /// # Errors
    ///
    /// Backend-defined; read-only backends refuse here.
    fn open_write(&self) -> io::Result<Box<dyn Write + Send>>;

    /// Open for writing with the cursor past any existing content.
    ///
    /// # Errors
    ///
    /// Backend-defined; read-only backends refuse here.
    fn open_append(&self) -> io::Result<Box<dyn Write + Send>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_is_object_safe() {
        fn _check(_: &dyn Leaf) {}
    }

    #[test]
    fn leaf_requires_send_sync() {
        fn _assert_send_sync<T: Send + Sync>() {}
        fn _check<T: Leaf>() {
            _assert_send_sync::<T>();
        }
    }
}
