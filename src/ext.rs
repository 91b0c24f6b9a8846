//! # Extension Traits
//!
//! Convenience methods that sit on top of the core traits.
//!
//! ## Available Methods
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`is_container`](DataSourceExt::is_container) | Item exposes [`Container`](crate::Container) |
//! | [`is_leaf`](DataSourceExt::is_leaf) | Item exposes [`Leaf`](crate::Leaf) |
//! | [`is_mountable`](DataSourceExt::is_mountable) | Item exposes at least one capability |
//!
//! ## JSON Support (Feature-Gated)
//!
//! With the `serde` feature enabled, `VfsJsonExt` gives [`Vfs`](crate::Vfs)
//! `read_json` and `write_json`.
//!
//! Enable with:
//! ```toml
//! [dependencies]
//! mountfs = { version = "0.1", features = ["serde"] }
//! ```

use crate::DataSource;

/// Capability probes for any item.
///
/// # Example
///
/// ```rust
/// use mountfs::{DataSourceExt, Item, MemoryDir};
/// use std::sync::Arc;
///
/// let item: Item = Arc::new(MemoryDir::new());
/// assert!(item.is_container());
/// assert!(!item.is_leaf());
/// ```
pub trait DataSourceExt: DataSource {
    /// `true` if the item exposes the container capability.
    fn is_container(&self) -> bool {
        self.as_container().is_some()
    }

    /// `true` if the item exposes the leaf capability.
    fn is_leaf(&self) -> bool {
        self.as_leaf().is_some()
    }

    /// `true` if the item may be mounted (container, leaf, or both).
    fn is_mountable(&self) -> bool {
        self.is_container() || self.is_leaf()
    }
}

// Blanket implementation - every item, including `dyn DataSource`
impl<T: DataSource + ?Sized> DataSourceExt for T {}

#[cfg(feature = "serde")]
mod json {
    use serde::Serialize;
    use serde::de::DeserializeOwned;

    use crate::{Vfs, VfsError};

    /// JSON helpers for [`Vfs`].
    ///
    /// # Example
    ///
    /// ```rust
    /// # #[cfg(feature = "serde")]
    /// # {
    /// use mountfs::{MemoryDir, Vfs, VfsJsonExt};
    /// use std::sync::Arc;
    ///
    /// let mut vfs = Vfs::new();
    /// vfs.mount("cfg", Arc::new(MemoryDir::new()), true).unwrap();
    /// vfs.write_json("cfg/limits.json", &[1, 2, 3]).unwrap();
    /// let limits: Vec<u32> = vfs.read_json("cfg/limits.json").unwrap();
    /// assert_eq!(limits, [1, 2, 3]);
    /// # }
    /// ```
    pub trait VfsJsonExt {
        /// Read a leaf and deserialize it as JSON.
        ///
        /// # Errors
        ///
        /// - Everything [`Vfs::read_all`] returns
        /// - [`VfsError::Backend`] with kind `InvalidData` if parsing fails
        fn read_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, VfsError>;

        /// Serialize a value as pretty-printed JSON and write it to a leaf.
        ///
        /// # Errors
        ///
        /// - Everything [`Vfs::write_all`] returns
        /// - [`VfsError::Backend`] if serialization fails
        fn write_json<T: Serialize>(&self, path: &str, value: &T) -> Result<(), VfsError>;
    }

    impl VfsJsonExt for Vfs {
        fn read_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, VfsError> {
            let data = self.read_all(path)?;
            serde_json::from_slice(&data).map_err(|e| VfsError::from_backend(e.into(), path))
        }

        fn write_json<T: Serialize>(&self, path: &str, value: &T) -> Result<(), VfsError> {
            let json = serde_json::to_vec_pretty(value)
                .map_err(|e| VfsError::from_backend(e.into(), path))?;
            self.write_all(path, &json)
        }
    }
}

#[cfg(feature = "serde")]
pub use json::VfsJsonExt;
