//! # mountfs
//!
//! A **mount-based virtual filesystem**: one slash-delimited namespace over
//! any number of pluggable data sources.
//!
//! Data sources (in-memory trees, host directories, zip archives, or your own
//! types) are mounted at paths in the namespace. Several sources may share one
//! mount point; they are tried in mount order and their listings merge.
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust
//! use mountfs::{MemoryDir, Vfs};
//! use std::sync::Arc;
//!
//! let assets = Arc::new(MemoryDir::new());
//! assets.add_dir("img").add_file("logo.svg", b"<svg/>".to_vec());
//!
//! let mut vfs = Vfs::new();
//! vfs.mount("game/assets", assets, false)?;
//! vfs.mount("game/saves", Arc::new(MemoryDir::new()), true)?;
//!
//! // "game" has no item of its own but lists its mount points.
//! assert_eq!(vfs.list("game"), ["assets", "saves"]);
//!
//! vfs.write_all("game/saves/slot1", b"level 3")?;
//! assert_eq!(vfs.read_all("game/saves/slot1")?, b"level 3");
//! assert_eq!(vfs.read_to_string("game/assets/img/logo.svg")?, "<svg/>");
//!
//! // Assets were mounted read-only, so the write half has nothing there.
//! let err = vfs.write_all("game/assets/img/logo.svg", b"").unwrap_err();
//! assert_eq!(err.kind(), mountfs::ErrorKind::NotFound);
//! # Ok::<(), mountfs::VfsError>(())
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Vfs`] | The namespace: mount table plus every user-facing operation |
//! | [`VfsPath`] | A validated, normalized namespace path |
//! | [`VfsError`] | Error type; every variant carries the offending path |
//! | [`ErrorKind`] | Coarse classification of [`VfsError`] |
//! | [`DataSource`] | Any mountable item |
//! | [`Container`] | Directory-like capability |
//! | [`Leaf`] | File-like capability |
//! | [`Item`] | Shared handle to a data source item |
//!
//! ---
//!
//! ## Paths
//!
//! Paths are relative, separated by `/`, and never start with a drive or
//! root. Empty segments are dropped, so `"a//b/"` is `"a/b"`. `.` and `..`
//! segments and the characters in [`RESERVED_CHARS`] are rejected with
//! [`VfsError::BadPath`]. The empty path is the root.
//!
//! ---
//!
//! ## Read and Write Halves
//!
//! Every mount joins the read half of the namespace. Writable mounts also
//! join the write half. Reads and listings use the read half; writes, appends
//! and deletes use the write half. Something only visible through the read
//! half is [`VfsError::NotFound`] to writes. [`VfsError::ReadOnly`] comes from
//! data sources that refuse a change themselves.
//!
//! ---
//!
//! ## Error Handling
//!
//! All fallible operations return `Result<T, VfsError>`:
//!
//! ```rust
//! use mountfs::{ErrorKind, Vfs};
//!
//! let vfs = Vfs::new();
//! let err = vfs.read_all("missing.txt").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//! assert_eq!(err.to_string(), "no item found at path: missing.txt");
//!
//! let err = vfs.read_all("a/../b").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::BadPath);
//! ```
//!
//! Backend failures surface as [`VfsError::Backend`], wrapping the
//! [`std::io::Error`] the data source returned.
//!
//! ---
//!
//! ## Logging
//!
//! Mount table changes are logged at `debug`, resolution at `trace`, through
//! [`tracing`]. Install any subscriber to see them.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `zip` | Yes | `ZipDir`, a read-only data source over zip archives |
//! | `serde` | No | Serialization for [`ErrorKind`], [`MountInfo`] and friends, plus `VfsJsonExt` (`read_json`/`write_json` on [`Vfs`]) |

// Private modules
mod error;
mod ext;
mod mount;
mod path;
mod resolve;
mod sources;
mod traits;
mod types;
mod vfs;

// Public re-exports - error types
pub use error::{ErrorKind, VfsError};

// Public re-exports - core types
pub use path::{RESERVED_CHARS, VfsPath};
pub use types::{CreateHint, MountInfo, View};

// Public re-exports - item traits
pub use traits::{Container, DataSource, Item, Leaf};

// Public re-exports - namespace
pub use ext::DataSourceExt;
pub use vfs::Vfs;

// Public re-exports - data sources
pub use sources::{MemoryDir, MemoryFile, NativeDir, NativeFile};

// Conditional re-exports
#[cfg(feature = "serde")]
pub use ext::VfsJsonExt;
#[cfg(feature = "zip")]
pub use sources::{ZipDir, ZipFile};
