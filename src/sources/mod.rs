//! # Data Sources
//!
//! Ready-made items to mount.
//!
//! | Source | Backing store | Writable |
//! |--------|---------------|----------|
//! | [`MemoryDir`] / [`MemoryFile`] | Process memory | Yes |
//! | [`NativeDir`] / [`NativeFile`] | Host filesystem | Yes |
//! | `ZipDir` / `ZipFile` | Zip archive (`zip` feature) | No |

mod memory;
mod native;
#[cfg(feature = "zip")]
mod zip;

pub use memory::{MemoryDir, MemoryFile};
pub use native::{NativeDir, NativeFile};
#[cfg(feature = "zip")]
pub use self::zip::{ZipDir, ZipFile};
