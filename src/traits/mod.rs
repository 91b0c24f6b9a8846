//! # Item Traits
//!
//! The capability traits every mounted item is built from.
//!
//! ## Capabilities
//!
//! An item is any [`DataSource`]. What it can do is discovered at runtime:
//!
//! ```text
//! DataSource ──as_container()──▶ Container   (child, list, delete)
//!            └─as_leaf()───────▶ Leaf        (size, open_read, open_write, open_append)
//! ```
//!
//! An item may expose both capabilities, one, or neither. Items exposing
//! neither cannot be mounted.
//!
//! ## Quick Reference
//!
//! | Trait | Role | Methods |
//! |-------|------|---------|
//! | [`DataSource`] | Any item | `as_container`, `as_leaf` |
//! | [`Container`] | Directory-like | `child`, `list`, `delete` |
//! | [`Leaf`] | File-like | `size`, `open_read`, `open_write`, `open_append` |
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync` and take `&self`. Items are shared as
//! [`Item`] (`Arc<dyn DataSource>`) and may be held by several mounts and
//! callers at once.
//!
//! ## Object Safety
//!
//! All traits are object-safe:
//!
//! ```rust
//! use mountfs::{Container, DataSource, Leaf};
//!
//! fn describe(item: &dyn DataSource) -> &'static str {
//!     match (item.as_container(), item.as_leaf()) {
//!         (Some(_), Some(_)) => "both",
//!         (Some(_), None) => "container",
//!         (None, Some(_)) => "leaf",
//!         (None, None) => "opaque",
//!     }
//! }
//! # let _: Option<&dyn Container> = None;
//! # let _: Option<&dyn Leaf> = None;
//! ```

mod container;
mod data_source;
mod leaf;

pub use container::Container;
pub use data_source::{DataSource, Item};
pub use leaf::Leaf;
