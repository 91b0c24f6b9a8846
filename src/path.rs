//! # Namespace Paths
//!
//! Parsing and normalization of slash-delimited namespace paths.
//!
//! ## Rules
//! - Segments are separated by `/`; repeated, leading and trailing slashes are dropped
//! - None of `< > ? * | : " \` may appear anywhere in the path
//! - `.` and `..` are not valid segment names
//! - The empty string is the namespace root
//!
//! `a//b/` and `/a/b` both normalize to the segments `["a", "b"]`.

use std::fmt;
use std::str::FromStr;

use crate::VfsError;

/// Characters that may never appear in a namespace path.
pub const RESERVED_CHARS: [char; 8] = ['<', '>', '?', '*', '|', ':', '"', '\\'];

/// A validated namespace path, stored as its ordered segment names.
///
/// The empty segment list is the root. Two paths compare equal exactly when
/// they normalize to the same segments.
///
/// # Examples
///
/// ```rust
/// use mountfs::VfsPath;
///
/// let path = VfsPath::parse("/test///path//to/dir/").unwrap();
/// assert_eq!(path.segments(), ["test", "path", "to", "dir"]);
/// assert_eq!(path.to_string(), "test/path/to/dir");
///
/// assert!(VfsPath::parse("a/../b").is_err());
/// assert!(VfsPath::parse("").unwrap().is_root());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VfsPath {
    segments: Vec<String>,
}

impl VfsPath {
    /// The namespace root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Validate and normalize a raw path.
    ///
    /// # Errors
    ///
    /// - [`VfsError::BadPath`] if the path contains a reserved character or a
    ///   `.`/`..` segment
    pub fn parse(path: &str) -> Result<Self, VfsError> {
        if path.contains(RESERVED_CHARS) {
            return Err(VfsError::BadPath { path: path.into() });
        }

        let mut segments = Vec::new();
        for segment in path.split('/') {
            match segment {
                "" => continue,
                "." | ".." => return Err(VfsError::BadPath { path: path.into() }),
                name => segments.push(name.to_owned()),
            }
        }
        Ok(Self { segments })
    }

    /// The ordered segment names.
    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` for the root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Alias for [`is_root`](Self::is_root).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// Returns `true` if `prefix`'s segments are a leading run of this path's.
    ///
    /// Every path starts with itself and with the root.
    pub fn starts_with(&self, prefix: &VfsPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Split into the parent path and the final segment name.
    ///
    /// Returns `None` for the root.
    pub fn split_last(&self) -> Option<(VfsPath, &str)> {
        let (last, parent) = self.segments.split_last()?;
        Some((
            VfsPath {
                segments: parent.to_vec(),
            },
            last.as_str(),
        ))
    }

    /// Extend the path with one more segment.
    ///
    /// # Errors
    ///
    /// - [`VfsError::BadPath`] if `name` is not a single valid segment
    pub fn join(&self, name: &str) -> Result<VfsPath, VfsError> {
        let child = VfsPath::parse(name)?;
        if child.len() != 1 {
            return Err(VfsError::BadPath { path: name.into() });
        }
        let mut segments = self.segments.clone();
        segments.extend(child.segments);
        Ok(VfsPath { segments })
    }
}

impl fmt::Display for VfsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl FromStr for VfsPath {
    type Err = VfsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VfsPath::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn empty_is_root() {
        let path = VfsPath::parse("").unwrap();
        assert!(path.is_root());
        assert_eq!(path, VfsPath::root());
    }

    #[test]
    fn slashes_only_is_root() {
        assert!(VfsPath::parse("///").unwrap().is_root());
    }

    #[test]
    fn redundant_slashes_are_dropped() {
        let a = VfsPath::parse("a//b/").unwrap();
        let b = VfsPath::parse("a/b").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.segments(), ["a", "b"]);
    }

    #[test]
    fn reserved_characters_are_rejected() {
        for raw in ["a<b", "a>b", "a?", "*", "a|b", "c:/x", "\"q\"", "a\\b"] {
            let err = VfsPath::parse(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::BadPath, "{raw}");
            assert_eq!(err.path(), raw);
        }
    }

    #[test]
    fn dot_segments_are_rejected() {
        assert!(VfsPath::parse(".").is_err());
        assert!(VfsPath::parse("a/./b").is_err());
        assert!(VfsPath::parse("a/..").is_err());
    }

    #[test]
    fn dotted_names_are_fine() {
        let path = VfsPath::parse("...").unwrap();
        assert_eq!(path.segments(), ["..."]);
        let path = VfsPath::parse(".hidden/x.tar.gz").unwrap();
        assert_eq!(path.segments(), [".hidden", "x.tar.gz"]);
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["", "/", "a", "/a//b///c/", "x/y.txt", "  spaced /name"] {
            let once = VfsPath::parse(raw).unwrap();
            let twice = VfsPath::parse(&once.to_string()).unwrap();
            assert_eq!(once, twice, "{raw}");
        }
    }

    #[test]
    fn starts_with_is_segment_wise() {
        let path = VfsPath::parse("ab/c").unwrap();
        assert!(path.starts_with(&VfsPath::parse("ab").unwrap()));
        assert!(path.starts_with(&VfsPath::root()));
        assert!(path.starts_with(&path));
        assert!(!path.starts_with(&VfsPath::parse("a").unwrap()));
        assert!(!path.starts_with(&VfsPath::parse("ab/c/d").unwrap()));
    }

    #[test]
    fn split_last_separates_parent() {
        let path = VfsPath::parse("a/b/c.txt").unwrap();
        let (parent, name) = path.split_last().unwrap();
        assert_eq!(parent.to_string(), "a/b");
        assert_eq!(name, "c.txt");
        assert!(VfsPath::root().split_last().is_none());
    }

    #[test]
    fn join_accepts_a_single_segment() {
        let base = VfsPath::parse("a").unwrap();
        assert_eq!(base.join("b").unwrap().to_string(), "a/b");
        assert!(base.join("b/c").is_err());
        assert!(base.join("").is_err());
        assert!(base.join("..").is_err());
    }

    #[test]
    fn from_str_parses() {
        let path: VfsPath = "x/y".parse().unwrap();
        assert_eq!(path.len(), 2);
    }
}
