//! Error types for the mount namespace.

use std::io;

/// Kind of a [`VfsError`], independent of the path that triggered it.
///
/// The set is closed: every failure surfaced by [`Vfs`](crate::Vfs) maps to
/// exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// No item at the path.
    NotFound,
    /// The item is only reachable through read-only bindings, or the backend refused a write.
    ReadOnly,
    /// The action does not fit the item (capability mismatch, or a mount-point subset).
    BadAction,
    /// The path is syntactically invalid.
    BadPath,
    /// A backend-native failure.
    Backend,
}

/// Namespace error type.
///
/// Every variant carries the namespace path exactly as the caller supplied it.
///
/// # Examples
///
/// ```rust
/// use mountfs::{ErrorKind, VfsError};
///
/// let err = VfsError::NotFound { path: "base/a/m.txt".into() };
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// assert_eq!(err.to_string(), "no item found at path: base/a/m.txt");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum VfsError {
    /// Nothing is bound at the path.
    #[error("no item found at path: {path}")]
    NotFound {
        /// The queried path.
        path: String,
    },

    /// The item is read-only.
    #[error("item at path is read-only: {path}")]
    ReadOnly {
        /// The queried path.
        path: String,
    },

    /// The requested action cannot be carried out on the item at the path.
    #[error("illegal action for item at path: {path}")]
    BadAction {
        /// The queried path.
        path: String,
    },

    /// The path contains a reserved character or a `.`/`..` segment.
    #[error("path is invalid: {path}")]
    BadPath {
        /// The rejected path.
        path: String,
    },

    /// An error reported by a data source.
    #[error("{source} (vfs path: {path})")]
    Backend {
        /// The queried path.
        path: String,
        /// The backend's own error, unchanged.
        #[source]
        source: io::Error,
    },
}

impl VfsError {
    /// Build a path-annotated error of a non-backend kind.
    ///
    /// `ErrorKind::Backend` has no source to carry, so it yields a `Backend`
    /// error around an opaque [`io::ErrorKind::Other`].
    pub fn from_kind(kind: ErrorKind, path: impl Into<String>) -> Self {
        let path = path.into();
        match kind {
            ErrorKind::NotFound => Self::NotFound { path },
            ErrorKind::ReadOnly => Self::ReadOnly { path },
            ErrorKind::BadAction => Self::BadAction { path },
            ErrorKind::BadPath => Self::BadPath { path },
            ErrorKind::Backend => Self::Backend {
                path,
                source: io::Error::from(io::ErrorKind::Other),
            },
        }
    }

    /// Normalize a backend error into the namespace taxonomy.
    ///
    /// A `VfsError` smuggled through `io::Error` keeps its kind, a backend
    /// "does not exist" becomes [`VfsError::NotFound`], and everything else is
    /// carried verbatim in [`VfsError::Backend`].
    pub fn from_backend(error: io::Error, path: impl Into<String>) -> Self {
        let path = path.into();
        let inner = error
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<VfsError>())
            .map(VfsError::kind);

        match (inner, error.kind()) {
            (Some(kind), _) if kind != ErrorKind::Backend => Self::from_kind(kind, path),
            (_, io::ErrorKind::NotFound) => Self::NotFound { path },
            _ => Self::Backend {
                path,
                source: error,
            },
        }
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::ReadOnly { .. } => ErrorKind::ReadOnly,
            Self::BadAction { .. } => ErrorKind::BadAction,
            Self::BadPath { .. } => ErrorKind::BadPath,
            Self::Backend { .. } => ErrorKind::Backend,
        }
    }

    /// The namespace path that triggered this error.
    pub fn path(&self) -> &str {
        match self {
            Self::NotFound { path }
            | Self::ReadOnly { path }
            | Self::BadAction { path }
            | Self::BadPath { path }
            | Self::Backend { path, .. } => path,
        }
    }

    /// Replace the path annotation.
    pub fn with_path(mut self, new_path: impl Into<String>) -> Self {
        match &mut self {
            Self::NotFound { path }
            | Self::ReadOnly { path }
            | Self::BadAction { path }
            | Self::BadPath { path }
            | Self::Backend { path, .. } => *path = new_path.into(),
        }
        self
    }
}

impl From<VfsError> for io::Error {
    fn from(error: VfsError) -> Self {
        let kind = match error.kind() {
            ErrorKind::NotFound => io::ErrorKind::NotFound,
            ErrorKind::ReadOnly => io::ErrorKind::ReadOnlyFilesystem,
            ErrorKind::BadAction => io::ErrorKind::Unsupported,
            ErrorKind::BadPath => io::ErrorKind::InvalidInput,
            ErrorKind::Backend => io::ErrorKind::Other,
        };
        io::Error::new(kind, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = VfsError::NotFound {
            path: "a/b".into(),
        };
        assert_eq!(err.to_string(), "no item found at path: a/b");
    }

    #[test]
    fn backend_display_includes_source_and_path() {
        let err = VfsError::Backend {
            path: "a/b".into(),
            source: io::Error::other("disk on fire"),
        };
        assert_eq!(err.to_string(), "disk on fire (vfs path: a/b)");
    }

    #[test]
    fn from_backend_not_found_is_translated() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err = VfsError::from_backend(io_err, "x/y");
        assert!(matches!(err, VfsError::NotFound { ref path } if path == "x/y"));
    }

    #[test]
    fn from_backend_other_is_wrapped_verbatim() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let err = VfsError::from_backend(io_err, "x");
        match err {
            VfsError::Backend { path, source } => {
                assert_eq!(path, "x");
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
                assert_eq!(source.to_string(), "nope");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn from_backend_unwraps_embedded_vfs_error() {
        let io_err: io::Error = VfsError::ReadOnly {
            path: String::new(),
        }
        .into();
        let err = VfsError::from_backend(io_err, "locked.txt");
        assert_eq!(err.kind(), ErrorKind::ReadOnly);
        assert_eq!(err.path(), "locked.txt");
    }

    #[test]
    fn with_path_rewrites_every_variant() {
        for kind in [
            ErrorKind::NotFound,
            ErrorKind::ReadOnly,
            ErrorKind::BadAction,
            ErrorKind::BadPath,
            ErrorKind::Backend,
        ] {
            let err = VfsError::from_kind(kind, "old").with_path("new");
            assert_eq!(err.kind(), kind);
            assert_eq!(err.path(), "new");
        }
    }

    #[test]
    fn into_io_error_maps_kind() {
        let io_err: io::Error = VfsError::NotFound { path: "p".into() }.into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);

        let io_err: io::Error = VfsError::BadPath { path: "p".into() }.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);
    }
}
