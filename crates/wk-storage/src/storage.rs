//! Page store trait and error types.
//!
//! Provides the core [`PageStore`] trait for persisting pages, along with
//! [`StorageError`] for unified error handling across backends.

use std::io;
use std::path::{Path, PathBuf};

use crate::page::Page;

/// What went wrong with a page object, independent of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// No page is stored under the requested title.
    NotFound,
    /// The backend refused access to the page object.
    PermissionDenied,
    /// Title cannot be mapped to a page object.
    InvalidTitle,
    /// Anything else the backend reported.
    Other,
}

impl StorageErrorKind {
    fn from_io(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::NotFound => "not found",
            Self::PermissionDenied => "permission denied",
            Self::InvalidTitle => "invalid title",
            Self::Other => "storage error",
        })
    }
}

/// Failure to read or write a page object.
///
/// The message names the backend and the object it failed on, e.g.
/// `[Fs] permission denied: pages/Alpha.txt: Permission denied (os error 13)`.
/// It is sent verbatim as the body of 500 responses.
#[derive(Debug, thiserror::Error)]
#[error("[{backend}] {kind}: {}{}", .object.display(), io_detail(.source.as_ref()))]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Backend that raised the error (`"Fs"`, `"Mock"`).
    pub backend: &'static str,
    /// Object the operation targeted: a file path, or the title when it was rejected.
    pub object: PathBuf,
    source: Option<io::Error>,
}

fn io_detail(source: Option<&io::Error>) -> String {
    source.map(|err| format!(": {err}")).unwrap_or_default()
}

impl StorageError {
    /// Create an error without an underlying I/O cause.
    #[must_use]
    pub fn new(kind: StorageErrorKind, backend: &'static str, object: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            backend,
            object: object.into(),
            source: None,
        }
    }

    /// Classify an I/O failure on `object`.
    #[must_use]
    pub fn from_io(backend: &'static str, object: &Path, err: io::Error) -> Self {
        Self {
            kind: StorageErrorKind::from_io(err.kind()),
            backend,
            object: object.to_path_buf(),
            source: Some(err),
        }
    }

    /// Whether the error means the page simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

/// Persistence for pages, keyed by title.
///
/// Each call is a self-contained whole-object operation. Implementations take
/// no locks between concurrent `save` and `load` on the same title.
pub trait PageStore: Send + Sync {
    /// Persist `page.body` under `page.title`, replacing any previous body.
    ///
    /// Not transactional: a crash mid-write may leave a truncated object.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the object can't be written.
    fn save(&self, page: &Page) -> Result<(), StorageError>;

    /// Read the whole page stored under `title`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with [`StorageErrorKind::NotFound`] if no page
    /// exists, or another kind if it can't be read.
    fn load(&self, title: &str) -> Result<Page, StorageError>;
}
