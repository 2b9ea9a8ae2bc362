//! Mock storage implementation for testing.
//!
//! Provides [`MockPageStore`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::page::Page;
use crate::storage::{PageStore, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock page store for testing.
///
/// Stores page bodies in memory. Use the builder methods to configure the
/// mock with test data.
///
/// # Example
///
/// ```ignore
/// use wk_storage::{MockPageStore, PageStore};
///
/// let store = MockPageStore::new().with_page("Alpha", "hello");
/// let page = store.load("Alpha").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockPageStore {
    pages: RwLock<HashMap<String, Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl MockPageStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page with the given title and body.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(title.into(), body.into());
        self
    }

    /// Make every subsequent `save` fail with a permission error.
    #[must_use]
    pub fn with_failing_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    /// Raw body stored under `title`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn body(&self, title: &str) -> Option<Vec<u8>> {
        self.pages.read().unwrap().get(title).cloned()
    }

    /// Number of stored pages.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.read().unwrap().len()
    }

    /// Whether the store holds no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PageStore for MockPageStore {
    fn save(&self, page: &Page) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::new(
                StorageErrorKind::PermissionDenied,
                BACKEND,
                format!("{}.txt", page.title),
            ));
        }

        self.pages
            .write()
            .unwrap()
            .insert(page.title.clone(), page.body.clone());
        Ok(())
    }

    fn load(&self, title: &str) -> Result<Page, StorageError> {
        self.body(title)
            .map(|body| Page::new(title, body))
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::NotFound, BACKEND, format!("{title}.txt"))
            })
    }
}
