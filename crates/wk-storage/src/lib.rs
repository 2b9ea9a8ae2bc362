//! Page storage for the wk wiki.
//!
//! This crate provides the [`Page`] entity and a [`PageStore`] trait for persisting
//! pages, keyed by title, to a byte-object backend.
//!
//! # Architecture
//!
//! The crate provides:
//! - [`PageStore`] trait with `save()` and `load()` methods
//! - [`FsPageStore`] implementation storing one `<title>.txt` file per page
//! - [`MockPageStore`] for testing (behind `mock` feature flag)
//!
//! Every `load` goes to the backend; nothing is cached. Concurrent `save` and
//! `load` calls on the same title are not coordinated, so a reader may observe
//! a partially written body.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use wk_storage::{FsPageStore, Page, PageStore};
//!
//! let store = FsPageStore::new(PathBuf::from("pages"));
//! store.save(&Page::new("TestPage", "This is a sample page."))?;
//! let page = store.load("TestPage")?;
//! assert_eq!(page.body, b"This is a sample page.");
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod page;
mod storage;

pub use fs::FsPageStore;
#[cfg(feature = "mock")]
pub use mock::MockPageStore;
pub use page::Page;
pub use storage::{PageStore, StorageError, StorageErrorKind};
