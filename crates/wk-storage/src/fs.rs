//! Filesystem storage implementation.
//!
//! Provides [`FsPageStore`], which keeps each page in its own `<title>.txt`
//! file under a root directory.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use crate::page::Page;
use crate::storage::{PageStore, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Extension appended to the title to form the page filename.
const PAGE_EXTENSION: &str = "txt";

/// Permission bits for page files (owner read/write only).
#[cfg(unix)]
const PAGE_MODE: u32 = 0o600;

/// Filesystem page store.
///
/// A page titled `Alpha` lives at `<root>/Alpha.txt`. The file holds the raw
/// body and nothing else.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use wk_storage::{FsPageStore, PageStore};
///
/// let store = FsPageStore::new(PathBuf::from("pages"));
/// let page = store.load("FrontPage")?;
/// ```
#[derive(Debug, Clone)]
pub struct FsPageStore {
    /// Directory holding the page files.
    root: PathBuf,
}

impl FsPageStore {
    /// Create a store rooted at `root`.
    ///
    /// The directory is not created here.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Directory holding the page files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the file path for a title.
    ///
    /// Titles must name a single plain path component. Anything that could
    /// escape the root (separators, `..`, NUL bytes) is rejected.
    fn page_path(&self, title: &str) -> Result<PathBuf, StorageError> {
        let mut components = Path::new(title).components();
        let is_plain = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );

        if !is_plain || title.contains(['/', '\\', '\0']) {
            return Err(StorageError::new(
                StorageErrorKind::InvalidTitle,
                BACKEND,
                title,
            ));
        }

        Ok(self.root.join(format!("{title}.{PAGE_EXTENSION}")))
    }

    fn write_file(path: &Path, body: &[u8]) -> std::io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(PAGE_MODE);
        }

        let mut file = options.open(path)?;
        file.write_all(body)?;

        // `mode` only applies on creation; tighten files that already existed.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(PAGE_MODE))?;
        }

        Ok(())
    }
}

impl PageStore for FsPageStore {
    fn save(&self, page: &Page) -> Result<(), StorageError> {
        let path = self.page_path(&page.title)?;

        Self::write_file(&path, &page.body)
            .map_err(|e| StorageError::from_io(BACKEND, &path, e))?;

        tracing::debug!(title = %page.title, path = %path.display(), bytes = page.body.len(), "Page written");
        Ok(())
    }

    fn load(&self, title: &str) -> Result<Page, StorageError> {
        let path = self.page_path(title)?;

        let body = fs::read(&path)
            .map_err(|e| StorageError::from_io(BACKEND, &path, e))?;

        Ok(Page::new(title, body))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn create_store() -> (TempDir, FsPageStore) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FsPageStore::new(temp_dir.path().to_path_buf());
        (temp_dir, store)
    }

    #[test]
    fn test_save_then_load() {
        let (_temp_dir, store) = create_store();

        store
            .save(&Page::new("TestPage", "This is a sample page."))
            .unwrap();
        let page = store.load("TestPage").unwrap();

        assert_eq!(page, Page::new("TestPage", "This is a sample page."));
    }

    #[test]
    fn test_save_writes_title_txt() {
        let (temp_dir, store) = create_store();

        store.save(&Page::new("Alpha", "hello")).unwrap();

        let content = fs::read(temp_dir.path().join("Alpha.txt")).unwrap();
        assert_eq!(content, b"hello");
    }

    #[test]
    fn test_save_overwrites_previous_body() {
        let (temp_dir, store) = create_store();

        store.save(&Page::new("Alpha", "a much longer first body")).unwrap();
        store.save(&Page::new("Alpha", "short")).unwrap();

        assert_eq!(store.load("Alpha").unwrap().body, b"short");
        assert_eq!(fs::read(temp_dir.path().join("Alpha.txt")).unwrap(), b"short");
    }

    #[test]
    fn test_save_preserves_binary_body() {
        let (_temp_dir, store) = create_store();
        let body = vec![0u8, 159, 146, 150, b'\n', 255];

        store.save(&Page::new("Binary", body.clone())).unwrap();

        assert_eq!(store.load("Binary").unwrap().body, body);
    }

    #[test]
    fn test_save_empty_body() {
        let (_temp_dir, store) = create_store();

        store.save(&Page::blank("Empty")).unwrap();

        assert!(store.load("Empty").unwrap().body.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_save_uses_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (temp_dir, store) = create_store();
        let path = temp_dir.path().join("Secret.txt");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        store.save(&Page::new("Secret", "new")).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_load_missing_page_is_not_found() {
        let (_temp_dir, store) = create_store();

        let err = store.load("NoSuchPage").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, "Fs");
        assert!(err.object.ends_with("NoSuchPage.txt"));
    }

    #[test]
    fn test_load_rereads_after_external_change() {
        let (temp_dir, store) = create_store();
        store.save(&Page::new("Alpha", "first")).unwrap();
        assert_eq!(store.load("Alpha").unwrap().body, b"first");

        fs::write(temp_dir.path().join("Alpha.txt"), "second").unwrap();

        assert_eq!(store.load("Alpha").unwrap().body, b"second");
    }

    #[test]
    fn test_save_into_missing_root_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = FsPageStore::new(temp_dir.path().join("missing"));

        let err = store.save(&Page::new("Alpha", "hello")).unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert!(err.to_string().starts_with("[Fs] not found: "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_rejects_path_like_titles() {
        let (_temp_dir, store) = create_store();

        for title in ["", ".", "..", "../etc/passwd", "a/b", "a\\b", "nul\0byte", "/abs"] {
            let err = store.load(title).unwrap_err();
            assert_eq!(err.kind, StorageErrorKind::InvalidTitle, "title: {title:?}");

            let err = store.save(&Page::new(title, "x")).unwrap_err();
            assert_eq!(err.kind, StorageErrorKind::InvalidTitle, "title: {title:?}");
        }
    }

    #[test]
    fn test_accepts_programmatic_title_with_dot() {
        let (temp_dir, store) = create_store();

        store.save(&Page::new("notes.draft", "x")).unwrap();

        assert!(temp_dir.path().join("notes.draft.txt").exists());
    }
}
