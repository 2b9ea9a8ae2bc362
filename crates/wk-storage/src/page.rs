//! The page entity.

/// A wiki page: a title and a raw byte body.
///
/// The title doubles as the stem of the persisted object's name. Nothing
/// besides `title` and `body` is persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    /// Page identifier.
    pub title: String,
    /// Raw page content. No encoding is enforced.
    pub body: Vec<u8>,
}

impl Page {
    /// Create a page from a title and body.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Create a page with an empty body.
    ///
    /// Used by the edit form when no page has been saved under `title` yet.
    #[must_use]
    pub fn blank(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
