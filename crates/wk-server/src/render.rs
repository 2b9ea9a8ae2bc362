//! Page rendering through named HTML templates.
//!
//! The template set is compiled once at startup and is read-only afterwards,
//! so concurrent requests render against it without synchronization.

use std::io;
use std::path::{Path, PathBuf};

use minijinja::{Environment, UndefinedBehavior, context};
use wk_storage::Page;

/// Built-in `view` template.
const VIEW_TEMPLATE: &str = include_str!("../templates/view.html");
/// Built-in `edit` template.
const EDIT_TEMPLATE: &str = include_str!("../templates/edit.html");

/// The templates a page can be rendered with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateName {
    /// Read-only page display.
    View,
    /// Page edit form.
    Edit,
}

impl TemplateName {
    /// Every template the server needs at startup.
    pub const ALL: [Self; 2] = [Self::View, Self::Edit];

    /// File name of the template, both on disk and inside the environment.
    ///
    /// The `.html` suffix turns on HTML auto-escaping.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::View => "view.html",
            Self::Edit => "edit.html",
        }
    }

    const fn builtin_source(self) -> &'static str {
        match self {
            Self::View => VIEW_TEMPLATE,
            Self::Edit => EDIT_TEMPLATE,
        }
    }
}

/// Template loading or rendering error.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Template source could not be read.
    #[error("failed to read template {}: {source}", path.display())]
    Read {
        /// Template file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Template source failed to compile.
    #[error("failed to compile template {name}: {source}")]
    Compile {
        /// Template name.
        name: &'static str,
        /// Underlying template error.
        #[source]
        source: minijinja::Error,
    },
    /// Template failed while rendering a page.
    #[error("{0}")]
    Render(#[from] minijinja::Error),
}

/// Compiled template set.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Load templates from `dir`, or use the built-in set when `dir` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if any template is missing or fails to compile.
    pub fn load(dir: Option<&Path>) -> Result<Self, TemplateError> {
        match dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::builtin(),
        }
    }

    /// Compile the templates embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Compile`] if an embedded template is malformed.
    pub fn builtin() -> Result<Self, TemplateError> {
        Self::compile(
            TemplateName::ALL
                .into_iter()
                .map(|name| (name, name.builtin_source().to_owned())),
        )
    }

    /// Compile `view.html` and `edit.html` from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Read`] if a file is missing or unreadable and
    /// [`TemplateError::Compile`] if it fails to parse.
    pub fn from_dir(dir: &Path) -> Result<Self, TemplateError> {
        let sources = TemplateName::ALL
            .into_iter()
            .map(|name| {
                let path = dir.join(name.file_name());
                std::fs::read_to_string(&path)
                    .map(|source| (name, source))
                    .map_err(|source| TemplateError::Read { path, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::compile(sources)
    }

    fn compile(
        sources: impl IntoIterator<Item = (TemplateName, String)>,
    ) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        for (name, source) in sources {
            env.add_template_owned(name.file_name(), source)
                .map_err(|source| TemplateError::Compile {
                    name: name.file_name(),
                    source,
                })?;
        }

        Ok(Self { env })
    }

    /// Render `page` with the template `name` into `sink`.
    ///
    /// The template sees `title` and `body` as text; both are HTML-escaped.
    /// Bytes already written to `sink` are left in place on failure.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Render`] if template execution or the write fails.
    pub fn render<W: io::Write>(
        &self,
        sink: &mut W,
        name: TemplateName,
        page: &Page,
    ) -> Result<(), TemplateError> {
        let template = self.env.get_template(name.file_name())?;
        template.render_to_write(
            context! {
                title => page.title.as_str(),
                body => page.body_text(),
            },
            sink,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render_to_string(templates: &Templates, name: TemplateName, page: &Page) -> String {
        let mut out = Vec::new();
        templates.render(&mut out, name, page).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_builtin_view() {
        let templates = Templates::builtin().unwrap();

        let html = render_to_string(&templates, TemplateName::View, &Page::new("Alpha", "hello"));

        assert!(html.contains("<h1>Alpha</h1>"));
        assert!(html.contains("<a href=\"/edit/Alpha\">edit</a>"));
        assert!(html.contains("<div>hello</div>"));
    }

    #[test]
    fn test_builtin_edit_blank_page() {
        let templates = Templates::builtin().unwrap();

        let html = render_to_string(&templates, TemplateName::Edit, &Page::blank("Beta"));

        assert!(html.contains("<h1>Editing Beta</h1>"));
        assert!(html.contains("<form action=\"/save/Beta\" method=\"POST\">"));
        assert!(html.contains("<textarea name=\"body\" rows=\"20\" cols=\"80\"></textarea>"));
    }

    #[test]
    fn test_body_is_escaped() {
        let templates = Templates::builtin().unwrap();
        let page = Page::new("Alpha", "<script>alert(1) & more");

        let html = render_to_string(&templates, TemplateName::View, &page);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1) &amp; more"));
    }

    #[test]
    fn test_from_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("view.html"), "V:{{ title }}={{ body }}").unwrap();
        std::fs::write(temp_dir.path().join("edit.html"), "E:{{ title }}").unwrap();

        let templates = Templates::load(Some(temp_dir.path())).unwrap();

        assert_eq!(
            render_to_string(&templates, TemplateName::View, &Page::new("A", "b")),
            "V:A=b"
        );
        assert_eq!(
            render_to_string(&templates, TemplateName::Edit, &Page::blank("A")),
            "E:A"
        );
    }

    #[test]
    fn test_from_dir_missing_template() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("view.html"), "{{ title }}").unwrap();

        let Err(err) = Templates::from_dir(temp_dir.path()) else {
            panic!("expected missing edit.html to fail");
        };

        assert!(matches!(err, TemplateError::Read { .. }));
        assert!(err.to_string().contains("edit.html"));
    }

    #[test]
    fn test_from_dir_syntax_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("view.html"), "{{ title ").unwrap();
        std::fs::write(temp_dir.path().join("edit.html"), "{{ title }}").unwrap();

        let Err(err) = Templates::from_dir(temp_dir.path()) else {
            panic!("expected malformed view.html to fail");
        };

        assert!(matches!(err, TemplateError::Compile { name: "view.html", .. }));
    }

    #[test]
    fn test_render_error_on_undefined_value() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("view.html"), "{{ author }}").unwrap();
        std::fs::write(temp_dir.path().join("edit.html"), "{{ title }}").unwrap();
        let templates = Templates::from_dir(temp_dir.path()).unwrap();

        let mut out = Vec::new();
        let err = templates
            .render(&mut out, TemplateName::View, &Page::blank("A"))
            .unwrap_err();

        assert!(matches!(err, TemplateError::Render(_)));
    }
}
