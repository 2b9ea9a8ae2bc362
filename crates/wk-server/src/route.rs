//! Request path validation.
//!
//! A page route has exactly the shape `/<action>/<title>`, where the action is
//! one of `view`, `edit`, `save` and the title is one or more ASCII letters or
//! digits. The extracted title is used verbatim as a filename stem by the page
//! store, so this check is what keeps `.`, `/` and friends out of filenames.

use std::fmt;
use std::str::FromStr;

use axum::http::Method;
use regex::Regex;

/// Grammar for page routes. Anchored on both ends.
const ROUTE_PATTERN: &str = r"^/(edit|save|view)/([a-zA-Z0-9]+)$";

/// Operation selected by the first path segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Show a page.
    View,
    /// Show the edit form for a page.
    Edit,
    /// Persist a submitted page body.
    Save,
}

impl Action {
    /// Path segment naming this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Save => "save",
        }
    }

    /// Whether a request with `method` may perform this action.
    ///
    /// Pages are read with GET (or HEAD) and written with POST.
    #[must_use]
    pub fn allows(self, method: &Method) -> bool {
        match self {
            Self::View | Self::Edit => method == Method::GET || method == Method::HEAD,
            Self::Save => method == Method::POST,
        }
    }

    /// `Allow` header value listing the methods this action accepts.
    #[must_use]
    pub const fn allowed_methods(self) -> &'static str {
        match self {
            Self::View | Self::Edit => "GET,HEAD",
            Self::Save => "POST",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Self::View),
            "edit" => Ok(Self::Edit),
            "save" => Ok(Self::Save),
            other => Err(RouteError::UnknownAction(other.to_owned())),
        }
    }
}

/// A validated `(action, title)` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteMatch {
    /// Action from the first segment.
    pub action: Action,
    /// Page title from the second segment.
    pub title: String,
}

/// Path did not name a page route.
///
/// The detail is for logs only; callers answer with a generic not-found.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Path does not match `/<action>/<title>`.
    #[error("path does not match a page route: {0}")]
    NoMatch(String),
    /// Segment is not a known action.
    #[error("unknown action: {0}")]
    UnknownAction(String),
}

/// Compiled page route grammar.
///
/// Built once at startup and shared by every request.
#[derive(Clone, Debug)]
pub struct RouteMatcher {
    pattern: Regex,
}

impl RouteMatcher {
    /// Compile the route grammar.
    ///
    /// # Panics
    ///
    /// Panics if the route regex fails to compile. The pattern is a constant,
    /// so this never happens in practice.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(ROUTE_PATTERN).expect("route pattern is a valid regex"),
        }
    }

    /// Match `path` against the route grammar and extract action and title.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NoMatch`] for any path outside the grammar: wrong
    /// prefix, empty title, disallowed characters, or extra segments.
    pub fn validate(&self, path: &str) -> Result<RouteMatch, RouteError> {
        let captures = self
            .pattern
            .captures(path)
            .ok_or_else(|| RouteError::NoMatch(path.to_owned()))?;

        let action = captures[1].parse()?;
        let title = captures[2].to_owned();

        Ok(RouteMatch { action, title })
    }
}

impl Default for RouteMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the path for `action` on the page `title`.
#[must_use]
pub fn page_url(action: Action, title: &str) -> String {
    format!("/{action}/{title}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_validate_view() {
        let route = RouteMatcher::new().validate("/view/FrontPage").unwrap();

        assert_eq!(
            route,
            RouteMatch {
                action: Action::View,
                title: "FrontPage".to_owned(),
            }
        );
    }

    #[test]
    fn test_validate_all_actions() {
        let matcher = RouteMatcher::new();

        for (path, action) in [
            ("/view/Alpha1", Action::View),
            ("/edit/Alpha1", Action::Edit),
            ("/save/Alpha1", Action::Save),
        ] {
            let route = matcher.validate(path).unwrap();
            assert_eq!(route.action, action);
            assert_eq!(route.title, "Alpha1");
        }
    }

    #[test]
    fn test_validate_digits_only_title() {
        let route = RouteMatcher::new().validate("/edit/2024").unwrap();

        assert_eq!(route.title, "2024");
    }

    #[test]
    fn test_validate_rejects_malformed_paths() {
        let matcher = RouteMatcher::new();

        for path in [
            "",
            "/",
            "/view",
            "/view/",
            "/view/foo.bar",
            "/view/foo/bar",
            "/view/foo/",
            "/view/../secret",
            "/view/..",
            "/view/foo bar",
            "/view/foo%2Fbar",
            "/view/foo-bar",
            "/view/foo_bar",
            "/view/caf\u{e9}",
            "/delete/foo",
            "/frobnicate/Alpha",
            "/VIEW/foo",
            "view/foo",
            "//view/foo",
            "/view//foo",
            "/x/view/foo",
        ] {
            assert_eq!(
                matcher.validate(path),
                Err(RouteError::NoMatch(path.to_owned())),
                "path: {path:?}"
            );
        }
    }

    #[test]
    fn test_action_round_trip_through_str() {
        for action in [Action::View, Action::Edit, Action::Save] {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_action_from_str_unknown() {
        assert_eq!(
            "delete".parse::<Action>(),
            Err(RouteError::UnknownAction("delete".to_owned()))
        );
    }

    #[test]
    fn test_action_allows_methods() {
        assert!(Action::View.allows(&Method::GET));
        assert!(Action::Edit.allows(&Method::HEAD));
        assert!(!Action::View.allows(&Method::POST));
        assert!(Action::Save.allows(&Method::POST));
        assert!(!Action::Save.allows(&Method::GET));
        assert!(!Action::Save.allows(&Method::PUT));
    }

    #[test]
    fn test_validate_ignores_percent_encoded_letters() {
        assert_eq!(
            RouteMatcher::new().validate("/view/%41lpha"),
            Err(RouteError::NoMatch("/view/%41lpha".to_owned()))
        );
    }

    #[test]
    fn test_page_url() {
        assert_eq!(page_url(Action::Edit, "NoSuchPage"), "/edit/NoSuchPage");
        assert_eq!(page_url(Action::View, "Alpha"), "/view/Alpha");
    }
}
