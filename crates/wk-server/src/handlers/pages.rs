//! Page handlers: view, edit and save.
//!
//! Each handler receives a title that has already passed route validation.
//! Storage calls are synchronous whole-file operations; a slow disk holds up
//! only the request that hit it.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::response::{Html, IntoResponse, Response};
use wk_storage::Page;

use crate::error::ServerError;
use crate::form::{self, FORM_CONTENT_TYPE};
use crate::handlers::found;
use crate::render::TemplateName;
use crate::route::{Action, page_url};
use crate::state::AppState;

/// Form field holding the page body.
const BODY_FIELD: &str = "body";

/// Handle GET /view/{title}.
///
/// Pages that can't be loaded redirect to their edit form.
pub(crate) async fn view(
    state: Arc<AppState>,
    _request: Request,
    title: String,
) -> Result<Response, ServerError> {
    let page = match state.store.load(&title) {
        Ok(page) => page,
        Err(err) => {
            tracing::debug!(title = %title, error = %err, "Page not loaded, redirecting to editor");
            return Ok(found(&page_url(Action::Edit, &title)));
        }
    };

    render(&state, TemplateName::View, &page)
}

/// Handle GET /edit/{title}.
///
/// Pages that can't be loaded are edited starting from an empty body.
pub(crate) async fn edit(
    state: Arc<AppState>,
    _request: Request,
    title: String,
) -> Result<Response, ServerError> {
    let page = state.store.load(&title).unwrap_or_else(|err| {
        tracing::debug!(title = %title, error = %err, "Page not loaded, editing blank page");
        Page::blank(title.as_str())
    });

    render(&state, TemplateName::Edit, &page)
}

/// Handle POST /save/{title}.
///
/// Persists the submitted body and redirects to the page view. A store
/// failure is reported as-is and does not redirect.
///
/// The `body` field is decoded to raw bytes, so non-UTF-8 content survives.
/// A form without that field saves an empty page. A request that isn't an
/// urlencoded form at all is a 500 and leaves the stored page untouched.
pub(crate) async fn save(
    state: Arc<AppState>,
    request: Request,
    title: String,
) -> Result<Response, ServerError> {
    if !form::is_form(request.headers()) {
        return Err(ServerError::Form(format!(
            "Expected request with `Content-Type: {FORM_CONTENT_TYPE}`"
        )));
    }

    let bytes = Bytes::from_request(request, &state)
        .await
        .map_err(|rejection| ServerError::Form(rejection.body_text()))?;
    let body = form::field(&bytes, BODY_FIELD).unwrap_or_default();

    let page = Page::new(title, body);
    state.store.save(&page)?;

    tracing::info!(title = %page.title, bytes = page.body.len(), "Page saved");
    Ok(found(&page_url(Action::View, &page.title)))
}

/// Render `page` with the template `name` as an HTML response.
fn render(state: &AppState, name: TemplateName, page: &Page) -> Result<Response, ServerError> {
    let mut html = Vec::new();
    state.templates.render(&mut html, name, page)?;
    Ok(Html(html).into_response())
}
