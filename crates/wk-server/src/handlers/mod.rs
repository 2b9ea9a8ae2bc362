//! HTTP request handlers.

pub(crate) mod pages;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::error::ServerError;

/// Fallback for every path outside the page routes.
pub(crate) async fn not_found() -> ServerError {
    ServerError::NotFound
}

/// Build a `302 Found` redirect to `location`.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_owned())]).into_response()
}
