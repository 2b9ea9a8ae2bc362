//! Error types for the HTTP server.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use wk_storage::StorageError;

use crate::render::TemplateError;
use crate::route::Action;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Path is not a page route. The body never says why the request missed.
    #[error("404 page not found")]
    NotFound,

    /// Valid page path requested with a method its action doesn't accept.
    #[error("405 method not allowed")]
    MethodNotAllowed(Action),

    /// Page store failure.
    #[error("{0}")]
    Storage(#[from] StorageError),

    /// Template execution failure.
    #[error("{0}")]
    Render(#[from] TemplateError),

    /// Submitted form could not be read.
    #[error("{0}")]
    Form(String),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Storage(_) | Self::Render(_) | Self::Form(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "Request failed");
        }

        if let Self::MethodNotAllowed(action) = self {
            return (
                status,
                [(header::ALLOW, action.allowed_methods())],
                self.to_string(),
            )
                .into_response();
        }

        (status, self.to_string()).into_response()
    }
}
