//! Route validation wrapper for page handlers.
//!
//! Page handlers take the already-validated title as an argument. The wrapper
//! produced here runs the route grammar against the request path first and
//! answers with a not-found response when it fails, so a page handler never
//! sees an invalid path and never parses the path itself.
//!
//! The method is checked only after the path validates. A malformed path is a
//! plain 404 whatever the method, so a miss never leaks an `Allow` header.
//!
//! Validation runs on the path exactly as it appears in the request line;
//! percent-escapes are not decoded first.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};

use crate::error::ServerError;
use crate::route::Action;
use crate::state::AppState;

/// Boxed response future returned by wrapped handlers.
pub(crate) type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// Wrap a page handler so it only runs for paths that validate as `action`.
///
/// The returned closure is an axum handler taking the shared state and the raw
/// request.
pub(crate) fn make_handler<H, Fut, R>(
    action: Action,
    handler: H,
) -> impl Fn(State<Arc<AppState>>, Request) -> HandlerFuture + Clone + Send + Sync + 'static
where
    H: Fn(Arc<AppState>, Request, String) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    move |State(state): State<Arc<AppState>>, request: Request| -> HandlerFuture {
        let handler = handler.clone();
        Box::pin(async move {
            let path = request.uri().path().to_owned();
            match state.routes.validate(&path) {
                Ok(route) if route.action == action => {
                    if !action.allows(request.method()) {
                        tracing::debug!(path = %path, method = %request.method(), "Method not allowed");
                        return ServerError::MethodNotAllowed(action).into_response();
                    }
                    handler(state, request, route.title).await.into_response()
                }
                Ok(route) => {
                    tracing::debug!(path = %path, expected = %action, got = %route.action, "Route action mismatch");
                    ServerError::NotFound.into_response()
                }
                Err(err) => {
                    tracing::debug!(path = %path, error = %err, "Rejected request path");
                    ServerError::NotFound.into_response()
                }
            }
        })
    }
}
