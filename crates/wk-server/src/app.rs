//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::any;
use tower_http::trace::TraceLayer;

use crate::dispatch::make_handler;
use crate::handlers;
use crate::middleware::security;
use crate::route::Action;
use crate::state::AppState;

/// Create the application router.
///
/// The `{*rest}` captures only pick which handler runs; the handlers validate
/// the full path, then the method, themselves. Anything else falls through to
/// a plain 404.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route(
            "/view/{*rest}",
            any(make_handler(Action::View, handlers::pages::view)),
        )
        .route(
            "/edit/{*rest}",
            any(make_handler(Action::Edit, handlers::pages::edit)),
        )
        .route(
            "/save/{*rest}",
            any(make_handler(Action::Save, handlers::pages::save)),
        )
        .fallback(handlers::not_found);

    security::with_security_headers(router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
