//! Application state.
//!
//! Shared state for all request handlers. Nothing in here is mutated after
//! startup.

use std::sync::Arc;

use wk_storage::PageStore;

use crate::render::Templates;
use crate::route::RouteMatcher;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Page persistence backend.
    pub(crate) store: Arc<dyn PageStore>,
    /// Compiled page templates.
    pub(crate) templates: Templates,
    /// Compiled route grammar.
    pub(crate) routes: RouteMatcher,
}

impl AppState {
    pub(crate) fn new(store: Arc<dyn PageStore>, templates: Templates) -> Self {
        Self {
            store,
            templates,
            routes: RouteMatcher::new(),
        }
    }
}
