// HTTP front-end.
// Router, shared state, and page handlers for the search and detail views.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::search::SearchService;

pub mod handlers;
pub mod middleware;
pub mod views;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchService>,
}

impl AppState {
    pub fn new(search: SearchService) -> Self {
        Self {
            search: Arc::new(search),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/search", get(handlers::search_page))
        .route("/detail", get(handlers::detail_page))
        .route("/_health", get(handlers::health))
        .route("/_cache/clear", post(handlers::clear_cache))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::log_responses))
}
