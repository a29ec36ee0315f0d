//! HTTP routes for the login service

mod auth;
mod entry;
mod session;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::fetcher::ProfileFetcher;
use crate::state::AppState;
use crate::store::SessionStorage;

/// Where denied visitors and logged-out users are sent
pub const ENTRY_PATH: &str = "/login";

/// The protected page
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Create the router with all routes
pub fn create_router<S, F>(state: Arc<AppState<S, F>>) -> Router
where
    S: SessionStorage + 'static,
    F: ProfileFetcher + 'static,
{
    Router::new()
        .route(ENTRY_PATH, get(entry::get_entry))
        .route("/api/validate_phone", get(entry::validate_phone))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        .route("/api/session_context", get(session::get_session_context))
        .route(DASHBOARD_PATH, get(session::get_dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
