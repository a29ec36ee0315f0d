//! Session context and the protected dashboard

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use phonegate_core::user::Picture;
use serde::Serialize;

use super::ENTRY_PATH;
use crate::fetcher::ProfileFetcher;
use crate::gate::SessionState;
use crate::state::AppState;
use crate::store::SessionStorage;

#[derive(Serialize)]
pub struct SessionContext {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub server_time: i64,
}

/// GET /api/session_context
pub async fn get_session_context<S, F>(
    State(state): State<Arc<AppState<S, F>>>,
) -> Json<SessionContext>
where
    S: SessionStorage,
    F: ProfileFetcher + 'static,
{
    let record = state.gate.get_user();

    Json(SessionContext {
        authenticated: record.is_some(),
        phone: record.map(|r| r.phone_normalized.into()),
        server_time: chrono::Utc::now().timestamp(),
    })
}

#[derive(Serialize)]
pub struct DashboardView {
    pub display_name: String,
    pub email: String,
    pub phone: String,
    pub picture: Picture,
}

/// GET /dashboard
pub async fn get_dashboard<S, F>(State(state): State<Arc<AppState<S, F>>>) -> Response
where
    S: SessionStorage,
    F: ProfileFetcher + 'static,
{
    let mut redirect = None;

    match state
        .gate
        .admit_or_redirect(|| redirect = Some(Redirect::to(ENTRY_PATH)))
    {
        SessionState::Admitted(record) => Json(DashboardView {
            display_name: record.display_name(),
            email: record.profile.email,
            phone: record.phone_normalized.into(),
            picture: record.profile.picture,
        })
        .into_response(),
        SessionState::Denied | SessionState::Unknown => {
            tracing::debug!("No session, redirecting to entry page");
            redirect
                .unwrap_or_else(|| Redirect::to(ENTRY_PATH))
                .into_response()
        }
    }
}
