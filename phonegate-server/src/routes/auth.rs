//! Login and logout endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::response::Redirect;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{DASHBOARD_PATH, ENTRY_PATH};
use crate::error::ServerError;
use crate::fetcher::ProfileFetcher;
use crate::state::AppState;
use crate::store::SessionStorage;

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub phone: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub redirect: &'static str,
    pub phone: String,
    pub display_name: String,
}

/// POST /api/login
pub async fn login<S, F>(
    State(state): State<Arc<AppState<S, F>>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ServerError>
where
    S: SessionStorage,
    F: ProfileFetcher + 'static,
{
    let record = state.login.login(&req.phone).await?;

    Ok(Json(LoginResponse {
        success: true,
        redirect: DASHBOARD_PATH,
        display_name: record.display_name(),
        phone: record.phone_normalized.into(),
    }))
}

/// POST /api/logout
pub async fn logout<S, F>(State(state): State<Arc<AppState<S, F>>>) -> Redirect
where
    S: SessionStorage,
    F: ProfileFetcher + 'static,
{
    state.gate.logout();
    tracing::info!("Logged out");

    Redirect::to(ENTRY_PATH)
}
