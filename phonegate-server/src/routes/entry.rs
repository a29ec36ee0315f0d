//! Entry page and eager field validation

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use phonegate_core::phone;
use serde::{Deserialize, Serialize};

use crate::fetcher::ProfileFetcher;
use crate::state::AppState;
use crate::store::SessionStorage;

#[derive(Serialize)]
pub struct EntryResponse {
    /// Name of the single form field
    pub field: &'static str,
    pub authenticated: bool,
}

/// GET /login
pub async fn get_entry<S, F>(State(state): State<Arc<AppState<S, F>>>) -> Json<EntryResponse>
where
    S: SessionStorage,
    F: ProfileFetcher + 'static,
{
    Json(EntryResponse {
        field: "phone",
        authenticated: state.gate.has_valid_session(),
    })
}

#[derive(Deserialize)]
pub struct ValidatePhoneQuery {
    #[serde(default)]
    pub phone: String,
}

#[derive(Serialize)]
pub struct ValidatePhoneResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
}

/// GET /api/validate_phone
///
/// Checks the field as it is typed. Never touches the session.
pub async fn validate_phone(Query(query): Query<ValidatePhoneQuery>) -> Json<ValidatePhoneResponse> {
    let response = match phone::validate_and_normalize(&query.phone) {
        Ok(normalized) => ValidatePhoneResponse {
            valid: true,
            reason: None,
            normalized: Some(normalized.into()),
        },
        Err(e) => ValidatePhoneResponse {
            valid: false,
            reason: Some(e.user_message()),
            normalized: None,
        },
    };

    Json(response)
}
