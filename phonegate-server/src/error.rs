//! Server error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use phonegate_core::error::MSG_UNEXPECTED;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Login(#[from] phonegate_core::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        use phonegate_core::Error;

        let (status, message, field) = match &self {
            ServerError::Login(err) => {
                let status = match err {
                    Error::EmptyInput | Error::InvalidFormat => StatusCode::BAD_REQUEST,
                    Error::LoginInProgress => StatusCode::CONFLICT,
                    Error::ProfileFetchFailed(reason) => {
                        tracing::warn!(%reason, "Profile fetch failed");
                        StatusCode::BAD_GATEWAY
                    }
                    Error::StorageCorrupt(reason) | Error::StorageWrite(reason) => {
                        tracing::error!(%reason, "Session storage failed");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                let field = err.is_field_error().then_some("phone");
                (status, err.user_message(), field)
            }
            ServerError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_UNEXPECTED, None)
            }
        };

        // Field errors render under the input; the rest go to the banner
        let mut body = json!({ "success": false, "reason": message });
        if let Some(field) = field {
            body["field"] = json!(field);
        }
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phonegate_core::Error;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ServerError::from(Error::EmptyInput), StatusCode::BAD_REQUEST),
            (ServerError::from(Error::InvalidFormat), StatusCode::BAD_REQUEST),
            (ServerError::from(Error::LoginInProgress), StatusCode::CONFLICT),
            (
                ServerError::from(Error::ProfileFetchFailed("HTTP error: 500".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ServerError::from(Error::StorageWrite("locked".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ServerError::Storage("gone".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    async fn body_of(err: ServerError) -> serde_json::Value {
        let response = err.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_field_errors_name_the_field() {
        let body = body_of(ServerError::from(Error::InvalidFormat)).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["field"], "phone");

        let body = body_of(ServerError::from(Error::EmptyInput)).await;
        assert_eq!(body["field"], "phone");
    }

    #[tokio::test]
    async fn test_banner_errors_have_no_field() {
        let body = body_of(ServerError::from(Error::ProfileFetchFailed("timeout".into()))).await;
        assert!(body.get("field").is_none());
        assert_eq!(body["reason"], phonegate_core::error::MSG_PROFILE_FETCH);

        let body = body_of(ServerError::Storage("gone".into())).await;
        assert!(body.get("field").is_none());
        assert_eq!(body["reason"], MSG_UNEXPECTED);
    }
}
