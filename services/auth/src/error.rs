use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Auth service domain error variants.
///
/// Display strings double as the public error messages, so they follow the
/// wire contract rather than Rust conventions. `InvalidCode` deliberately
/// covers unknown, expired, and already-used codes alike.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("telegram_user_id and telegram_first_name are required")]
    MissingIdentity,
    #[error("Code is required")]
    CodeRequired,
    #[error("Invalid or expired code")]
    InvalidCode,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingIdentity | Self::CodeRequired | Self::InvalidCode => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Only 500s log here; TraceLayer records the rest.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, "internal error");
        }
        // Verification failures keep the `valid` flag so the web client can
        // treat success and rejection bodies uniformly.
        let body = match &self {
            Self::CodeRequired | Self::InvalidCode => serde_json::json!({
                "valid": false,
                "error": self.to_string(),
            }),
            Self::MissingIdentity | Self::Internal(_) => serde_json::json!({
                "error": self.to_string(),
            }),
        };
        (status, axum::Json(body)).into_response()
    }
}
