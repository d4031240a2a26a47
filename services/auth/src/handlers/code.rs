use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use ravon_auth_types::api::{AuthRequest, GenerateResponse, VerifyResponse};
use ravon_auth_types::identity::TelegramIdentity;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::code::{IssueCodeUseCase, VerifyCodeUseCase};

/// `POST /auth/telegram`, dispatched on the request's `action` tag.
///
/// `generate` is the bot gateway's machine-to-machine path, `verify` is the
/// web client's; both operate on the same code store. Unknown actions never
/// reach here — the tagged deserializer rejects them with a 4xx.
pub async fn auth_telegram(
    State(state): State<AppState>,
    Json(body): Json<AuthRequest>,
) -> Result<Response, AuthServiceError> {
    match body {
        AuthRequest::Generate {
            telegram_user_id,
            telegram_first_name,
            telegram_last_name,
            telegram_username,
            telegram_photo_url,
        } => {
            let (telegram_user_id, first_name) =
                require_identity(telegram_user_id, telegram_first_name)?;
            let usecase = IssueCodeUseCase {
                codes: state.auth_code_repo(),
            };
            let issued = usecase
                .execute(TelegramIdentity {
                    telegram_user_id,
                    first_name,
                    last_name: telegram_last_name,
                    username: telegram_username,
                    photo_url: telegram_photo_url,
                })
                .await?;
            Ok(Json(GenerateResponse {
                success: true,
                code: issued.code,
                expires_at: issued.expires_at,
            })
            .into_response())
        }
        AuthRequest::Verify { code } => {
            let code = require_code(code)?;
            let usecase = VerifyCodeUseCase {
                codes: state.auth_code_repo(),
            };
            let identity = usecase.execute(&code).await?;
            Ok(Json(VerifyResponse {
                valid: true,
                user: Some(identity.into()),
                error: None,
            })
            .into_response())
        }
    }
}

fn require_identity(
    telegram_user_id: Option<i64>,
    telegram_first_name: Option<String>,
) -> Result<(i64, String), AuthServiceError> {
    match (telegram_user_id, telegram_first_name) {
        (Some(id), Some(name)) if !name.trim().is_empty() => Ok((id, name)),
        _ => Err(AuthServiceError::MissingIdentity),
    }
}

/// Presence is the only validation. Anything non-blank goes to the store
/// lookup as-is; a malformed code simply never matches a row.
fn require_code(code: Option<String>) -> Result<String, AuthServiceError> {
    match code {
        Some(code) if !code.trim().is_empty() => Ok(code),
        _ => Err(AuthServiceError::CodeRequired),
    }
}
