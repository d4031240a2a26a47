//! Request and response shapes of `POST /auth/telegram`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::VerifiedUser;

/// Request envelope for `POST /auth/telegram`, dispatched on the `action`
/// field. Payload fields are optional at the wire level; the auth service
/// validates presence and answers a descriptive 400 when required ones are
/// missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum AuthRequest {
    /// Mint a fresh code for a Telegram account (bot gateway path).
    Generate {
        telegram_user_id: Option<i64>,
        telegram_first_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        telegram_last_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        telegram_username: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        telegram_photo_url: Option<String>,
    },
    /// Claim a code typed into the web client.
    Verify { code: Option<String> },
}

/// Success body of the `generate` action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// Body of the `verify` action, for both outcomes: `valid: true` carries the
/// stored identity snapshot, `valid: false` carries a generic error message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<VerifiedUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
