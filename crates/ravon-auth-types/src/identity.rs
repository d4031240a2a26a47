//! Telegram identity as captured at code issuance and echoed at verification.

use serde::{Deserialize, Serialize};

/// Identity snapshot of a Telegram account, taken when a login code is
/// issued. Only `telegram_user_id` and `first_name` are guaranteed; the rest
/// depend on what the account exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramIdentity {
    pub telegram_user_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub photo_url: Option<String>,
}

/// Identity payload returned to the web client on successful verification.
///
/// Field names are camelCase on the wire, and the Telegram id is a string —
/// JavaScript callers cannot hold a 64-bit integer without precision loss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedUser {
    pub telegram_user_id: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl From<TelegramIdentity> for VerifiedUser {
    fn from(identity: TelegramIdentity) -> Self {
        Self {
            telegram_user_id: identity.telegram_user_id.to_string(),
            first_name: identity.first_name,
            last_name: identity.last_name,
            username: identity.username,
            photo_url: identity.photo_url,
        }
    }
}
