use chrono::{DateTime, Utc};
use uuid::Uuid;

use ravon_auth_types::identity::TelegramIdentity;

/// One-time login code bound to a Telegram account, carrying the identity
/// snapshot taken when the bot issued it.
#[derive(Debug, Clone)]
pub struct AuthCode {
    pub id: Uuid,
    pub telegram_user_id: i64,
    pub code: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub photo_url: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl AuthCode {
    pub fn is_valid(&self) -> bool {
        self.used_at.is_none() && self.expires_at > Utc::now()
    }

    /// The snapshot as captured at issuance; verification never re-fetches
    /// live Telegram data.
    pub fn identity(&self) -> TelegramIdentity {
        TelegramIdentity {
            telegram_user_id: self.telegram_user_id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            username: self.username.clone(),
            photo_url: self.photo_url.clone(),
        }
    }
}

/// Outcome of issuing a code: the plaintext and its expiry, as reported back
/// to the bot. This is the only moment the plaintext leaves the service.
#[derive(Debug, Clone)]
pub struct IssuedCode {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// Inclusive range login codes are drawn from. Six digits, never a leading
/// zero, so inputs like "007421" are well-formed but can never match.
pub const CODE_MIN: u32 = 100_000;
pub const CODE_MAX: u32 = 999_999;

/// Login code time-to-live in seconds.
pub const CODE_TTL_SECS: i64 = 300;

/// Interval between background sweeps of expired rows, in seconds.
pub const SWEEP_INTERVAL_SECS: u64 = 60;
