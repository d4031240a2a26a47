use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use ravon_auth_types::identity::TelegramIdentity;

use crate::domain::repository::AuthCodeRepository;
use crate::domain::types::{AuthCode, CODE_MAX, CODE_MIN, CODE_TTL_SECS, IssuedCode};
use crate::error::AuthServiceError;

fn generate_code() -> String {
    rand::rng().random_range(CODE_MIN..=CODE_MAX).to_string()
}

// ── IssueCode ─────────────────────────────────────────────────────────────────

pub struct IssueCodeUseCase<A: AuthCodeRepository> {
    pub codes: A,
}

impl<A: AuthCodeRepository> IssueCodeUseCase<A> {
    /// Mint a fresh code for `identity`, retiring whatever codes the account
    /// held before. The plaintext is only returned once the row is stored —
    /// a code the caller sees always exists in the store.
    pub async fn execute(
        &self,
        identity: TelegramIdentity,
    ) -> Result<IssuedCode, AuthServiceError> {
        self.codes
            .delete_for_owner(identity.telegram_user_id)
            .await?;

        let now = Utc::now();
        let code = AuthCode {
            id: Uuid::new_v4(),
            telegram_user_id: identity.telegram_user_id,
            code: generate_code(),
            first_name: identity.first_name,
            last_name: identity.last_name,
            username: identity.username,
            photo_url: identity.photo_url,
            expires_at: now + Duration::seconds(CODE_TTL_SECS),
            used_at: None,
            created_at: now,
        };
        self.codes.insert(&code).await?;

        Ok(IssuedCode {
            code: code.code,
            expires_at: code.expires_at,
        })
    }
}

// ── VerifyCode ────────────────────────────────────────────────────────────────

pub struct VerifyCodeUseCase<A: AuthCodeRepository> {
    pub codes: A,
}

impl<A: AuthCodeRepository> VerifyCodeUseCase<A> {
    /// Claim `code` and return the identity snapshot stored with it.
    /// Single-use: a second claim of the same code fails like any other
    /// invalid code.
    pub async fn execute(&self, code: &str) -> Result<TelegramIdentity, AuthServiceError> {
        // Opportunistic sweep. Must never block a login attempt, and the
        // claim predicate below does not rely on it having run.
        if let Err(e) = self.codes.purge_expired().await {
            tracing::warn!(error = %e, "expired-code purge failed");
        }

        let claimed = self
            .codes
            .claim_valid(code)
            .await?
            .ok_or(AuthServiceError::InvalidCode)?;

        Ok(claimed.identity())
    }
}
