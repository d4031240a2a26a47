use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use uuid::Uuid;

use ravon_auth::domain::repository::AuthCodeRepository;
use ravon_auth::domain::types::AuthCode;
use ravon_auth::error::AuthServiceError;
use ravon_auth_types::identity::TelegramIdentity;

// ── MockCodeStore ────────────────────────────────────────────────────────────

/// In-memory stand-in for the Postgres-backed repository.
///
/// `claim` runs inside a single lock acquisition, mirroring the production
/// one-statement UPDATE, so the concurrency tests observe the same
/// exactly-one-winner behavior as the real store.
#[derive(Clone)]
pub struct MockCodeStore {
    rows: Arc<Mutex<Vec<AuthCode>>>,
    fail_inserts: bool,
    fail_purges: bool,
}

impl MockCodeStore {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            fail_inserts: false,
            fail_purges: false,
        }
    }

    pub fn failing_inserts() -> Self {
        Self {
            fail_inserts: true,
            ..Self::new()
        }
    }

    pub fn failing_purges() -> Self {
        Self {
            fail_purges: true,
            ..Self::new()
        }
    }

    /// Shared handle to the stored rows for post-execution inspection.
    pub fn rows_handle(&self) -> Arc<Mutex<Vec<AuthCode>>> {
        Arc::clone(&self.rows)
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// Seed a row directly, bypassing issuance. Used to plant expired codes.
    pub fn seed(&self, code: AuthCode) {
        self.rows.lock().unwrap().push(code);
    }
}

impl AuthCodeRepository for MockCodeStore {
    async fn delete_for_owner(&self, telegram_user_id: i64) -> Result<u64, AuthServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.telegram_user_id != telegram_user_id);
        Ok((before - rows.len()) as u64)
    }

    async fn insert(&self, code: &AuthCode) -> Result<(), AuthServiceError> {
        if self.fail_inserts {
            return Err(AuthServiceError::Internal(anyhow::anyhow!(
                "code store unavailable"
            )));
        }
        self.rows.lock().unwrap().push(code.clone());
        Ok(())
    }

    async fn claim_valid(&self, code: &str) -> Result<Option<AuthCode>, AuthServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        for row in rows.iter_mut() {
            if row.code == code && row.used_at.is_none() && row.expires_at > now {
                row.used_at = Some(now);
                return Ok(Some(row.clone()));
            }
        }
        Ok(None)
    }

    async fn purge_expired(&self) -> Result<u64, AuthServiceError> {
        if self.fail_purges {
            return Err(AuthServiceError::Internal(anyhow::anyhow!(
                "code store unavailable"
            )));
        }
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        let now = Utc::now();
        rows.retain(|c| c.expires_at > now);
        Ok((before - rows.len()) as u64)
    }
}

// ── Canned identities and rows ───────────────────────────────────────────────

pub fn identity(telegram_user_id: i64, first_name: &str) -> TelegramIdentity {
    TelegramIdentity {
        telegram_user_id,
        first_name: first_name.to_owned(),
        last_name: None,
        username: None,
        photo_url: None,
    }
}

pub fn expired_code(telegram_user_id: i64, code: &str) -> AuthCode {
    let issued = Utc::now() - Duration::seconds(301);
    AuthCode {
        id: Uuid::new_v4(),
        telegram_user_id,
        code: code.to_owned(),
        first_name: "Aziz".to_owned(),
        last_name: None,
        username: None,
        photo_url: None,
        expires_at: issued + Duration::seconds(300),
        used_at: None,
        created_at: issued,
    }
}
