#![allow(async_fn_in_trait)]

use crate::domain::types::AuthCode;
use crate::error::AuthServiceError;

/// Repository for one-time login codes.
pub trait AuthCodeRepository: Send + Sync {
    /// Delete every code belonging to an account, used or not. Returns the
    /// number of rows removed.
    async fn delete_for_owner(&self, telegram_user_id: i64) -> Result<u64, AuthServiceError>;

    /// Insert a freshly issued code.
    async fn insert(&self, code: &AuthCode) -> Result<(), AuthServiceError>;

    /// Atomically claim an unused, unexpired code: mark it used and return
    /// it. `None` when no row qualifies — unknown, expired, and already-used
    /// codes are indistinguishable here on purpose. Under concurrent claims
    /// of the same code exactly one caller receives the row.
    async fn claim_valid(&self, code: &str) -> Result<Option<AuthCode>, AuthServiceError>;

    /// Delete rows whose expiry has passed. Housekeeping only; validity is
    /// always enforced by the claim predicate, never by this sweep.
    async fn purge_expired(&self) -> Result<u64, AuthServiceError>;
}
