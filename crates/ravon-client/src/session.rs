//! The single local session slot.

#![allow(async_fn_in_trait)]

use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ravon_auth_types::identity::VerifiedUser;

use crate::error::ClientError;

/// A logged-in identity plus the moment verification succeeded. Sessions are
/// only ever created by a successful code exchange and never expire on their
/// own; `logout` is the sole way out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user: VerifiedUser,
    pub authenticated_at: DateTime<Utc>,
}

/// Persistence for the session slot. There is exactly one slot: `save`
/// overwrites whatever is there, `clear` empties it.
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<Session>, ClientError>;
    async fn save(&self, session: &Session) -> Result<(), ClientError>;
    async fn clear(&self) -> Result<(), ClientError>;
}

/// Stores the slot as one JSON file.
///
/// Saves go through a sibling temp file and a rename, so the slot on disk is
/// always either the previous session or the new one, never a torn write. A
/// missing file is an empty slot; an unreadable one is treated as empty too,
/// with a warning, so a corrupt slot can never lock the user out of the
/// login screen.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>, ClientError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_slice(&bytes) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "unreadable session slot, treating as empty");
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &Session) -> Result<(), ClientError> {
        let staged = self.path.with_extension("tmp");
        tokio::fs::write(&staged, serde_json::to_vec_pretty(session)?).await?;
        tokio::fs::rename(&staged, &self.path).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
