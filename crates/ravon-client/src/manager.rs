//! Session lifecycle and route guarding.

use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;

use crate::session::{Session, SessionStore};
use crate::verify::VerifyPort;

/// What the client knows about the session right now. `Unknown` holds from
/// construction until `restore` has read the slot once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unknown,
    Anonymous,
    Authenticated(Session),
}

/// What a guarded route should do for a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Initial read still pending; render nothing yet.
    Wait,
    /// No session; send the user to the code-entry screen.
    RedirectToEntry,
    /// Session present; render the protected content.
    Render,
}

pub fn route_decision(state: &SessionState) -> RouteDecision {
    match state {
        SessionState::Unknown => RouteDecision::Wait,
        SessionState::Anonymous => RouteDecision::RedirectToEntry,
        SessionState::Authenticated(_) => RouteDecision::Render,
    }
}

/// Owns the session slot and the login flow.
///
/// One login request runs at a time: while a verification is in flight the
/// busy flag swallows further attempts, and a drop guard clears the flag on
/// every exit path. Failures of any kind leave the existing session exactly
/// as it was.
pub struct SessionManager<S, V> {
    store: S,
    verifier: V,
    state: Mutex<SessionState>,
    busy: AtomicBool,
}

impl<S: SessionStore, V: VerifyPort> SessionManager<S, V> {
    pub fn new(store: S, verifier: V) -> Self {
        Self {
            store,
            verifier,
            state: Mutex::new(SessionState::Unknown),
            busy: AtomicBool::new(false),
        }
    }

    /// One-time read of the persisted slot, run at startup. Until it
    /// completes the state stays `Unknown` and guarded routes wait. A slot
    /// that cannot be read restores as `Anonymous`.
    pub async fn restore(&self) -> SessionState {
        let restored = match self.store.load().await {
            Ok(Some(session)) => SessionState::Authenticated(session),
            Ok(None) => SessionState::Anonymous,
            Err(e) => {
                tracing::warn!(error = %e, "session restore failed, starting signed out");
                SessionState::Anonymous
            }
        };
        *self.lock_state() = restored.clone();
        restored
    }

    /// Exchange a one-time code for a session. `false` covers every failure:
    /// another attempt in flight, transport trouble, a refused code, or a
    /// slot write that did not stick. Only a full success touches the stored
    /// session.
    pub async fn login_with_code(&self, code: &str) -> bool {
        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            tracing::debug!("login ignored, another attempt is in flight");
            return false;
        };

        let user = match self.verifier.verify(code).await {
            Ok(Some(user)) => user,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!(error = %e, "code verification did not complete");
                return false;
            }
        };

        let session = Session {
            user,
            authenticated_at: Utc::now(),
        };
        if let Err(e) = self.store.save(&session).await {
            tracing::warn!(error = %e, "session slot write failed");
            return false;
        }
        *self.lock_state() = SessionState::Authenticated(session);
        true
    }

    /// Empty the slot and the in-memory state. Unconditional: even if the
    /// slot refuses to clear, the state ends up `Anonymous`.
    pub async fn logout(&self) {
        if let Err(e) = self.store.clear().await {
            tracing::warn!(error = %e, "session slot clear failed");
        }
        *self.lock_state() = SessionState::Anonymous;
    }

    pub fn current(&self) -> SessionState {
        self.lock_state().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        // a poisoned lock still holds a coherent state value
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Holds the in-flight flag for the duration of one login attempt and
/// releases it on drop, early returns included.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
