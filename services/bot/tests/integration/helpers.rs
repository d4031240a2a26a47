use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};

use ravon_auth_types::identity::TelegramIdentity;
use ravon_bot::domain::repository::{CodeIssuerPort, MembershipPort, ReplyPort};
use ravon_bot::domain::types::IssuedCode;
use ravon_bot::error::BotError;
use ravon_bot::usecase::handle_update::HandleUpdateUseCase;
use ravon_bot::usecase::membership::MembershipGate;
use ravon_telegram::types::{ChatMemberStatus, InlineKeyboardMarkup, User};

pub const CHANNEL_USERNAME: &str = "@ravon_channel";
pub const WEB_APP_URL: &str = "https://app.ravon.example";

// ── MockMembership ────────────────────────────────────────────────────────────

/// Answers every lookup with one fixed status, or fails every lookup.
pub struct MockMembership {
    status: Option<ChatMemberStatus>,
}

impl MockMembership {
    pub fn with_status(status: ChatMemberStatus) -> Self {
        Self {
            status: Some(status),
        }
    }

    pub fn failing() -> Self {
        Self { status: None }
    }
}

impl MembershipPort for MockMembership {
    async fn chat_member_status(&self, _user_id: i64) -> Result<ChatMemberStatus, BotError> {
        match self.status {
            Some(status) => Ok(status),
            None => Err(BotError::Internal(anyhow::anyhow!(
                "membership lookup unavailable"
            ))),
        }
    }
}

// ── MockIssuer ────────────────────────────────────────────────────────────────

/// Records every issuance request; answers with a fixed code or a failure.
#[derive(Clone)]
pub struct MockIssuer {
    requested: Arc<Mutex<Vec<TelegramIdentity>>>,
    fail: bool,
}

impl MockIssuer {
    pub fn issuing() -> Self {
        Self {
            requested: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::issuing()
        }
    }

    pub fn requests(&self) -> Vec<TelegramIdentity> {
        self.requested.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requested.lock().unwrap().len()
    }
}

impl CodeIssuerPort for MockIssuer {
    async fn issue(&self, identity: &TelegramIdentity) -> Result<IssuedCode, BotError> {
        self.requested.lock().unwrap().push(identity.clone());
        if self.fail {
            return Err(BotError::CodeIssuance(
                "auth service answered 500 Internal Server Error".to_owned(),
            ));
        }
        Ok(IssuedCode {
            code: "123456".to_owned(),
            expires_at: Utc::now() + Duration::minutes(5),
        })
    }
}

// ── MockReplies ───────────────────────────────────────────────────────────────

/// One outbound Telegram call, as the flow requested it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Message {
        chat_id: i64,
        text: String,
        has_keyboard: bool,
    },
    Edit {
        chat_id: i64,
        message_id: i64,
        text: String,
        has_keyboard: bool,
    },
    CallbackAnswer {
        callback_id: String,
        text: Option<String>,
        show_alert: bool,
    },
}

/// Records every reply; optionally fails all of them.
#[derive(Clone, Default)]
pub struct MockReplies {
    sent: Arc<Mutex<Vec<Reply>>>,
    fail: bool,
}

impl MockReplies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Reply> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, reply: Reply) -> Result<(), BotError> {
        self.sent.lock().unwrap().push(reply);
        if self.fail {
            return Err(BotError::Internal(anyhow::anyhow!("telegram unreachable")));
        }
        Ok(())
    }
}

impl ReplyPort for MockReplies {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), BotError> {
        self.record(Reply::Message {
            chat_id,
            text: text.to_owned(),
            has_keyboard: keyboard.is_some(),
        })
    }

    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), BotError> {
        self.record(Reply::Edit {
            chat_id,
            message_id,
            text: text.to_owned(),
            has_keyboard: keyboard.is_some(),
        })
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<(), BotError> {
        self.record(Reply::CallbackAnswer {
            callback_id: callback_id.to_owned(),
            text: text.map(str::to_owned),
            show_alert,
        })
    }
}

// ── Fixtures ──────────────────────────────────────────────────────────────────

pub fn gateway(
    membership: MockMembership,
    issuer: MockIssuer,
    replies: MockReplies,
) -> HandleUpdateUseCase<MockMembership, MockIssuer, MockReplies> {
    HandleUpdateUseCase {
        gate: MembershipGate { membership },
        issuer,
        replies,
        channel_username: CHANNEL_USERNAME.to_owned(),
        web_app_url: WEB_APP_URL.to_owned(),
    }
}

pub fn user(id: i64, first_name: &str) -> User {
    User {
        id,
        first_name: first_name.to_owned(),
        last_name: None,
        username: None,
    }
}
