#![allow(async_fn_in_trait)]

use ravon_auth_types::identity::TelegramIdentity;
use ravon_telegram::types::{ChatMemberStatus, InlineKeyboardMarkup};

use crate::domain::types::IssuedCode;
use crate::error::BotError;

/// Looks up the standing of an account in the gated channel.
pub trait MembershipPort: Send + Sync {
    async fn chat_member_status(&self, user_id: i64) -> Result<ChatMemberStatus, BotError>;
}

/// Mints login codes. The production impl calls the auth service, so codes
/// requested through the bot land in the same store the web client verifies
/// against.
pub trait CodeIssuerPort: Send + Sync {
    async fn issue(&self, identity: &TelegramIdentity) -> Result<IssuedCode, BotError>;
}

/// Outbound Telegram surface of the conversation flow. Texts are Telegram
/// HTML; keyboards are optional.
pub trait ReplyPort: Send + Sync {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), BotError>;

    /// Replace the text (and keyboard) of a message the bot sent earlier.
    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), BotError>;

    /// Acknowledge a callback press, optionally with an alert popup.
    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<(), BotError>;
}
