use ravon_telegram::client::Client;
use ravon_telegram::types::{ChatMemberStatus, InlineKeyboardMarkup};

use crate::domain::repository::{MembershipPort, ReplyPort};
use crate::error::BotError;

/// Membership lookups via `getChatMember` against the configured channel.
#[derive(Clone)]
pub struct TelegramMembershipPort {
    pub client: Client,
    pub channel_id: i64,
}

impl MembershipPort for TelegramMembershipPort {
    async fn chat_member_status(&self, user_id: i64) -> Result<ChatMemberStatus, BotError> {
        let member = self.client.get_chat_member(self.channel_id, user_id).await?;
        Ok(member.status)
    }
}

/// Replies through the Bot API.
#[derive(Clone)]
pub struct TelegramReplyPort {
    pub client: Client,
}

impl ReplyPort for TelegramReplyPort {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), BotError> {
        Ok(self
            .client
            .send_message(chat_id, text, keyboard.as_ref())
            .await?)
    }

    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<InlineKeyboardMarkup>,
    ) -> Result<(), BotError> {
        Ok(self
            .client
            .edit_message_text(chat_id, message_id, text, keyboard.as_ref())
            .await?)
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<(), BotError> {
        Ok(self
            .client
            .answer_callback_query(callback_id, text, show_alert)
            .await?)
    }
}
