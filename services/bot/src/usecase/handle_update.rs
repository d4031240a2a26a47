use ravon_auth_types::identity::TelegramIdentity;
use ravon_telegram::types::User;

use crate::domain::repository::{CodeIssuerPort, MembershipPort, ReplyPort};
use crate::domain::types::BotEvent;
use crate::error::BotError;
use crate::texts;
use crate::usecase::membership::MembershipGate;

// ── HandleUpdate ──────────────────────────────────────────────────────────────

/// Runs one classified update through the conversation flow.
pub struct HandleUpdateUseCase<M: MembershipPort, C: CodeIssuerPort, R: ReplyPort> {
    pub gate: MembershipGate<M>,
    pub issuer: C,
    pub replies: R,
    pub channel_username: String,
    pub web_app_url: String,
}

impl<M: MembershipPort, C: CodeIssuerPort, R: ReplyPort> HandleUpdateUseCase<M, C, R> {
    pub async fn execute(&self, event: BotEvent) -> Result<(), BotError> {
        match event {
            BotEvent::CodeRequest { chat_id, from } => self.code_request(chat_id, from).await,
            BotEvent::Help { chat_id } => self.replies.send_message(chat_id, texts::HELP, None).await,
            BotEvent::MembershipCheck {
                callback_id,
                chat_id,
                message_id,
                from,
            } => {
                self.membership_check(&callback_id, chat_id, message_id, from)
                    .await
            }
        }
    }

    /// `/start` and `/code`. Non-members get the join prompt and no code is
    /// minted for them. An issuance failure abandons the flow with a
    /// try-again reply; a code is never half-delivered.
    async fn code_request(&self, chat_id: i64, from: User) -> Result<(), BotError> {
        if !self.gate.is_member(from.id).await {
            return self
                .replies
                .send_message(
                    chat_id,
                    &texts::join_prompt(&from.first_name, &self.channel_username),
                    Some(texts::join_keyboard(&self.channel_username)),
                )
                .await;
        }

        let identity = identity_of(from);
        match self.issuer.issue(&identity).await {
            Ok(issued) => {
                self.replies
                    .send_message(
                        chat_id,
                        &texts::code_message(&identity.first_name, &issued.code),
                        Some(texts::web_app_keyboard(&self.web_app_url)),
                    )
                    .await
            }
            Err(e) => {
                tracing::error!(user_id = identity.telegram_user_id, error = %e, "code issuance failed");
                self.replies
                    .send_message(chat_id, texts::ISSUANCE_FAILED, None)
                    .await
            }
        }
    }

    /// Press on the membership check button. Members get the code edited
    /// into the prompt message, so one interaction chain shows one visible
    /// code; non-members get a transient alert and the prompt stays put.
    async fn membership_check(
        &self,
        callback_id: &str,
        chat_id: i64,
        message_id: i64,
        from: User,
    ) -> Result<(), BotError> {
        if !self.gate.is_member(from.id).await {
            return self
                .replies
                .answer_callback(callback_id, Some(texts::NOT_A_MEMBER_ALERT), true)
                .await;
        }

        self.replies.answer_callback(callback_id, None, false).await?;

        let identity = identity_of(from);
        match self.issuer.issue(&identity).await {
            Ok(issued) => {
                self.replies
                    .edit_message(
                        chat_id,
                        message_id,
                        &texts::membership_confirmed(&issued.code),
                        Some(texts::web_app_keyboard(&self.web_app_url)),
                    )
                    .await
            }
            Err(e) => {
                tracing::error!(user_id = identity.telegram_user_id, error = %e, "code issuance failed");
                self.replies
                    .edit_message(chat_id, message_id, texts::ISSUANCE_FAILED_EDIT, None)
                    .await
            }
        }
    }
}

/// Snapshot of the requesting account, as the code store records it.
/// Telegram does not expose an avatar URL on webhook users.
fn identity_of(user: User) -> TelegramIdentity {
    TelegramIdentity {
        telegram_user_id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        username: user.username,
        photo_url: None,
    }
}
