use chrono::{DateTime, Utc};

use ravon_telegram::types::{Update, User};

/// Callback payload carried by the membership check button.
pub const CHECK_MEMBERSHIP: &str = "check_membership";

/// A code minted by the auth service, ready to hand to the user.
#[derive(Debug, Clone)]
pub struct IssuedCode {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

/// The updates this bot acts on. Everything else in the webhook stream is
/// acknowledged and dropped.
#[derive(Debug, Clone)]
pub enum BotEvent {
    /// `/start` or `/code`: the sender wants a login code.
    CodeRequest { chat_id: i64, from: User },
    /// `/help`: static usage reply.
    Help { chat_id: i64 },
    /// Press on the membership check button under a join prompt.
    MembershipCheck {
        callback_id: String,
        chat_id: i64,
        message_id: i64,
        from: User,
    },
}

/// Map a raw update onto the event union. `None` means the update is not for
/// this bot: plain chatter, unknown commands, foreign callback payloads, or
/// pieces missing that a flow cannot run without (an anonymous command, a
/// callback whose source message Telegram no longer references).
pub fn classify(update: Update) -> Option<BotEvent> {
    if let Some(message) = update.message {
        let text = message.text.as_deref().unwrap_or_default();
        if text.starts_with("/start") || text.starts_with("/code") {
            let from = message.from?;
            return Some(BotEvent::CodeRequest {
                chat_id: message.chat.id,
                from,
            });
        }
        if text.starts_with("/help") {
            return Some(BotEvent::Help {
                chat_id: message.chat.id,
            });
        }
        return None;
    }

    if let Some(callback) = update.callback_query {
        if callback.data.as_deref() != Some(CHECK_MEMBERSHIP) {
            return None;
        }
        // The confirmed-membership flow edits the prompt in place, so a
        // callback without its source message has nothing to act on.
        let message = callback.message?;
        return Some(BotEvent::MembershipCheck {
            callback_id: callback.id,
            chat_id: message.chat.id,
            message_id: message.message_id,
            from: callback.from,
        });
    }

    None
}
