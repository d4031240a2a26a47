//! Minimal Telegram Bot API binding.
//!
//! Covers exactly the surface the bot gateway needs: the webhook update
//! types, inline keyboards, and the four outbound methods (`sendMessage`,
//! `editMessageText`, `answerCallbackQuery`, `getChatMember`).

pub mod client;
pub mod types;
