//! Auth types shared across Ravon services.
//!
//! Provides the Telegram identity snapshot and the request/response shapes of
//! the `POST /auth/telegram` endpoint, consumed by the auth service, the bot
//! gateway, and the client SDK.

pub mod api;
pub mod identity;
