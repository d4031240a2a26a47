use ravon_telegram::client::ApiError;

/// Bot gateway failures. None of them escape the webhook boundary: the user
/// gets a friendly reply or an alert, and the platform always gets
/// `{"ok": true}`.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("code issuance failed: {0}")]
    CodeIssuance(String),
    #[error("telegram api: {0}")]
    Telegram(#[from] ApiError),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}
