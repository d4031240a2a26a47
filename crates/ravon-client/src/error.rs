/// Internal SDK failures. None of these reach callers of the session
/// manager; they surface as `false` logins or an `Anonymous` state, with the
/// detail logged.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("session slot io: {0}")]
    Io(#[from] std::io::Error),
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}
