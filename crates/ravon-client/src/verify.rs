//! Code verification against the auth service.

#![allow(async_fn_in_trait)]

use std::time::Duration;

use ravon_auth_types::api::{AuthRequest, VerifyResponse};
use ravon_auth_types::identity::VerifiedUser;

use crate::error::ClientError;

/// Keeps a stuck auth service from wedging the login flow; the busy flag is
/// released as soon as this fires.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Exchanges a code for the identity it was issued to. `None` means the
/// service answered and refused; errors are transport or decoding failures.
pub trait VerifyPort: Send + Sync {
    async fn verify(&self, code: &str) -> Result<Option<VerifiedUser>, ClientError>;
}

/// `VerifyPort` over `POST {base_url}/auth/telegram`.
pub struct HttpVerifier {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpVerifier {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/auth/telegram", base_url.trim_end_matches('/')),
        })
    }
}

impl VerifyPort for HttpVerifier {
    async fn verify(&self, code: &str) -> Result<Option<VerifiedUser>, ClientError> {
        // Refusals come back as 400 with the same body shape as a success,
        // so the verdict is read from the body for any status.
        let body = self
            .http
            .post(&self.endpoint)
            .json(&AuthRequest::Verify {
                code: Some(code.to_owned()),
            })
            .send()
            .await?
            .text()
            .await?;
        verdict(&body)
    }
}

fn verdict(body: &str) -> Result<Option<VerifiedUser>, ClientError> {
    let response: VerifyResponse = serde_json::from_str(body)?;
    if !response.valid {
        tracing::debug!(error = ?response.error, "code verification refused");
        return Ok(None);
    }
    Ok(response.user)
}
