use std::time::Duration;

use anyhow::Context as _;

use ravon_auth_types::api::{AuthRequest, GenerateResponse};
use ravon_auth_types::identity::TelegramIdentity;

use crate::domain::repository::CodeIssuerPort;
use crate::domain::types::IssuedCode;
use crate::error::BotError;

/// Issuance runs inside webhook handling; a hung auth service must not stall
/// update processing indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Mints codes by POSTing the `generate` action to the auth service.
#[derive(Clone)]
pub struct HttpCodeIssuer {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpCodeIssuer {
    pub fn new(auth_url: &str) -> Result<Self, BotError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("build auth http client")?;
        Ok(Self {
            http,
            endpoint: format!("{}/auth/telegram", auth_url.trim_end_matches('/')),
        })
    }
}

impl CodeIssuerPort for HttpCodeIssuer {
    async fn issue(&self, identity: &TelegramIdentity) -> Result<IssuedCode, BotError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&AuthRequest::Generate {
                telegram_user_id: Some(identity.telegram_user_id),
                telegram_first_name: Some(identity.first_name.clone()),
                telegram_last_name: identity.last_name.clone(),
                telegram_username: identity.username.clone(),
                telegram_photo_url: identity.photo_url.clone(),
            })
            .send()
            .await
            .map_err(|e| BotError::CodeIssuance(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::CodeIssuance(format!(
                "auth service answered {}",
                response.status()
            )));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| BotError::CodeIssuance(e.to_string()))?;
        Ok(IssuedCode {
            code: generated.code,
            expires_at: generated.expires_at,
        })
    }
}
