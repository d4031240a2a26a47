//! HTTP client for the Bot API.

use std::time::Duration;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::types::{ChatMember, InlineKeyboardMarkup, Message};

/// Per-request timeout. Bot API calls run inside webhook handling, so a hung
/// call must not stall update processing indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("telegram rejected the call: {description}")]
    Api { description: String },
}

/// Envelope every Bot API method responds with.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Serialize)]
struct SendMessagePayload<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<&'a InlineKeyboardMarkup>,
}

#[derive(Serialize)]
struct EditMessagePayload<'a> {
    chat_id: i64,
    message_id: i64,
    text: &'a str,
    parse_mode: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<&'a InlineKeyboardMarkup>,
}

#[derive(Serialize)]
struct AnswerCallbackPayload<'a> {
    callback_query_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    show_alert: bool,
}

#[derive(Serialize)]
struct GetChatMemberPayload {
    chat_id: i64,
    user_id: i64,
}

/// Minimal Bot API client. Cheap to clone; all methods POST JSON to
/// `{base_url}/bot{token}/{method}` and unwrap the `{ok, result}` envelope.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    method_base: String,
}

impl Client {
    pub fn new(token: &str) -> Result<Self, ApiError> {
        Self::with_base_url(token, "https://api.telegram.org")
    }

    /// Point the client at a different API host. Used by tests and proxies.
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            method_base: format!("{}/bot{token}", base_url.trim_end_matches('/')),
        })
    }

    /// Messages use Telegram HTML markup (`<code>`, `<b>`).
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<(), ApiError> {
        let _: Message = self
            .call(
                "sendMessage",
                &SendMessagePayload {
                    chat_id,
                    text,
                    parse_mode: "HTML",
                    reply_markup,
                },
            )
            .await?;
        Ok(())
    }

    pub async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        reply_markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<(), ApiError> {
        // Returns the edited Message, or `true` for inline-mode messages.
        let _: serde_json::Value = self
            .call(
                "editMessageText",
                &EditMessagePayload {
                    chat_id,
                    message_id,
                    text,
                    parse_mode: "HTML",
                    reply_markup,
                },
            )
            .await?;
        Ok(())
    }

    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<(), ApiError> {
        let _: bool = self
            .call(
                "answerCallbackQuery",
                &AnswerCallbackPayload {
                    callback_query_id,
                    text,
                    show_alert,
                },
            )
            .await?;
        Ok(())
    }

    pub async fn get_chat_member(
        &self,
        chat_id: i64,
        user_id: i64,
    ) -> Result<ChatMember, ApiError> {
        self.call("getChatMember", &GetChatMemberPayload { chat_id, user_id })
            .await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &impl Serialize,
    ) -> Result<T, ApiError> {
        let response: ApiResponse<T> = self
            .http
            .post(format!("{}/{method}", self.method_base))
            .json(payload)
            .send()
            .await?
            .json()
            .await?;

        match response {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse { description, .. } => Err(ApiError::Api {
                description: description.unwrap_or_else(|| "no description".to_owned()),
            }),
        }
    }
}
